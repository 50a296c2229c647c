//! Support operations behind the CLI subcommands.
//!
//! # Responsibilities
//! - Report the resolved directories and which source produced each
//! - List installed front-end extensions from their bundle manifests
//! - Toggle extensions via the bundle's `page_config.json` disabled list
//!
//! Building or installing bundles is out of scope; these commands only
//! read manifests and edit the disabled list the front end honors.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::HostConfig;
use crate::paths::{self, PathKind, PathSource};

/// Relative location of the page config inside the bundle.
const PAGE_CONFIG_FILE: &str = "settings/page_config.json";
/// Key holding the disabled extension names.
const DISABLED_KEY: &str = "disabledExtensions";

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("unknown extension {0:?}")]
    UnknownExtension(String),
}

/// One resolved directory, for the `paths` subcommand.
#[derive(Debug)]
pub struct ResolvedPath {
    pub label: &'static str,
    pub path: PathBuf,
    pub source: PathSource,
}

/// Resolve all three directories the way the builder would.
pub fn resolved_paths(host: &HostConfig) -> Vec<ResolvedPath> {
    let base = paths::default_config_base();
    [
        ("app bundle", PathKind::AppBundle, host.app_dir.as_deref()),
        (
            "user settings",
            PathKind::UserSettings,
            host.user_settings_dir.as_deref(),
        ),
        (
            "workspaces",
            PathKind::Workspaces,
            host.workspaces_dir.as_deref(),
        ),
    ]
    .into_iter()
    .map(|(label, kind, explicit)| {
        let (path, source) = paths::resolve_with_source(kind, explicit, &base);
        ResolvedPath {
            label,
            path,
            source,
        }
    })
    .collect()
}

/// A front-end extension as described by its bundle manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtensionManifest {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
}

/// An extension plus its enabled state.
#[derive(Debug)]
pub struct ExtensionStatus {
    pub manifest: ExtensionManifest,
    pub enabled: bool,
}

/// List extensions from `<app_dir>/extensions/*.json`, sorted by name.
pub fn list_extensions(app_dir: &Path) -> Result<Vec<ExtensionStatus>, CommandError> {
    let disabled = read_disabled(app_dir)?;
    let manifests_dir = app_dir.join("extensions");

    let mut extensions = Vec::new();
    let entries = match fs::read_dir(&manifests_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(extensions),
        Err(err) => return Err(err.into()),
    };
    for entry in entries {
        let path = entry?.path();
        if path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }
        let content = fs::read_to_string(&path)?;
        let manifest: ExtensionManifest =
            serde_json::from_str(&content).map_err(|source| CommandError::Json {
                path: path.display().to_string(),
                source,
            })?;
        let enabled = !disabled.contains(&manifest.name);
        extensions.push(ExtensionStatus { manifest, enabled });
    }
    extensions.sort_by(|a, b| a.manifest.name.cmp(&b.manifest.name));
    Ok(extensions)
}

/// Enable or disable one extension by editing the disabled list.
pub fn set_extension_enabled(
    app_dir: &Path,
    name: &str,
    enabled: bool,
) -> Result<(), CommandError> {
    let known = list_extensions(app_dir)?
        .iter()
        .any(|ext| ext.manifest.name == name);
    if !known {
        return Err(CommandError::UnknownExtension(name.to_string()));
    }

    let mut disabled = read_disabled(app_dir)?;
    if enabled {
        disabled.retain(|entry| entry != name);
    } else if !disabled.iter().any(|entry| entry == name) {
        disabled.push(name.to_string());
        disabled.sort();
    }
    write_disabled(app_dir, &disabled)
}

fn page_config_path(app_dir: &Path) -> PathBuf {
    app_dir.join(PAGE_CONFIG_FILE)
}

fn read_disabled(app_dir: &Path) -> Result<Vec<String>, CommandError> {
    let path = page_config_path(app_dir);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };
    let value: Value = serde_json::from_str(&content).map_err(|source| CommandError::Json {
        path: path.display().to_string(),
        source,
    })?;
    Ok(value
        .get(DISABLED_KEY)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default())
}

fn write_disabled(app_dir: &Path, disabled: &[String]) -> Result<(), CommandError> {
    let path = page_config_path(app_dir);
    let mut value = match fs::read_to_string(&path) {
        Ok(content) => serde_json::from_str(&content).map_err(|source| CommandError::Json {
            path: path.display().to_string(),
            source,
        })?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => json!({}),
        Err(err) => return Err(err.into()),
    };
    value[DISABLED_KEY] = json!(disabled);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, serde_json::to_string_pretty(&value)?.as_bytes())?;
    Ok(())
}

impl From<serde_json::Error> for CommandError {
    fn from(source: serde_json::Error) -> Self {
        CommandError::Json {
            path: String::new(),
            source,
        }
    }
}
