//! Directory resolution for the application bundle and user data.
//!
//! # Responsibilities
//! - Resolve the app bundle, user settings and workspaces directories
//! - Apply a fixed precedence: explicit override → environment → default
//! - Canonicalize results without requiring the directory to exist
//!
//! # Design Decisions
//! - Existence is never validated here; a missing directory surfaces at
//!   request time in the handler that serves it
//! - Environment variables are read only inside `resolve`, as one source
//!   in the precedence chain, never as ambient process state

use std::env;
use std::path::{Component, Path, PathBuf};

use directories::ProjectDirs;

/// The directory kinds this crate resolves at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Built front-end bundle (static assets, schemas, themes).
    AppBundle,
    /// User-level settings overrides.
    UserSettings,
    /// Persisted workspace layouts.
    Workspaces,
}

impl PathKind {
    /// Environment variable consulted for this kind.
    pub fn env_key(self) -> &'static str {
        match self {
            PathKind::AppBundle => "VITRINA_APP_DIR",
            PathKind::UserSettings => "VITRINA_SETTINGS_DIR",
            PathKind::Workspaces => "VITRINA_WORKSPACES_DIR",
        }
    }

    /// Default subpath under the config base for this kind.
    fn default_subpath(self) -> &'static str {
        match self {
            PathKind::AppBundle => "app",
            PathKind::UserSettings => "user-settings",
            PathKind::Workspaces => "workspaces",
        }
    }
}

/// Platform config base used when no override or environment value is set.
///
/// Falls back to the current directory when the platform provides no home.
pub fn default_config_base() -> PathBuf {
    ProjectDirs::from("", "", "vitrina")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Which precedence level produced a resolved path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    Explicit,
    Environment,
    Default,
}

impl std::fmt::Display for PathSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSource::Explicit => write!(f, "explicit"),
            PathSource::Environment => write!(f, "environment"),
            PathSource::Default => write!(f, "default"),
        }
    }
}

/// Resolve a directory of the given kind.
///
/// Precedence, highest first: non-empty `explicit` override, the kind's
/// environment variable, then `base_config_path` joined with the kind's
/// fixed subpath.
pub fn resolve(kind: PathKind, explicit: Option<&str>, base_config_path: &Path) -> PathBuf {
    resolve_with_source(kind, explicit, base_config_path).0
}

/// Like [`resolve`], also reporting which source won.
pub fn resolve_with_source(
    kind: PathKind,
    explicit: Option<&str>,
    base_config_path: &Path,
) -> (PathBuf, PathSource) {
    if let Some(value) = explicit {
        if !value.is_empty() {
            return (canonicalize_soft(Path::new(value)), PathSource::Explicit);
        }
    }
    if let Ok(value) = env::var(kind.env_key()) {
        if !value.is_empty() {
            return (canonicalize_soft(Path::new(&value)), PathSource::Environment);
        }
    }
    (default_path(kind, base_config_path), PathSource::Default)
}

/// The default location for a kind, ignoring overrides and environment.
pub fn default_path(kind: PathKind, base_config_path: &Path) -> PathBuf {
    canonicalize_soft(&base_config_path.join(kind.default_subpath()))
}

/// Canonicalize when the path exists; otherwise collapse `.` and `..`
/// segments lexically and return the path as-is.
pub fn canonicalize_soft(path: &Path) -> PathBuf {
    match path.canonicalize() {
        Ok(real) => real,
        Err(_) => normalize_lexically(path),
    }
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Keep leading `..` on relative paths; pop otherwise.
                if !out.pop() {
                    out.push(Component::ParentDir.as_os_str());
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
