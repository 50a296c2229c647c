//! The settings API.
//!
//! Schemas live in the bundle (`schemas_dir`), one JSON document per
//! plugin, laid out as `<package path>/<plugin>.json` and addressed as
//! `<package path>:<plugin>`. User overrides live under
//! `user_settings_dir` with the same layout and are stored raw: the server
//! validates that they parse, nothing more.

use std::io;
use std::path::{Path as FsPath, PathBuf};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::handlers::HandlerError;
use crate::routing::table::SettingsSpec;

/// List every settings bundle: schema plus raw user overrides.
pub async fn list(State(spec): State<SettingsSpec>) -> Result<Json<Value>, HandlerError> {
    let root = PathBuf::from(&spec.schemas_dir);
    // A configured but not-yet-created schemas dir is an empty collection.
    let files = match collect_schema_files(&root).await {
        Ok(files) => files,
        Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(err) => return Err(err.into()),
    };
    let mut ids = Vec::new();
    for file in files {
        if let Ok(relative) = file.strip_prefix(&root) {
            if let Some(id) = schema_id(relative) {
                ids.push(id);
            }
        }
    }
    ids.sort();

    let mut settings = Vec::with_capacity(ids.len());
    for id in ids {
        settings.push(load_bundle(&spec, &id).await?);
    }
    Ok(Json(json!({ "settings": settings })))
}

/// Fetch one settings bundle by schema id.
pub async fn get_item(
    State(spec): State<SettingsSpec>,
    Path(schema_name): Path<String>,
) -> Result<Json<Value>, HandlerError> {
    validate_id(&schema_name)?;
    Ok(Json(load_bundle(&spec, &schema_name).await?))
}

/// Store raw user overrides for one schema id.
pub async fn put_item(
    State(spec): State<SettingsSpec>,
    Path(schema_name): Path<String>,
    body: String,
) -> Result<StatusCode, HandlerError> {
    validate_id(&schema_name)?;

    // The schema must exist; overrides for unknown plugins are rejected.
    let schema_path = schema_path(&spec, &schema_name);
    if !tokio::fs::try_exists(&schema_path).await? {
        return Err(HandlerError::NotFound(schema_name));
    }

    // Raw storage, but it has to parse.
    let _: Value = serde_json::from_str(&body)?;

    let target = overrides_path(&spec, &schema_name);
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&target, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn load_bundle(spec: &SettingsSpec, id: &str) -> Result<Value, HandlerError> {
    let schema_raw = tokio::fs::read_to_string(schema_path(spec, id))
        .await
        .map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => HandlerError::NotFound(id.to_string()),
            _ => HandlerError::Io(err),
        })?;
    let schema: Value = serde_json::from_str(&schema_raw)?;

    let raw = match tokio::fs::read_to_string(overrides_path(spec, id)).await {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => "{}".to_string(),
        Err(err) => return Err(err.into()),
    };
    let settings: Value = serde_json::from_str(&raw).unwrap_or_else(|_| json!({}));

    Ok(json!({
        "id": id,
        "schema": schema,
        "settings": settings,
        "raw": raw,
    }))
}

fn schema_path(spec: &SettingsSpec, id: &str) -> PathBuf {
    FsPath::new(&spec.schemas_dir).join(id_to_relative(id))
}

fn overrides_path(spec: &SettingsSpec, id: &str) -> PathBuf {
    FsPath::new(&spec.user_settings_dir).join(id_to_relative(id))
}

/// `<package path>:<plugin>` → `<package path>/<plugin>.json`.
fn id_to_relative(id: &str) -> String {
    match id.rfind(':') {
        Some(split) => format!("{}/{}.json", &id[..split], &id[split + 1..]),
        None => format!("{id}.json"),
    }
}

/// `<package path>/<plugin>.json` → `<package path>:<plugin>`.
fn schema_id(relative: &FsPath) -> Option<String> {
    let stem = relative.file_stem()?.to_str()?;
    let parent = relative.parent()?.to_str()?;
    if parent.is_empty() {
        Some(stem.to_string())
    } else {
        Some(format!("{}:{}", parent.replace('\\', "/"), stem))
    }
}

fn validate_id(id: &str) -> Result<(), HandlerError> {
    let valid = !id.is_empty()
        && !id.starts_with('/')
        && !id.contains('\\')
        && !id.split('/').any(|segment| segment == "..");
    if valid {
        Ok(())
    } else {
        Err(HandlerError::BadRequest(format!("invalid schema id {id:?}")))
    }
}

async fn collect_schema_files(root: &FsPath) -> io::Result<Vec<PathBuf>> {
    let mut stack = vec![root.to_path_buf()];
    let mut files = Vec::new();
    while let Some(dir) = stack.pop() {
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_dir() {
                stack.push(path);
            } else if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
    }
    Ok(files)
}
