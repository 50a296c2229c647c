//! The workspaces API.
//!
//! A workspace is one JSON document in `workspaces_dir`, named
//! `<slug>.json`, carrying `data` (the layout) and `metadata` (at least a
//! `name` matching the slug). The reserved single-document slug is
//! acknowledged with 204 and never persisted, so a pinned app can keep a
//! front end that saves layouts without growing state on disk.

use std::io;
use std::path::{Path as FsPath, PathBuf};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::config::schema::SINGLE_WORKSPACE_NAME;
use crate::handlers::HandlerError;
use crate::routing::table::WorkspacesSpec;

/// List all workspaces as parallel `ids` / `values` arrays.
pub async fn list(State(spec): State<WorkspacesSpec>) -> Result<Json<Value>, HandlerError> {
    let mut named: Vec<(String, Value)> = Vec::new();
    let mut entries = match tokio::fs::read_dir(&spec.dir).await {
        Ok(entries) => entries,
        // A configured but not-yet-created directory is an empty list.
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(Json(json!({ "workspaces": { "ids": [], "values": [] } })));
        }
        Err(err) => return Err(err.into()),
    };
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }
        let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let content = tokio::fs::read_to_string(&path).await?;
        match serde_json::from_str::<Value>(&content) {
            Ok(value) => named.push((slug.to_string(), value)),
            Err(err) => {
                tracing::warn!(workspace = slug, error = %err, "skipping unreadable workspace");
            }
        }
    }
    named.sort_by(|a, b| a.0.cmp(&b.0));

    let (ids, values): (Vec<String>, Vec<Value>) = named.into_iter().unzip();
    Ok(Json(json!({ "workspaces": { "ids": ids, "values": values } })))
}

/// Fetch one workspace by slug.
pub async fn get_item(
    State(spec): State<WorkspacesSpec>,
    Path(space_name): Path<String>,
) -> Result<Json<Value>, HandlerError> {
    let slug = validate_slug(&space_name)?;
    let content = tokio::fs::read_to_string(workspace_path(&spec, slug))
        .await
        .map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => HandlerError::NotFound(slug.to_string()),
            _ => HandlerError::Io(err),
        })?;
    Ok(Json(serde_json::from_str(&content)?))
}

/// Store one workspace by slug.
pub async fn put_item(
    State(spec): State<WorkspacesSpec>,
    Path(space_name): Path<String>,
    body: String,
) -> Result<StatusCode, HandlerError> {
    let slug = validate_slug(&space_name)?;

    // The single-document workspace is acknowledged, never persisted.
    if slug == SINGLE_WORKSPACE_NAME {
        return Ok(StatusCode::NO_CONTENT);
    }

    let workspace: Value = serde_json::from_str(&body)?;
    let metadata_name = workspace
        .get("metadata")
        .and_then(|m| m.get("name"))
        .and_then(Value::as_str)
        .ok_or_else(|| HandlerError::BadRequest("workspace is missing metadata.name".into()))?;
    if metadata_name != slug {
        return Err(HandlerError::BadRequest(format!(
            "metadata.name {metadata_name:?} does not match workspace {slug:?}"
        )));
    }
    if workspace.get("data").is_none() {
        return Err(HandlerError::BadRequest("workspace is missing data".into()));
    }

    tokio::fs::create_dir_all(&spec.dir).await?;
    tokio::fs::write(workspace_path(&spec, slug), body).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete one workspace by slug.
pub async fn delete_item(
    State(spec): State<WorkspacesSpec>,
    Path(space_name): Path<String>,
) -> Result<StatusCode, HandlerError> {
    let slug = validate_slug(&space_name)?;
    tokio::fs::remove_file(workspace_path(&spec, slug))
        .await
        .map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => HandlerError::NotFound(slug.to_string()),
            _ => HandlerError::Io(err),
        })?;
    Ok(StatusCode::NO_CONTENT)
}

fn workspace_path(spec: &WorkspacesSpec, slug: &str) -> PathBuf {
    FsPath::new(&spec.dir).join(format!("{slug}.json"))
}

/// Slugs are single path segments; anything else is a traversal attempt.
fn validate_slug(space_name: &str) -> Result<&str, HandlerError> {
    let slug = space_name.trim_end_matches('/');
    if slug.is_empty() || slug.contains('/') || slug.contains('\\') || slug == ".." {
        return Err(HandlerError::BadRequest(format!(
            "invalid workspace name {space_name:?}"
        )));
    }
    Ok(slug)
}
