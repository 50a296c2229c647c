//! The application shell page.
//!
//! Serves `index.html` from the bundle's template directory with the
//! page-config JSON substituted into its placeholder. The same handler
//! backs the main route, the `single/` sub-route and the client-side
//! workspace URLs.

use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::http::Uri;
use axum::response::Html;
use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::handlers::HandlerError;
use crate::routing::url_path_join;

/// Placeholder the bundle's `index.html` must contain.
pub const PAGE_CONFIG_MARKER: &str = "{{page_config}}";

/// State shared by every shell route.
#[derive(Clone)]
pub struct PageContext {
    pub config: Arc<AppConfig>,
    pub base_url: String,
}

/// Render the shell.
pub async fn shell(
    State(ctx): State<PageContext>,
    uri: Uri,
) -> Result<Html<String>, HandlerError> {
    let template_path = Path::new(&ctx.config.templates_dir).join("index.html");
    let template = tokio::fs::read_to_string(&template_path)
        .await
        .map_err(|err| {
            HandlerError::Template(format!("{}: {err}", template_path.display()))
        })?;

    let workspace = workspace_slug(&ctx, uri.path());
    let page_config = serde_json::to_string(&page_config_json(
        &ctx.config,
        &ctx.base_url,
        workspace.as_deref(),
    ))?;

    Ok(Html(template.replace(PAGE_CONFIG_MARKER, &page_config)))
}

/// The JSON blob the front end boots from.
pub fn page_config_json(config: &AppConfig, base_url: &str, workspace: Option<&str>) -> Value {
    let mut fields = serde_json::Map::new();
    fields.insert("appName".to_string(), json!(config.app_name));
    fields.insert("appNamespace".to_string(), json!(config.app_namespace));
    fields.insert("appUrl".to_string(), json!(config.app_url));
    fields.insert("baseUrl".to_string(), json!(base_url));
    fields.insert("fullStaticUrl".to_string(), json!(config.static_url));
    fields.insert("settingsUrl".to_string(), json!(config.settings_url));
    fields.insert("themesUrl".to_string(), json!(config.themes_url));
    fields.insert("treeUrl".to_string(), json!(config.tree_url));
    fields.insert("workspacesUrl".to_string(), json!(config.workspaces_url));
    fields.insert(
        "workspacesApiUrl".to_string(),
        json!(config.workspaces_api_url),
    );
    fields.insert("cacheFiles".to_string(), json!(config.cache_files));
    if !config.document_path.is_empty() {
        fields.insert("notebookPath".to_string(), json!(config.document_path));
    }
    if let Some(workspace) = workspace {
        fields.insert("workspace".to_string(), json!(workspace));
    }
    Value::Object(fields)
}

/// Extract the workspace slug when the request came through a client-side
/// workspace URL.
fn workspace_slug(ctx: &PageContext, path: &str) -> Option<String> {
    let prefix = url_path_join(&[&ctx.base_url, &ctx.config.workspaces_url]);
    let rest = path.strip_prefix(&prefix)?.strip_prefix('/')?;
    let slug = rest.trim_end_matches('/');
    if slug.is_empty() {
        None
    } else {
        Some(slug.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::builder::build;
    use crate::config::HostConfig;

    fn context() -> PageContext {
        let host = HostConfig {
            app_dir: Some("/opt/vitrina/app".to_string()),
            user_settings_dir: Some("/data/user-settings".to_string()),
            workspaces_dir: Some("/data/workspaces".to_string()),
            ..HostConfig::default()
        };
        PageContext {
            config: Arc::new(build(&host)),
            base_url: "/".to_string(),
        }
    }

    #[test]
    fn page_config_carries_public_urls() {
        let ctx = context();
        let value = page_config_json(&ctx.config, &ctx.base_url, None);
        assert_eq!(value["appUrl"], "/vitrina");
        assert_eq!(value["settingsUrl"], "/vitrina/api/settings");
        assert_eq!(value["cacheFiles"], true);
        assert!(value.get("notebookPath").is_none());
        assert!(value.get("workspace").is_none());
    }

    #[test]
    fn pinned_document_appears_in_page_config() {
        let mut ctx = context();
        let mut config = (*ctx.config).clone();
        config.document_path = "report.ipynb".to_string();
        ctx.config = Arc::new(config);
        let value = page_config_json(&ctx.config, &ctx.base_url, None);
        assert_eq!(value["notebookPath"], "report.ipynb");
    }

    #[test]
    fn workspace_slug_comes_from_the_client_url() {
        let ctx = context();
        assert_eq!(
            workspace_slug(&ctx, "/vitrina/workspaces/analysis"),
            Some("analysis".to_string())
        );
        assert_eq!(workspace_slug(&ctx, "/vitrina/workspaces/"), None);
        assert_eq!(workspace_slug(&ctx, "/vitrina"), None);
    }
}
