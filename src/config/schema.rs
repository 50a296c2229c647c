//! Configuration record definitions.
//!
//! Two records live here: [`HostConfig`], the optional-fields input the
//! embedding host populates (from a TOML file, CLI flags, or code), and
//! [`AppConfig`], the flat record of URLs and directories built from it
//! once per process start and treated as immutable afterwards.

use serde::{Deserialize, Serialize};

use crate::config::normalize::{normalize_dir, normalize_url};

/// Application display name.
pub const APP_NAME: &str = "Vitrina";
/// Namespace used for URLs, env defaults and the page config.
pub const APP_NAMESPACE: &str = "vitrina";
/// Main page URL when not pinned to a single document.
pub const DEFAULT_APP_URL: &str = "/vitrina";
/// Default URL for locally served static assets.
pub const DEFAULT_STATIC_URL: &str = "/static/vitrina";
/// Workspace slug acknowledged but never persisted in single-document mode.
pub const SINGLE_WORKSPACE_NAME: &str = "vitrina-single-workspace";

/// Input record populated by the embedding host.
///
/// Every field is optional; unset fields fall back to the path resolver or
/// to the fixed defaults in the builder. This replaces attribute probing on
/// a host object with a typed contract.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HostConfig {
    /// Address the server binds to (e.g. "127.0.0.1:8866").
    pub bind_address: String,

    /// URL prefix every route is mounted under.
    pub base_url: String,

    /// Built front-end bundle directory.
    pub app_dir: Option<String>,

    /// User-level settings overrides directory.
    pub user_settings_dir: Option<String>,

    /// Persisted workspaces directory.
    pub workspaces_dir: Option<String>,

    /// Serve static assets from this URL instead of a local directory.
    pub override_static_url: Option<String>,

    /// Serve themes from this URL instead of a local directory.
    pub override_theme_url: Option<String>,

    /// Pin the app to one document (single-document mode).
    pub file_to_run: Option<String>,

    /// Server root directory reported to the front end.
    pub root_dir: Option<String>,

    /// Cache served files; disable for front-end development.
    pub cache_files: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8866".to_string(),
            base_url: "/".to_string(),
            app_dir: None,
            user_settings_dir: None,
            workspaces_dir: None,
            override_static_url: None,
            override_theme_url: None,
            file_to_run: None,
            root_dir: None,
            cache_files: true,
        }
    }
}

impl HostConfig {
    /// True when the app is pinned to one fixed document.
    pub fn single_document_mode(&self) -> bool {
        self.file_to_run.as_deref().is_some_and(|f| !f.is_empty())
    }
}

/// The built configuration record.
///
/// Directory fields (`*_dir`) are absolute paths with forward slashes; an
/// empty directory field disables the corresponding route. URL fields
/// (`*_url`) are either absolute external URLs or canonical local paths.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AppConfig {
    pub app_name: String,
    pub app_namespace: String,

    pub app_url: String,
    pub tree_url: String,
    pub static_url: String,
    pub settings_url: String,
    pub themes_url: String,
    pub workspaces_url: String,
    pub workspaces_api_url: String,

    pub app_dir: String,
    pub app_settings_dir: String,
    pub schemas_dir: String,
    pub static_dir: String,
    pub templates_dir: String,
    pub themes_dir: String,
    pub user_settings_dir: String,
    pub workspaces_dir: String,

    /// Document path in single-document mode, empty otherwise.
    pub document_path: String,

    pub cache_files: bool,
}

impl AppConfig {
    fn dir_fields_mut(&mut self) -> [&mut String; 8] {
        [
            &mut self.app_dir,
            &mut self.app_settings_dir,
            &mut self.schemas_dir,
            &mut self.static_dir,
            &mut self.templates_dir,
            &mut self.themes_dir,
            &mut self.user_settings_dir,
            &mut self.workspaces_dir,
        ]
    }

    fn url_fields_mut(&mut self) -> [&mut String; 7] {
        [
            &mut self.app_url,
            &mut self.tree_url,
            &mut self.static_url,
            &mut self.settings_url,
            &mut self.themes_url,
            &mut self.workspaces_url,
            &mut self.workspaces_api_url,
        ]
    }

    /// Normalize every directory and URL field in place.
    ///
    /// Idempotent; called once by the builder but safe to repeat.
    pub fn normalize(&mut self) {
        for field in self.dir_fields_mut() {
            *field = normalize_dir(field);
        }
        for field in self.url_fields_mut() {
            if field.is_empty() {
                continue;
            }
            *field = normalize_url(field);
        }
    }
}
