//! Building the application configuration from the host record.
//!
//! # Responsibilities
//! - Choose the main page URL (pinned document → served at `/`)
//! - Resolve the bundle, settings and workspaces directories
//! - Derive the bundle subdirectories and the public URLs
//! - Apply the static/theme URL override precedence
//!
//! # Design Decisions
//! - Pure with respect to the host record: reads it, never mutates it
//! - Directory existence is not checked; an empty field is the only way
//!   to disable a route

use std::path::Path;

use crate::config::schema::{
    AppConfig, HostConfig, APP_NAME, APP_NAMESPACE, DEFAULT_APP_URL, DEFAULT_STATIC_URL,
};
use crate::paths::{self, PathKind};
use crate::routing::url_path_join;

/// Build the configuration record for the given host.
pub fn build(host: &HostConfig) -> AppConfig {
    let config_base = paths::default_config_base();

    let app_dir = paths::resolve(PathKind::AppBundle, host.app_dir.as_deref(), &config_base);
    let user_settings_dir = paths::resolve(
        PathKind::UserSettings,
        host.user_settings_dir.as_deref(),
        &config_base,
    );
    let workspaces_dir = paths::resolve(
        PathKind::Workspaces,
        host.workspaces_dir.as_deref(),
        &config_base,
    );

    let app_url = if host.single_document_mode() {
        "/".to_string()
    } else {
        DEFAULT_APP_URL.to_string()
    };

    let mut config = AppConfig {
        app_name: APP_NAME.to_string(),
        app_namespace: APP_NAMESPACE.to_string(),
        tree_url: url_path_join(&[&app_url, "tree"]),
        settings_url: url_path_join(&[&app_url, "api", "settings"]),
        themes_url: url_path_join(&[&app_url, "themes"]),
        workspaces_url: url_path_join(&[&app_url, "workspaces"]),
        workspaces_api_url: url_path_join(&[&app_url, "api", "workspaces"]),
        app_url,
        static_url: DEFAULT_STATIC_URL.to_string(),
        app_settings_dir: join_dir(&app_dir, "settings"),
        schemas_dir: join_dir(&app_dir, "schemas"),
        static_dir: join_dir(&app_dir, "static"),
        templates_dir: join_dir(&app_dir, "static"),
        themes_dir: join_dir(&app_dir, "themes"),
        app_dir: app_dir.to_string_lossy().into_owned(),
        user_settings_dir: user_settings_dir.to_string_lossy().into_owned(),
        workspaces_dir: workspaces_dir.to_string_lossy().into_owned(),
        document_path: host.file_to_run.clone().unwrap_or_default(),
        cache_files: host.cache_files,
    };

    // An external asset URL replaces the locally served directory; the
    // emptied directory field disables the local route downstream.
    if let Some(static_url) = nonempty(host.override_static_url.as_deref()) {
        config.static_url = static_url.to_string();
        config.static_dir = String::new();
    }
    if let Some(theme_url) = nonempty(host.override_theme_url.as_deref()) {
        config.themes_url = theme_url.to_string();
        config.themes_dir = String::new();
    }

    config.normalize();
    config
}

fn join_dir(base: &Path, sub: &str) -> String {
    base.join(sub).to_string_lossy().into_owned()
}

fn nonempty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_with_dirs() -> HostConfig {
        HostConfig {
            app_dir: Some("/opt/vitrina/app".to_string()),
            user_settings_dir: Some("/data/user-settings".to_string()),
            workspaces_dir: Some("/data/workspaces".to_string()),
            ..HostConfig::default()
        }
    }

    #[test]
    fn derives_bundle_subdirectories() {
        let config = build(&host_with_dirs());
        assert_eq!(config.app_dir, "/opt/vitrina/app");
        assert_eq!(config.schemas_dir, "/opt/vitrina/app/schemas");
        assert_eq!(config.static_dir, "/opt/vitrina/app/static");
        assert_eq!(config.themes_dir, "/opt/vitrina/app/themes");
        assert_eq!(config.app_settings_dir, "/opt/vitrina/app/settings");
        assert_eq!(config.app_url, "/vitrina");
        assert_eq!(config.settings_url, "/vitrina/api/settings");
        assert!(config.cache_files);
    }

    #[test]
    fn static_override_disables_local_static_dir() {
        let mut host = host_with_dirs();
        host.override_static_url = Some("https://cdn.example.com/assets".to_string());
        let config = build(&host);
        assert_eq!(config.static_url, "https://cdn.example.com/assets");
        assert_eq!(config.static_dir, "");
    }

    #[test]
    fn theme_override_disables_local_themes_dir() {
        let mut host = host_with_dirs();
        host.override_theme_url = Some("https://cdn.example.com/themes".to_string());
        let config = build(&host);
        assert_eq!(config.themes_url, "https://cdn.example.com/themes");
        assert_eq!(config.themes_dir, "");
        // The static side is unaffected.
        assert_eq!(config.static_dir, "/opt/vitrina/app/static");
    }

    #[test]
    fn empty_override_is_ignored() {
        let mut host = host_with_dirs();
        host.override_static_url = Some(String::new());
        let config = build(&host);
        assert_eq!(config.static_dir, "/opt/vitrina/app/static");
    }

    #[test]
    fn pinned_document_moves_app_to_root() {
        let mut host = host_with_dirs();
        host.file_to_run = Some("dashboard.ipynb".to_string());
        let config = build(&host);
        assert_eq!(config.app_url, "/");
        assert_eq!(config.settings_url, "/api/settings");
        assert_eq!(config.document_path, "dashboard.ipynb");
    }
}
