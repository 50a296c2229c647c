//! The ordered route table.
//!
//! `RouteTable::assemble` is the one piece of original wiring in this
//! crate: it walks the configuration record and emits an ordered list of
//! (pattern, handler spec) entries, skipping every feature whose directory
//! field is empty. The server mounts entries in emission order; routes
//! later in the list are only reachable because the earlier, more general
//! entries use distinct patterns.

use serde::Serialize;

use crate::config::AppConfig;
use crate::routing::url_path_join;

/// Handler configuration for the settings routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsSpec {
    pub app_settings_dir: String,
    pub schemas_dir: String,
    pub user_settings_dir: String,
}

/// Handler configuration for the workspaces API routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspacesSpec {
    pub workspaces_url: String,
    pub dir: String,
}

/// What serves a route, with the configuration that handler needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HandlerSpec {
    /// The application shell page.
    Page,
    /// Redirect to the main page. Always temporary (302): the target is
    /// runtime-configurable and must not be cached across restarts.
    Redirect { target: String, permanent: bool },
    /// Files from a scoped directory.
    StaticFiles {
        dir: String,
        no_cache_paths: Vec<String>,
    },
    /// Settings collection listing.
    SettingsList(SettingsSpec),
    /// One settings bundle by schema id.
    SettingsItem(SettingsSpec),
    /// Workspaces collection listing.
    WorkspacesList(WorkspacesSpec),
    /// One workspace by slug (GET/PUT/DELETE).
    WorkspacesItem(WorkspacesSpec),
    /// Theme assets from a scoped directory.
    Themes {
        themes_url: String,
        dir: String,
        no_cache_paths: Vec<String>,
    },
}

/// One (pattern, handler) pair. Patterns use the router's syntax, with
/// `{*name}` capturing any path suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub pattern: String,
    pub handler: HandlerSpec,
}

/// Ordered list of routes; order is part of the contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Assemble the route table for `config` under `base_url`.
    pub fn assemble(config: &AppConfig, base_url: &str) -> Self {
        let single_document = !config.document_path.is_empty();
        let app_path = url_path_join(&[base_url, &config.app_url]);

        let mut entries = Vec::new();

        // The main page always comes first.
        entries.push(RouteEntry {
            pattern: app_path.clone(),
            handler: HandlerSpec::Page,
        });

        if config.app_url != "/" {
            entries.push(RouteEntry {
                pattern: url_path_join(&[base_url]),
                handler: HandlerSpec::Redirect {
                    target: app_path.clone(),
                    permanent: false,
                },
            });
        }

        // Cache all or none of the files depending on `cache_files`.
        let no_cache_paths: Vec<String> = if config.cache_files {
            Vec::new()
        } else {
            vec!["/".to_string()]
        };

        if !single_document {
            entries.push(RouteEntry {
                pattern: url_path_join(&[&app_path, "single", "{*path}"]),
                handler: HandlerSpec::Page,
            });
        }

        if !config.static_dir.is_empty() {
            entries.push(RouteEntry {
                pattern: url_path_join(&[base_url, &config.static_url, "{*path}"]),
                handler: HandlerSpec::StaticFiles {
                    dir: config.static_dir.clone(),
                    no_cache_paths: no_cache_paths.clone(),
                },
            });
        }

        if !config.schemas_dir.is_empty() {
            let spec = SettingsSpec {
                app_settings_dir: config.app_settings_dir.clone(),
                schemas_dir: config.schemas_dir.clone(),
                user_settings_dir: config.user_settings_dir.clone(),
            };
            entries.push(RouteEntry {
                pattern: url_path_join(&[base_url, &config.settings_url]),
                handler: HandlerSpec::SettingsList(spec.clone()),
            });
            entries.push(RouteEntry {
                pattern: url_path_join(&[base_url, &config.settings_url, "{*schema_name}"]),
                handler: HandlerSpec::SettingsItem(spec),
            });
        }

        if !config.workspaces_dir.is_empty() {
            // Client URLs that carry a workspace slug render the shell.
            if !single_document {
                entries.push(RouteEntry {
                    pattern: url_path_join(&[base_url, &config.workspaces_url, "{*path}"]),
                    handler: HandlerSpec::Page,
                });
            }

            let spec = WorkspacesSpec {
                workspaces_url: config.workspaces_url.clone(),
                dir: config.workspaces_dir.clone(),
            };
            entries.push(RouteEntry {
                pattern: url_path_join(&[base_url, &config.workspaces_api_url]),
                handler: HandlerSpec::WorkspacesList(spec.clone()),
            });
            entries.push(RouteEntry {
                pattern: url_path_join(&[base_url, &config.workspaces_api_url, "{*space_name}"]),
                handler: HandlerSpec::WorkspacesItem(spec),
            });
        }

        if !config.themes_dir.is_empty() {
            let themes_url = url_path_join(&[base_url, &config.themes_url]);
            entries.push(RouteEntry {
                pattern: url_path_join(&[&themes_url, "{*path}"]),
                handler: HandlerSpec::Themes {
                    themes_url,
                    dir: config.themes_dir.clone(),
                    no_cache_paths,
                },
            });
        }

        Self { entries }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }
}

impl IntoIterator for RouteTable {
    type Item = RouteEntry;
    type IntoIter = std::vec::IntoIter<RouteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
