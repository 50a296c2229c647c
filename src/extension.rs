//! The extension-loading entry point.
//!
//! # Responsibilities
//! - Seed the per-kind environment variables with defaults, never
//!   overriding an operator-supplied value
//! - Build the configuration record and assemble the route table
//!
//! # Design Decisions
//! - Runs once, synchronously, at startup; everything downstream treats
//!   the returned record as immutable
//! - No failure mode of its own: missing directories surface at request
//!   time in the handler that owns the route

use std::env;

use crate::config::{builder, AppConfig, HostConfig};
use crate::paths::{self, PathKind};
use crate::routing::RouteTable;

/// Build the configuration and route table for `host`.
///
/// The caller registers the returned table with the web server, preserving
/// its order.
pub fn load(host: &HostConfig) -> (AppConfig, RouteTable) {
    seed_default_env();

    let config = builder::build(host);
    tracing::debug!(
        app_url = %config.app_url,
        app_dir = %config.app_dir,
        single_document = !config.document_path.is_empty(),
        "configuration built"
    );

    let table = RouteTable::assemble(&config, &host.base_url);
    tracing::info!(routes = table.len(), "route table assembled");

    (config, table)
}

/// Set each directory environment variable to its default when unset.
///
/// Operator-supplied values are never overridden.
pub fn seed_default_env() {
    let base = paths::default_config_base();
    for kind in [
        PathKind::AppBundle,
        PathKind::UserSettings,
        PathKind::Workspaces,
    ] {
        if env::var_os(kind.env_key()).is_none() {
            env::set_var(kind.env_key(), paths::default_path(kind, &base));
        }
    }
}
