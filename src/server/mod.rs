//! HTTP server setup.
//!
//! # Responsibilities
//! - Mount the assembled route table on an axum `Router`
//! - Wire up middleware (tracing, request IDs)
//! - Run the server with graceful ctrl-c shutdown
//!
//! # Design Decisions
//! - Entries are mounted in table order; every pattern is disjoint, so
//!   the router's matching agrees with the table's first-match contract
//! - File routes are mounted as nested services so the file server owns
//!   path resolution and content types

pub mod request_id;

use std::io;
use std::sync::Arc;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, HostConfig};
use crate::extension;
use crate::handlers::{files, page, settings, workspaces};
use crate::routing::{HandlerSpec, RouteTable};
use crate::server::request_id::UuidRequestId;

/// The application server: configuration plus a mounted router.
pub struct AppServer {
    router: Router,
    config: Arc<AppConfig>,
}

impl AppServer {
    /// Build the server for the given host record.
    pub fn new(host: &HostConfig) -> Self {
        let (config, table) = extension::load(host);
        let config = Arc::new(config);

        let router = mount(&table, config.clone(), &host.base_url)
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId));

        Self { router, config }
    }

    /// The built configuration record.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The mounted router; also usable for embedding in a larger app.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until ctrl-c.
    pub async fn run(self, listener: TcpListener) -> io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, app_url = %self.config.app_url, "server started");
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}

/// Mount every table entry, in order, on a fresh router.
pub fn mount(table: &RouteTable, config: Arc<AppConfig>, base_url: &str) -> Router {
    let page_ctx = page::PageContext {
        config,
        base_url: base_url.to_string(),
    };

    let mut router = Router::new();
    for entry in table.iter() {
        router = match &entry.handler {
            HandlerSpec::Page => router.route(
                &entry.pattern,
                get(page::shell).with_state(page_ctx.clone()),
            ),
            HandlerSpec::Redirect { target, permanent } => {
                let status = if *permanent {
                    StatusCode::MOVED_PERMANENTLY
                } else {
                    StatusCode::FOUND
                };
                let Ok(location) = HeaderValue::from_str(target) else {
                    tracing::error!(redirect_target = %target, "redirect target is not a valid header value");
                    continue;
                };
                router.route(
                    &entry.pattern,
                    get(move || async move {
                        (status, [(header::LOCATION, location)]).into_response()
                    }),
                )
            }
            HandlerSpec::StaticFiles {
                dir,
                no_cache_paths,
            } => router.nest_service(mount_prefix(&entry.pattern), files::service(dir, no_cache_paths)),
            HandlerSpec::SettingsList(spec) => {
                let list = get(settings::list).with_state(spec.clone());
                router
                    .route(&entry.pattern, list.clone())
                    .route(&slashed(&entry.pattern), list)
            }
            HandlerSpec::SettingsItem(spec) => router.route(
                &entry.pattern,
                get(settings::get_item)
                    .put(settings::put_item)
                    .with_state(spec.clone()),
            ),
            HandlerSpec::WorkspacesList(spec) => {
                let list = get(workspaces::list).with_state(spec.clone());
                router
                    .route(&entry.pattern, list.clone())
                    .route(&slashed(&entry.pattern), list)
            }
            HandlerSpec::WorkspacesItem(spec) => router.route(
                &entry.pattern,
                get(workspaces::get_item)
                    .put(workspaces::put_item)
                    .delete(workspaces::delete_item)
                    .with_state(spec.clone()),
            ),
            HandlerSpec::Themes {
                dir,
                no_cache_paths,
                ..
            } => router.nest_service(mount_prefix(&entry.pattern), files::service(dir, no_cache_paths)),
        };
    }
    router
}

/// A file route's nest prefix is its pattern minus the wildcard suffix.
fn mount_prefix(pattern: &str) -> &str {
    pattern.strip_suffix("/{*path}").unwrap_or(pattern)
}

/// Collection URLs accept an optional trailing slash. The router matches
/// paths exactly and a `{*name}` wildcard never matches an empty suffix,
/// so the slash form needs its own registration.
fn slashed(pattern: &str) -> String {
    format!("{}/", pattern.trim_end_matches('/'))
}
