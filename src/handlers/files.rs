//! Scoped static file serving for bundle assets and themes.
//!
//! # Design Decisions
//! - Delegates path resolution, traversal rejection and content types to
//!   `tower_http::services::ServeDir`
//! - Cache policy is all-or-nothing: the assembler marks `/` no-cache when
//!   `cache_files` is off, otherwise everything is cacheable

use axum::http::header::{self, HeaderValue};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeader;

/// Cache-Control applied when file caching is enabled.
const CACHE_ONE_WEEK: &str = "public, max-age=604800";
/// Cache-Control applied when file caching is disabled.
const NO_CACHE: &str = "no-cache";

/// Build the file-serving service for one scoped directory.
pub fn service(dir: &str, no_cache_paths: &[String]) -> SetResponseHeader<ServeDir, HeaderValue> {
    SetResponseHeader::overriding(
        ServeDir::new(dir),
        header::CACHE_CONTROL,
        cache_header(no_cache_paths),
    )
}

fn cache_header(no_cache_paths: &[String]) -> HeaderValue {
    if no_cache_paths.iter().any(|path| path == "/") {
        HeaderValue::from_static(NO_CACHE)
    } else {
        HeaderValue::from_static(CACHE_ONE_WEEK)
    }
}
