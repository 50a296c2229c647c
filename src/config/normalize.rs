//! Normalization rules for configuration fields.
//!
//! # Responsibilities
//! - Directory fields: forward slashes only, regardless of platform
//! - URL fields: leave absolute URLs untouched; canonicalize local paths
//!   to exactly one leading slash and no trailing slash
//!
//! # Design Decisions
//! - Both normalizations are idempotent; the record can be re-normalized
//!   at any point without drift

use url::Url;

/// True when `value` is an absolute URL with a scheme and host.
///
/// Scheme-only strings (`file:settings`) and bare paths are not URLs for
/// routing purposes.
pub fn is_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(parsed) => parsed.has_host(),
        Err(_) => false,
    }
}

/// Normalize a directory field: platform separators become `/`.
///
/// Empty stays empty; an empty directory field disables its route.
pub fn normalize_dir(value: &str) -> String {
    value.replace(std::path::MAIN_SEPARATOR, "/")
}

/// Normalize a URL field.
///
/// Absolute URLs are returned verbatim. Local paths get exactly one
/// leading slash and lose any trailing slash; `/` itself is preserved.
pub fn normalize_url(value: &str) -> String {
    if value.is_empty() || is_url(value) {
        return value.to_string();
    }
    let mut out = format!("/{}", value.trim_start_matches('/'));
    while out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}
