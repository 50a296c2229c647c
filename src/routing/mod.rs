//! Route assembly.
//!
//! # Responsibilities
//! - Produce the ordered route table from the configuration record
//! - Join URL path segments without doubling or dropping slashes
//!
//! # Design Decisions
//! - The table is a pure value: assembly touches no filesystem and no
//!   router, so every conditional branch is unit-testable
//! - Emission order is part of the contract; the server mounts entries
//!   in exactly this order

pub mod table;

pub use table::{HandlerSpec, RouteEntry, RouteTable};

/// Join URL path segments into a single path.
///
/// A leading slash on the first piece and a trailing slash on the last are
/// preserved; empty pieces and interior duplicate slashes are dropped.
pub fn url_path_join(pieces: &[&str]) -> String {
    let absolute = pieces.first().is_some_and(|p| p.starts_with('/'));
    let trailing = pieces
        .iter()
        .rev()
        .find(|p| !p.is_empty())
        .is_some_and(|p| p.len() > 1 && p.ends_with('/'));

    let segments: Vec<&str> = pieces
        .iter()
        .flat_map(|piece| piece.split('/'))
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        return if absolute { "/".to_string() } else { String::new() };
    }

    let mut joined = String::new();
    if absolute {
        joined.push('/');
    }
    joined.push_str(&segments.join("/"));
    if trailing {
        joined.push('/');
    }
    joined
}
