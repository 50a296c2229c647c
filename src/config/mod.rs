//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! host config (TOML / CLI / embedding code)
//!     → loader.rs (parse & semantic validation)
//!     → builder.rs (path resolution, URL derivation, overrides)
//!     → normalize.rs (dir + URL canonicalization)
//!     → AppConfig (immutable record)
//!     → read-only by the route assembler and every handler
//! ```
//!
//! # Design Decisions
//! - The record is built once per process start and never mutated after
//!   normalization; a restart is the only reload mechanism
//! - An empty directory field means the corresponding feature is disabled
//!   and its routes are never registered

pub mod builder;
pub mod loader;
pub mod normalize;
pub mod schema;

pub use loader::{load_host_config, ConfigError};
pub use schema::{AppConfig, HostConfig};
