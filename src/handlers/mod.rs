//! Request handlers for the assembled routes.
//!
//! # Data Flow
//! ```text
//! RouteTable entry
//!     → server mounts the matching handler with its HandlerSpec config
//!     → handler reads the immutable AppConfig / spec, touches the
//!       filesystem read-mostly, and maps failures to HTTP statuses
//! ```
//!
//! # Design Decisions
//! - Handlers own all filesystem error reporting; startup never checks
//!   that a configured directory exists
//! - Every handler works from the `HandlerSpec` config it was registered
//!   with, never from global state

pub mod error;
pub mod files;
pub mod page;
pub mod settings;
pub mod workspaces;

pub use error::HandlerError;
