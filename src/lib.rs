//! Vitrina: present a notebook-style document as a standalone app.
//!
//! # Architecture Overview
//!
//! ```text
//!   host config (TOML / CLI)
//!        │
//!        ▼
//!   ┌─────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐
//!   │  paths  │────▶│  config  │────▶│ routing  │────▶│  server  │
//!   │resolver │     │ builder  │     │ assembler│     │  (axum)  │
//!   └─────────┘     └──────────┘     └──────────┘     └────┬─────┘
//!                                                          │
//!            ┌──────────────┬──────────────┬───────────────┤
//!            ▼              ▼              ▼               ▼
//!       shell page     static/themes   settings API   workspaces API
//! ```
//!
//! Everything left of the server runs once, synchronously, at startup:
//! directories are resolved (explicit override → environment → default),
//! the configuration record is built and normalized, and the route table
//! is assembled in a fixed order with conditional entries for every
//! feature whose directory is configured. The record is immutable from
//! then on; handlers only read it.

pub mod commands;
pub mod config;
pub mod extension;
pub mod handlers;
pub mod paths;
pub mod routing;
pub mod server;

pub use config::{AppConfig, HostConfig};
pub use extension::load;
pub use routing::RouteTable;
pub use server::AppServer;
