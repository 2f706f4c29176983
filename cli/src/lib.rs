//! Terminal front end for the products and users API.
//!
//! # Overview
//! The binary (`crud`) is the app shell: it loads configuration, picks the
//! products or users view, and renders cards. All list and form state lives
//! in `crud-core`'s controllers; this crate only supplies the ureq
//! transport, prompts and output.

pub mod commands;
pub mod config;
pub mod output;
pub mod transport;

pub use commands::Context;
pub use config::{ApiConfig, AppConfig};
pub use output::{OutputFormat, View};
pub use transport::UreqTransport;
