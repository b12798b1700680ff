//! Storage core of a minimal version-control tool
//!
//! - [`areas`]: the object database, the index, the working tree and HEAD
//! - [`artifacts`]: object and index formats, codecs, change detection
//! - [`commands`]: the command-line operations, as `impl Repository` blocks
//!
//! Library operations return [`Result`]; commands return `anyhow::Result`.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod errors;

pub use config::Config;
pub use errors::{Error, Result};
