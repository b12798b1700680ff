//! Command implementations
//!
//! Commands are `impl Repository` blocks, organized into two categories:
//!
//! - `plumbing`: Low-level commands working on objects and the index directly
//! - `porcelain`: User-facing commands built on the plumbing
//!
//! Commands report through `anyhow` and write their output to the
//! repository's writer.

pub mod plumbing;
pub mod porcelain;
