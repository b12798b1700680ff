//! Data structures and codecs
//!
//! - `core`: Shared utilities (compression, memory maps, atomic writes)
//! - `index`: Index file format
//! - `objects`: Object types (blob, tree, commit) and identifiers
//! - `status`: Change detection for tracked files

pub mod core;
pub mod index;
pub mod objects;
pub mod status;
