//! Shared codecs and file access
//!
//! - `atomic_file`: whole-file replacement through a temporary file
//! - `compression`: zlib deflate/inflate used by the object database
//! - `mapped_file`: read-only memory maps for objects and the index

pub mod atomic_file;
pub mod compression;
pub mod mapped_file;
