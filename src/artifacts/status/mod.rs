//! Working tree change detection
//!
//! Compares what the filesystem reports for a tracked path against the
//! metadata captured in its index entry. No content is read or hashed.
//!
//! - `file_change`: change flags and per-file status
//! - `inspector`: the comparison itself

pub mod file_change;
pub mod inspector;
