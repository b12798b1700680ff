//! Index file format
//!
//! The index (staging area) stores information about the working tree. It
//! tracks which files are known, with the metadata needed to notice changes
//! and the digest of their content.
//!
//! ## File Format (Version 1)
//!
//! ```text
//! Header (32 bytes):
//!   - Signature: 0x53494D50 (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Entry count (4 bytes)
//!   - SHA-1 of the 12 bytes above followed by every entry (20 bytes)
//!
//! Entries (variable length, ascending byte-wise path order):
//!   - 62 bytes of metadata and digest
//!   - Path bytes, length given by the last metadata field
//! ```
//!
//! All integers are big-endian.

pub mod checksum;
pub mod entry_mode;
pub mod index_entry;
pub mod index_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of the checksummed part of the header (signature, version, count)
pub const HEADER_PREFIX_SIZE: usize = 12;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = HEADER_PREFIX_SIZE + CHECKSUM_SIZE;

/// Magic signature identifying index files ("SIMP")
pub const SIGNATURE: u32 = 0x53494D50;

/// Index file format version
pub const VERSION: u32 = 1;
