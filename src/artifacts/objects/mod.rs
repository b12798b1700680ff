//! Object types and framing
//!
//! All content is stored as objects identified by the SHA-1 digest of their
//! compressed form. There are three types:
//!
//! - **Blob**: file content (raw bytes)
//! - **Tree**: flat listing of index entries (mode, path, object ID)
//! - **Commit**: tree snapshot with parents, identities and a message
//!
//! Every object is framed as `<type> <size>\0<payload>` before compression.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in bytes
pub const OBJECT_ID_SIZE: usize = 20;
