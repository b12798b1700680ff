//! Plumbing commands (low-level operations)
//!
//! Plumbing commands expose the object database and the index directly.
//! The porcelain commands are built from the same pieces.
//!
//! ## Commands
//!
//! - `hash-object`: Compute an object ID and optionally store the object
//! - `cat-file`: Print an object's type or payload
//! - `update-index`: Add files to the index
//! - `ls-files`: List index entries
//! - `write-tree`: Store the index as a tree
//! - `commit-tree`: Store a commit for a tree

pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
pub mod ls_files;
pub mod update_index;
pub mod write_tree;
