//! Porcelain commands (user-facing operations)
//!
//! Porcelain commands compose the plumbing into everyday workflows.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Add files and directories to the index
//! - `commit`: Commit the index on top of HEAD
//! - `diff`: Show working tree changes against the index

pub mod add;
pub mod commit;
pub mod diff;
pub mod init;
