#![allow(dead_code)]

pub mod command;
pub mod file;

/// Path of a stored object relative to the repository directory
pub fn object_path(object_id: &str) -> std::path::PathBuf {
    std::path::Path::new(".gt")
        .join("objects")
        .join(&object_id[..2])
        .join(&object_id[2..])
}

