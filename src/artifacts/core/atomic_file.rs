use crate::errors::{IoResultExt, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `bytes` in one rename
///
/// The temporary file lives next to the target so the rename never crosses
/// filesystems.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(directory).with_path(directory)?;
    temp_file.write_all(bytes).with_path(temp_file.path())?;
    temp_file
        .persist(path)
        .map_err(|e| e.error)
        .with_path(path)?;

    Ok(())
}
