use crate::artifacts::index::index_entry::EntryMetadata;
use crate::errors::{Error, IoResultExt, Result};
use bytes::Bytes;
use derive_new::new;
use std::io::{ErrorKind, Read};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// The working tree: files are named relative to its root
#[derive(Debug, new)]
pub struct Workspace {
    path: Box<Path>,
    /// Directories never listed (the repository directory)
    #[new(default)]
    ignored: Vec<PathBuf>,
}

impl Workspace {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Skip `path` when listing files
    pub fn ignore(mut self, path: &Path) -> Self {
        self.ignored.push(self.path.join(path));
        self
    }

    /// Name of a path relative to the working tree root
    ///
    /// `.` components are dropped; absolute paths must lie under the root
    /// and paths may not climb out of it.
    pub fn relative_path(&self, path: &Path) -> Result<PathBuf> {
        let path = if path.is_absolute() {
            path.strip_prefix(&self.path).map_err(|_| {
                Error::InvalidArgument(format!(
                    "{} is outside of the working tree {}",
                    path.display(),
                    self.path.display()
                ))
            })?
        } else {
            path
        };

        let mut relative = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::Normal(name) => relative.push(name),
                _ => {
                    return Err(Error::InvalidArgument(format!(
                        "{} is outside of the working tree",
                        path.display()
                    )));
                }
            }
        }

        Ok(relative)
    }

    /// Read a file's content and metadata through a single open handle
    pub fn open_file(&self, file_path: &Path) -> Result<(Bytes, EntryMetadata)> {
        let full_path = self.path.join(file_path);

        let mut file = std::fs::File::open(&full_path).with_path(&full_path)?;
        let metadata = file.metadata().with_path(&full_path)?;
        if !metadata.is_file() {
            return Err(Error::InvalidArgument(format!(
                "{} is not a regular file",
                file_path.display()
            )));
        }

        let mut content = Vec::with_capacity(metadata.len() as usize);
        file.read_to_end(&mut content).with_path(&full_path)?;

        Ok((Bytes::from(content), EntryMetadata::from(&metadata)))
    }

    /// Current metadata of a file, `None` when it does not exist
    pub fn stat_file(&self, file_path: &Path) -> Result<Option<EntryMetadata>> {
        let full_path = self.path.join(file_path);

        match std::fs::metadata(&full_path) {
            Ok(metadata) => Ok(Some(EntryMetadata::from(&metadata))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_path(full_path),
        }
    }

    /// Files under `root_file_path`, relative to the working tree root
    ///
    /// A file path lists itself; directories are walked recursively in name
    /// order, skipping ignored directories.
    pub fn list_files(&self, root_file_path: &Path) -> Result<Vec<PathBuf>> {
        let relative = self.relative_path(root_file_path)?;
        let start = self.path.join(&relative);

        let metadata = std::fs::metadata(&start).with_path(&start)?;
        if !metadata.is_dir() {
            return Ok(vec![relative]);
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&start)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_ignored(entry.path()));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| start.clone());
                Error::Io {
                    path,
                    source: e.into(),
                }
            })?;

            if entry.file_type().is_file()
                && let Ok(name) = entry.path().strip_prefix(&self.path)
            {
                files.push(name.to_path_buf());
            }
        }

        Ok(files)
    }

    fn is_ignored(&self, path: &Path) -> bool {
        self.ignored.iter().any(|ignored| ignored == path)
    }
}
