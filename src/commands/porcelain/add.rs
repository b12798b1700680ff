use crate::areas::repository::Repository;
use std::path::PathBuf;

impl Repository {
    /// Add files to the index, expanding directories recursively
    ///
    /// Paths that cannot be listed or stored are reported and skipped.
    pub fn add(&self, paths: &[PathBuf]) -> anyhow::Result<()> {
        self.database().ensure_initialized()?;
        let mut index = self.open_index()?;

        for path in paths {
            let files = match self.workspace().list_files(path) {
                Ok(files) => files,
                Err(e) => {
                    eprintln!("Unable to add '{}': {}", path.display(), e);
                    continue;
                }
            };

            for file in files {
                if let Err(e) = index.add_file(self.database(), self.workspace(), &file) {
                    eprintln!("Unable to add '{}': {}", file.display(), e);
                }
            }
        }

        index.close()?;

        Ok(())
    }
}
