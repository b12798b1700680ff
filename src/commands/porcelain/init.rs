use crate::areas::repository::Repository;
use anyhow::Context;
use std::fs;

impl Repository {
    /// Create the repository directory and its object store
    ///
    /// Running it again on an existing repository changes nothing.
    pub fn init(&self) -> anyhow::Result<()> {
        let objects_path = self.database().objects_path();
        fs::create_dir_all(objects_path).with_context(|| {
            format!("Failed to create {} directory", objects_path.display())
        })?;

        let directory = self
            .config()
            .directory()
            .canonicalize()
            .context("Failed to resolve the repository directory")?;

        writeln!(
            self.writer(),
            "Initialized empty gt repository in {}",
            directory.display()
        )?;

        Ok(())
    }
}
