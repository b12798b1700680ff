use crate::areas::repository::Repository;
use std::path::PathBuf;

impl Repository {
    /// Add each file to the index; files that fail are reported and skipped
    pub fn update_index(&self, files: &[PathBuf], verbose: bool) -> anyhow::Result<()> {
        let mut index = self.open_index()?;

        for file in files {
            match index.add_file(self.database(), self.workspace(), file) {
                Ok(object_id) if verbose => {
                    writeln!(self.writer(), "{} {}", object_id, file.display())?
                }
                Ok(_) => {}
                Err(e) => eprintln!("Unable to add '{}': {}", file.display(), e),
            }
        }

        index.close()?;

        Ok(())
    }
}
