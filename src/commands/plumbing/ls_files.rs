use crate::areas::repository::Repository;

impl Repository {
    pub fn ls_files(&self) -> anyhow::Result<()> {
        let index = self.open_index()?;

        let mut writer = self.writer();
        for entry in index.entries() {
            writeln!(
                writer,
                "{} {} {}",
                entry.metadata.mode,
                entry.oid,
                entry.name.display()
            )?;
        }

        Ok(())
    }
}
