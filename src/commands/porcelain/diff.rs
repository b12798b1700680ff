use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::status::file_change::FileStatus;
use crate::artifacts::status::inspector::Inspector;
use anyhow::{Context, bail};
use bytes::Bytes;
use colored::Colorize;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// External program comparing the stored blob with the working tree file
const DIFF_PROGRAM: &str = "diff";

impl Repository {
    /// Show how tracked files differ from their indexed content
    ///
    /// Files whose metadata still matches the index are skipped without
    /// reading them.
    pub fn diff(&self) -> anyhow::Result<()> {
        let index = self.open_index()?;
        let inspector = Inspector::new(self.workspace());

        for entry in index.entries() {
            match inspector.classify_path(entry)? {
                FileStatus::Unchanged => {}
                FileStatus::Deleted => self.print_removal(entry)?,
                FileStatus::MetadataChanged(flags) => {
                    debug!(path = %entry.name.display(), %flags, "metadata changed");
                    self.print_content_diff(entry)?
                }
            }
        }

        Ok(())
    }

    fn load_blob(&self, entry: &IndexEntry) -> anyhow::Result<Bytes> {
        let (_, content) = self
            .database()
            .read(&entry.oid)
            .with_context(|| format!("Unable to read blob for {}", entry.name.display()))?;

        Ok(content)
    }

    /// Whole-file removal hunk for a file deleted from the working tree
    ///
    /// The hunk length counts newline bytes: an empty blob prints `-1,0`, and
    /// a final line without a newline is printed as is, with no marker.
    fn print_removal(&self, entry: &IndexEntry) -> anyhow::Result<()> {
        let content = self.load_blob(entry)?;
        let lines = content.iter().filter(|&&byte| byte == b'\n').count();

        let mut writer = self.writer();
        writeln!(writer, "{}", format!("--- {}", entry.name.display()).bold())?;
        writeln!(writer, "{}", "+++ /dev/null".bold())?;
        writeln!(writer, "{}", format!("@@ -1,{} +0,0 @@", lines).cyan())?;

        for line in content.split_inclusive(|&byte| byte == b'\n') {
            writer.write_all(b"-")?;
            writer.write_all(line)?;
        }

        Ok(())
    }

    /// Unified diff of the stored blob against the file on disk
    fn print_content_diff(&self, entry: &IndexEntry) -> anyhow::Result<()> {
        let content = self.load_blob(entry)?;

        let mut child = Command::new(DIFF_PROGRAM)
            .arg("-L")
            .arg(&entry.name)
            .arg("-Nu")
            .arg("-")
            .arg(&entry.name)
            .current_dir(self.workspace().path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("Unable to run {DIFF_PROGRAM}"))?;

        let mut stdin = child.stdin.take().context("diff stdin is not piped")?;
        let feeder = std::thread::spawn(move || stdin.write_all(&content));

        let output = child
            .wait_with_output()
            .with_context(|| format!("Unable to wait for {DIFF_PROGRAM}"))?;
        match feeder.join() {
            Ok(result) => result.context("Unable to send the stored blob to diff")?,
            Err(_) => bail!("diff input thread panicked"),
        }

        // 0: identical, 1: different, anything else is trouble
        match output.status.code() {
            Some(0) | Some(1) => {}
            _ => bail!("{DIFF_PROGRAM} failed for {}: {}", entry.name.display(), output.status),
        }

        self.writer().write_all(&output.stdout)?;

        Ok(())
    }
}
