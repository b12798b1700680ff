use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::config::Config;
use crate::errors::Result;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// A working tree together with its repository directory
///
/// Commands write their output through `writer` so tests can capture it.
pub struct Repository {
    config: Config,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// `root` is the working tree; the repository directory is resolved
    /// against it when relative
    pub fn new(root: &Path, config: Config, writer: Box<dyn std::io::Write>) -> Self {
        let config = Config::new(root.join(config.directory()));

        let database = Database::new(config.objects_path().into_boxed_path());
        let workspace = Workspace::new(root.into()).ignore(config.directory());
        let refs = Refs::new(config.head_path().into_boxed_path());

        Repository {
            config,
            writer: RefCell::new(writer),
            database,
            workspace,
            refs,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Open the index session for this repository
    pub fn open_index(&self) -> Result<Index> {
        Index::open(self.config.index_path().into_boxed_path())
    }
}
