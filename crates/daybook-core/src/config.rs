use std::path::{Path, PathBuf};

use crate::constants::{DATA_DIR_NAME, ENTRIES_FILE, LOG_FILE, TODOS_FILE};

#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
}

impl CoreConfig {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn entries_path(&self) -> PathBuf {
        self.data_dir.join(ENTRIES_FILE)
    }

    pub fn todos_path(&self) -> PathBuf {
        self.data_dir.join(TODOS_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

impl Default for CoreConfig {
    /// `~/.daybook`, or `./.daybook` when no home directory can be resolved.
    fn default() -> Self {
        let base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(DATA_DIR_NAME))
    }
}
