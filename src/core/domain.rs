use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::core::repository::RepositoryStore;

pub const DEFAULT_STORE_FILE: &str = "library.json";

// Configuration abstracts config options for the catalog manager
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub store_path: PathBuf,
    pub store: RepositoryStore,
    pub log_level: String,
    pub json_logs: bool,
    // start from the built-in seed titles rather than an empty catalog
    pub seed: bool,
    pub load_on_start: bool,
}

impl Configuration {
    pub fn new(store_path: &Path) -> Self {
        Configuration {
            store_path: store_path.to_path_buf(),
            store: RepositoryStore::JsonFile,
            log_level: "warn".to_string(),
            json_logs: false,
            seed: true,
            load_on_start: false,
        }
    }

    pub fn in_memory() -> Self {
        Configuration {
            store: RepositoryStore::Memory,
            ..Configuration::default()
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new(Path::new(DEFAULT_STORE_FILE))
    }
}
