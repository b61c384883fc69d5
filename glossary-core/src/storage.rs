use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{now_stamp, GlossaryError, Term, TermStore};

/// Handles saving and loading the glossary file
pub struct Storage {
    file_path: PathBuf,
}

/// What `load` recovered from disk
#[derive(Debug)]
pub struct LoadOutcome {
    pub store: TermStore,
    /// Records that could not be reconstructed and were skipped
    pub skipped: usize,
}

impl Storage {
    /// Creates a new Storage instance
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// Returns the path to the glossary file
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Loads the glossary file. A missing file yields an empty store and
    /// no file is created. A record that cannot be reconstructed is
    /// skipped rather than aborting the whole load.
    pub fn load(&self) -> Result<LoadOutcome, GlossaryError> {
        if !self.file_path.exists() {
            return Ok(LoadOutcome {
                store: TermStore::new(),
                skipped: 0,
            });
        }

        let content = fs::read_to_string(&self.file_path).map_err(|e| self.io_error(e))?;

        let entries: serde_json::Map<String, Value> =
            serde_json::from_str(&content).map_err(|source| GlossaryError::Parse {
                path: self.file_path.clone(),
                source,
            })?;

        let mut store = TermStore::new();
        let mut skipped = 0;
        for (_key, value) in entries {
            match serde_json::from_value::<Term>(value) {
                Ok(mut term) if !term.term.trim().is_empty() => {
                    if term.created_at.is_empty() {
                        term.created_at = now_stamp();
                    }
                    store.insert_unchecked(term);
                }
                _ => skipped += 1,
            }
        }

        Ok(LoadOutcome { store, skipped })
    }

    /// Saves every term to the glossary file, keyed by source text. The
    /// content is written to a temporary file and renamed into place so an
    /// interrupted write cannot corrupt the previous state.
    pub fn save(&self, store: &TermStore) -> Result<(), GlossaryError> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let entries: BTreeMap<&str, &Term> = store
            .terms()
            .iter()
            .map(|t| (t.term.as_str(), t))
            .collect();
        let json =
            serde_json::to_string_pretty(&entries).map_err(|source| GlossaryError::Parse {
                path: self.file_path.clone(),
                source,
            })?;

        let tmp_path = self.file_path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp_path, &self.file_path).map_err(|e| self.io_error(e))?;

        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> GlossaryError {
        GlossaryError::Io {
            path: self.file_path.clone(),
            source,
        }
    }
}
