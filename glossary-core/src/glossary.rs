use std::path::Path;

use crate::analytics::{self, GlossaryStats};
use crate::models::{GlossaryError, Term, TermStore};
use crate::storage::Storage;
use crate::tabular::{self, ColumnMapping, ImportReport, TabularData};

/// A glossary bound to its file on disk. Every successful mutation is
/// written through to the file immediately.
pub struct Glossary {
    store: TermStore,
    storage: Storage,
    skipped_on_load: usize,
}

impl Glossary {
    /// Opens the glossary file and hydrates the in-memory store. A missing
    /// file starts an empty glossary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GlossaryError> {
        let storage = Storage::new(path);
        let outcome = storage.load()?;
        Ok(Self {
            store: outcome.store,
            storage,
            skipped_on_load: outcome.skipped,
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        self.storage.path()
    }

    /// Records in the backing file that could not be read at open time
    pub fn skipped_on_load(&self) -> usize {
        self.skipped_on_load
    }

    /// Read access to the current snapshot
    pub fn store(&self) -> &TermStore {
        &self.store
    }

    /// Validates and inserts a term, then persists the store. The insert is
    /// kept even when persistence fails; the returned error tells the
    /// caller the on-disk copy is stale.
    pub fn add_term(&mut self, term: Term) -> Result<(), GlossaryError> {
        self.store.add(term)?;
        self.storage.save(&self.store)
    }

    /// Removes a term by source text and persists the deletion. An absent
    /// key returns false without touching the file.
    pub fn remove_term(&mut self, key: &str) -> Result<bool, GlossaryError> {
        if !self.store.remove(key) {
            return Ok(false);
        }
        self.storage.save(&self.store)?;
        Ok(true)
    }

    pub fn get_term(&self, key: &str) -> Option<&Term> {
        self.store.get(key)
    }

    /// Terms matching a case-insensitive substring filter against source
    /// text or translation; a blank filter lists everything
    pub fn list_terms(&self, filter: &str) -> Vec<&Term> {
        self.store.search(filter)
    }

    /// Applies every importable row to the store, then persists once
    pub fn import_rows(
        &mut self,
        table: &TabularData,
        mapping: &ColumnMapping,
    ) -> Result<ImportReport, GlossaryError> {
        let report = tabular::import_rows(&mut self.store, table, mapping)?;
        if report.imported > 0 {
            self.storage.save(&self.store)?;
        }
        Ok(report)
    }

    /// Current snapshot as tabular rows under the canonical header
    pub fn export_rows(&self) -> TabularData {
        tabular::export_rows(&self.store)
    }

    /// Writes the canonical export as CSV
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), GlossaryError> {
        tabular::write_csv(path, &self.export_rows())
    }

    pub fn statistics(&self) -> GlossaryStats {
        analytics::statistics(&self.store)
    }

    pub fn duplicate_translations(&self) -> Vec<(String, String)> {
        analytics::duplicate_translations(&self.store)
    }
}
