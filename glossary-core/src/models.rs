use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by glossary operations
#[derive(Error, Debug)]
pub enum GlossaryError {
    /// A required field was blank after trimming
    #[error("{field} must not be blank")]
    Validation { field: &'static str },

    /// Reading or writing a file failed
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The glossary file held something other than a term map
    #[error("cannot parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A mapped column was absent from an imported table
    #[error("column '{column}' not found in the header row")]
    MissingColumn { column: String },

    /// A tabular row could not be converted into a term
    #[error("row {row}: {reason}")]
    ImportRow { row: usize, reason: String },
}

/// One glossary entry. The source text doubles as the store key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Term {
    /// Source-language text
    pub term: String,

    /// Target-language text
    pub translation: String,

    /// Grouping label, may be empty
    #[serde(default)]
    pub category: String,

    /// Example usage or where the term appears
    #[serde(default)]
    pub context: String,

    /// Free-form annotation
    #[serde(default)]
    pub notes: String,

    /// Local creation time, "YYYY-MM-DD HH:MM:SS"
    #[serde(default)]
    pub created_at: String,
}

impl Term {
    /// Creates a term stamped with the current local time
    pub fn new(term: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            translation: translation.into(),
            category: String::new(),
            context: String::new(),
            notes: String::new(),
            created_at: now_stamp(),
        }
    }

    /// Checks the non-blank invariant on the two required fields
    pub fn validate(&self) -> Result<(), GlossaryError> {
        if self.term.trim().is_empty() {
            return Err(GlossaryError::Validation { field: "term" });
        }
        if self.translation.trim().is_empty() {
            return Err(GlossaryError::Validation { field: "translation" });
        }
        Ok(())
    }
}

/// Current local time in the glossary's timestamp format
pub fn now_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// In-memory collection of terms, keyed by source text and kept in
/// insertion order
#[derive(Debug, Clone, Default)]
pub struct TermStore {
    terms: Vec<Term>,
}

impl TermStore {
    /// Creates an empty term store
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Validates and inserts a term. A term whose source text is already
    /// present overwrites the existing entry in place.
    pub fn add(&mut self, term: Term) -> Result<(), GlossaryError> {
        term.validate()?;
        self.insert_unchecked(term);
        Ok(())
    }

    /// Inserts without validation; used when hydrating from disk, where
    /// records predating validation must survive the reload.
    pub(crate) fn insert_unchecked(&mut self, term: Term) {
        match self.terms.iter_mut().find(|t| t.term == term.term) {
            Some(existing) => *existing = term,
            None => self.terms.push(term),
        }
    }

    /// Removes a term by source text, returning false when it was absent
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.terms.len();
        self.terms.retain(|t| t.term != key);
        self.terms.len() != before
    }

    /// Gets a term by source text
    pub fn get(&self, key: &str) -> Option<&Term> {
        self.terms.iter().find(|t| t.term == key)
    }

    /// All terms in insertion order
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Case-insensitive substring match against source text or translation.
    /// A blank filter matches everything.
    pub fn search(&self, filter: &str) -> Vec<&Term> {
        let needle = filter.to_lowercase();
        self.terms
            .iter()
            .filter(|t| {
                needle.is_empty()
                    || t.term.to_lowercase().contains(&needle)
                    || t.translation.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_get_returns_the_record() {
        let mut store = TermStore::new();
        store.add(Term::new("hello", "你好")).unwrap();

        let term = store.get("hello").expect("term should be present");
        assert_eq!(term.term, "hello");
        assert_eq!(term.translation, "你好");
    }

    #[test]
    fn add_overwrites_in_place() {
        let mut store = TermStore::new();
        store.add(Term::new("hello", "你好")).unwrap();
        store.add(Term::new("world", "世界")).unwrap();
        store.add(Term::new("hello", "您好")).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("hello").unwrap().translation, "您好");
        // the overwritten entry keeps its original position
        assert_eq!(store.terms()[0].term, "hello");
    }

    #[test]
    fn blank_term_is_rejected_without_mutation() {
        let mut store = TermStore::new();
        let err = store.add(Term::new("   ", "你好")).unwrap_err();
        assert!(matches!(err, GlossaryError::Validation { field: "term" }));
        assert!(store.is_empty());
    }

    #[test]
    fn blank_translation_is_rejected_without_mutation() {
        let mut store = TermStore::new();
        let err = store.add(Term::new("hello", " \t")).unwrap_err();
        assert!(matches!(
            err,
            GlossaryError::Validation {
                field: "translation"
            }
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn remove_absent_key_returns_false() {
        let mut store = TermStore::new();
        store.add(Term::new("hello", "你好")).unwrap();

        assert!(!store.remove("world"));
        assert_eq!(store.len(), 1);

        assert!(store.remove("hello"));
        assert!(store.is_empty());
    }

    #[test]
    fn search_matches_term_and_translation_case_insensitively() {
        let mut store = TermStore::new();
        store.add(Term::new("Hello", "你好")).unwrap();
        store.add(Term::new("world", "世界")).unwrap();

        let hits = store.search("ell");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].term, "Hello");

        let hits = store.search("世界");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].term, "world");

        assert_eq!(store.search("").len(), 2);
    }

    #[test]
    fn new_terms_are_stamped_with_a_creation_time() {
        let term = Term::new("hello", "你好");
        // "YYYY-MM-DD HH:MM:SS"
        assert_eq!(term.created_at.len(), 19);
    }
}
