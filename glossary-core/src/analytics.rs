//! Read-only reports over a glossary snapshot. Nothing here mutates the
//! store or touches the file system.

use std::collections::HashMap;

use crate::models::TermStore;

/// Summary counts over the current glossary snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryStats {
    pub total: usize,
    /// Terms with a non-empty translation
    pub translated: usize,
    /// Translated share formatted to one decimal place, "0%" when the
    /// glossary is empty
    pub progress: String,
    /// Term count per non-empty category
    pub categories: HashMap<String, usize>,
}

pub fn statistics(store: &TermStore) -> GlossaryStats {
    let total = store.len();
    let translated = store
        .terms()
        .iter()
        .filter(|t| !t.translation.is_empty())
        .count();
    let progress = if total == 0 {
        String::from("0%")
    } else {
        format!("{:.1}%", translated as f64 / total as f64 * 100.0)
    };

    let mut categories: HashMap<String, usize> = HashMap::new();
    for term in store.terms() {
        if !term.category.is_empty() {
            *categories.entry(term.category.clone()).or_insert(0) += 1;
        }
    }

    GlossaryStats {
        total,
        translated,
        progress,
        categories,
    }
}

/// Walks the store in insertion order pairing every repeated translation
/// with the first term that used it. A translation shared by N terms yields
/// N-1 pairs, all naming the first owner.
pub fn duplicate_translations(store: &TermStore) -> Vec<(String, String)> {
    let mut first_owner: HashMap<&str, &str> = HashMap::new();
    let mut pairs = Vec::new();

    for term in store.terms() {
        match first_owner.get(term.translation.as_str()) {
            Some(owner) => pairs.push((owner.to_string(), term.term.clone())),
            None => {
                first_owner.insert(term.translation.as_str(), term.term.as_str());
            }
        }
    }

    pairs
}

/// Reports source texts mapped to more than one translation across an
/// arbitrary sequence of (term, translation) pairs. The keyed store can
/// never hold such a pair, so this takes raw input - typically an import
/// batch before it collapses into keyed entries.
pub fn consistency_issues<I, S, T>(pairs: I) -> Vec<String>
where
    I: IntoIterator<Item = (S, T)>,
    S: AsRef<str>,
    T: AsRef<str>,
{
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut issues = Vec::new();

    for (term, translation) in pairs {
        let term = term.as_ref();
        let translation = translation.as_ref();
        match seen.get(term) {
            Some(first) if first != translation => issues.push(format!(
                "term '{}' has conflicting translations: '{}' vs '{}'",
                term, first, translation
            )),
            Some(_) => {}
            None => {
                seen.insert(term.to_string(), translation.to_string());
            }
        }
    }

    issues
}
