use anyhow::Result;
use inquire::{Select, Text};

use glossary_core::{ColumnMapping, Term};

use crate::cli::MappingArgs;

/// Prompts for every field of a new term
pub fn prompt_new_term() -> Result<Term> {
    let term = Text::new("Term:").prompt()?;
    let translation = Text::new("Translation:").prompt()?;

    let mut entry = Term::new(term, translation);
    entry.category = Text::new("Category:").prompt()?;
    entry.context = Text::new("Context:").prompt()?;
    entry.notes = Text::new("Notes:").prompt()?;

    Ok(entry)
}

/// Field-by-field edit; empty input keeps the current value
pub fn prompt_edit_term(current: &Term) -> Result<Term> {
    let mut edited = current.clone();

    let term = Text::new(&format!("Term [{}]:", current.term)).prompt()?;
    if !term.is_empty() {
        edited.term = term;
    }

    let translation = Text::new(&format!("Translation [{}]:", current.translation)).prompt()?;
    if !translation.is_empty() {
        edited.translation = translation;
    }

    let category = Text::new(&format!("Category [{}]:", current.category)).prompt()?;
    if !category.is_empty() {
        edited.category = category;
    }

    let context = Text::new(&format!("Context [{}]:", current.context)).prompt()?;
    if !context.is_empty() {
        edited.context = context;
    }

    let notes = Text::new(&format!("Notes [{}]:", current.notes)).prompt()?;
    if !notes.is_empty() {
        edited.notes = notes;
    }

    Ok(edited)
}

/// Resolves which header feeds each glossary field. Command-line flags
/// win; otherwise a canonical header name is matched case-insensitively;
/// required fields fall back to an interactive pick from the file's
/// headers.
pub fn resolve_mapping(headers: &[String], args: &MappingArgs) -> Result<ColumnMapping> {
    Ok(ColumnMapping {
        term: required_column(headers, &args.term_col, "Term")?,
        translation: required_column(headers, &args.translation_col, "Translation")?,
        category: optional_column(headers, &args.category_col, "Category"),
        context: optional_column(headers, &args.context_col, "Context"),
        notes: optional_column(headers, &args.notes_col, "Notes"),
    })
}

fn find_header(headers: &[String], name: &str) -> Option<String> {
    headers.iter().find(|h| h.eq_ignore_ascii_case(name)).cloned()
}

fn required_column(headers: &[String], flag: &Option<String>, canonical: &str) -> Result<String> {
    if let Some(column) = flag {
        return Ok(column.clone());
    }
    if let Some(column) = find_header(headers, canonical) {
        return Ok(column);
    }

    let prompt = format!("Which column holds the {}?", canonical.to_lowercase());
    let picked = Select::new(&prompt, headers.to_vec()).prompt()?;
    Ok(picked)
}

fn optional_column(headers: &[String], flag: &Option<String>, canonical: &str) -> Option<String> {
    flag.clone().or_else(|| find_header(headers, canonical))
}
