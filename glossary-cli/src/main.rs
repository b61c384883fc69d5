mod cli;
mod prompts;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::Path;

use glossary_core::{
    consistency_issues, determine_glossary_path, import_rows, read_csv, term_translation_pairs,
    Glossary, TabularData, Term, TermStore,
};

use crate::cli::{Cli, Command, MappingArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine which glossary file to use
    let glossary_path = determine_glossary_path(cli.file.as_deref())?;

    match &cli.command {
        Command::Add {
            term,
            translation,
            category,
            context,
            notes,
            interactive,
        } => {
            // Default to interactive mode if no field arguments are provided
            let should_be_interactive = *interactive
                || (term.is_none()
                    && translation.is_none()
                    && category.is_none()
                    && context.is_none()
                    && notes.is_none());

            if should_be_interactive {
                add_term_interactive(&glossary_path)?;
            } else {
                add_term_cli(&glossary_path, term, translation, category, context, notes)?;
            }
        }
        Command::List { filter } => {
            list_terms(&glossary_path, filter)?;
        }
        Command::Show { term } => {
            show_term(&glossary_path, term)?;
        }
        Command::Edit { term } => {
            edit_term(&glossary_path, term)?;
        }
        Command::Del { term, yes } => {
            delete_term(&glossary_path, term, *yes)?;
        }
        Command::Import { file, mapping } => {
            import_terms(&glossary_path, file, mapping)?;
        }
        Command::Export { file } => {
            export_terms(&glossary_path, file)?;
        }
        Command::Stats => {
            show_stats(&glossary_path)?;
        }
        Command::Dups => {
            show_duplicates(&glossary_path)?;
        }
        Command::Check { file, mapping } => {
            check_file(file, mapping)?;
        }
    }

    Ok(())
}

/// Opens the glossary, warning when records on disk had to be skipped
fn open_glossary(path: &Path) -> Result<Glossary> {
    let glossary = Glossary::open(path)
        .with_context(|| format!("Failed to open glossary at {}", path.display()))?;

    if glossary.skipped_on_load() > 0 {
        let warning = format!(
            "Warning: {} unreadable record(s) in the glossary file were skipped",
            glossary.skipped_on_load()
        );
        println!("{}", warning.yellow());
    }

    Ok(glossary)
}

fn add_term_interactive(path: &Path) -> Result<()> {
    let mut glossary = open_glossary(path)?;

    let entry = prompts::prompt_new_term()?;
    let key = entry.term.clone();
    glossary.add_term(entry)?;

    println!("{}", "Term added successfully!".green());
    println!("Term: {}", key.green());

    Ok(())
}

fn add_term_cli(
    path: &Path,
    term: &Option<String>,
    translation: &Option<String>,
    category: &Option<String>,
    context: &Option<String>,
    notes: &Option<String>,
) -> Result<()> {
    let mut glossary = open_glossary(path)?;

    let term_text = match term {
        Some(t) => t.clone(),
        None => anyhow::bail!("Term is required. Use --term to specify the source text."),
    };
    let translation_text = match translation {
        Some(t) => t.clone(),
        None => {
            anyhow::bail!("Translation is required. Use --translation to specify the target text.")
        }
    };

    let mut entry = Term::new(term_text, translation_text);
    if let Some(category) = category {
        entry.category = category.clone();
    }
    if let Some(context) = context {
        entry.context = context.clone();
    }
    if let Some(notes) = notes {
        entry.notes = notes.clone();
    }

    let key = entry.term.clone();
    glossary.add_term(entry)?;

    println!("{}", "Term added successfully!".green());
    println!("Term: {}", key.green());

    Ok(())
}

fn list_terms(path: &Path, filter: &Option<String>) -> Result<()> {
    let glossary = open_glossary(path)?;

    let filter = filter.as_deref().unwrap_or("");
    let terms = glossary.list_terms(filter);

    if terms.is_empty() {
        println!("{}", "No terms found.".yellow());
        return Ok(());
    }

    println!(
        "{:<24} | {:<24} | {:<12}",
        "Term", "Translation", "Category"
    );
    println!("{}", "-".repeat(66));

    for term in &terms {
        println!(
            "{:<24} | {:<24} | {:<12}",
            term.term, term.translation, term.category
        );
    }

    let stats = glossary.statistics();
    println!();
    println!(
        "Total: {} | Translated: {} | Progress: {}",
        stats.total, stats.translated, stats.progress
    );

    Ok(())
}

fn show_term(path: &Path, key: &str) -> Result<()> {
    let glossary = open_glossary(path)?;

    let term = glossary.get_term(key).context("Term not found")?;

    println!("{}: {}", "Term".blue(), term.term);
    println!("{}: {}", "Translation".blue(), term.translation);
    println!("{}: {}", "Category".blue(), term.category);
    println!("{}: {}", "Context".blue(), term.context);
    println!("{}: {}", "Notes".blue(), term.notes);
    println!("{}: {}", "Created".blue(), term.created_at);

    Ok(())
}

fn edit_term(path: &Path, key: &str) -> Result<()> {
    let mut glossary = open_glossary(path)?;

    let current = glossary.get_term(key).context("Term not found")?.clone();

    println!("Editing term: {}", current.term);
    println!("Leave a field empty to keep the current value");

    let edited = prompts::prompt_edit_term(&current)?;
    // reject blank edits before the old entry is removed
    edited.validate()?;

    // a renamed term re-keys the entry
    if edited.term != current.term {
        glossary.remove_term(&current.term)?;
    }
    glossary.add_term(edited)?;

    println!("{}", "Term updated successfully!".green());

    Ok(())
}

fn delete_term(path: &Path, key: &str, yes: bool) -> Result<()> {
    let mut glossary = open_glossary(path)?;

    if !yes {
        let confirmed = inquire::Confirm::new(&format!("Delete term '{}'?", key))
            .with_default(false)
            .prompt()?;
        if !confirmed {
            println!("{}", "Deletion cancelled.".yellow());
            return Ok(());
        }
    }

    if glossary.remove_term(key)? {
        println!("{}", "Term deleted successfully!".green());
    } else {
        println!("{}", format!("Term '{}' not found.", key).yellow());
    }

    Ok(())
}

fn import_terms(path: &Path, file: &str, args: &MappingArgs) -> Result<()> {
    let table = read_csv(file).with_context(|| format!("Failed to read {}", file))?;
    if table.headers.is_empty() {
        anyhow::bail!("{} has no header row", file);
    }

    let mapping = prompts::resolve_mapping(&table.headers, args)?;

    // Conflicting translations collapse silently once rows are keyed by
    // source text, so report them before importing.
    let pairs = term_translation_pairs(&table, &mapping)?;
    for issue in consistency_issues(pairs) {
        println!("{}", format!("Warning: {}", issue).yellow());
    }

    let mut glossary = open_glossary(path)?;
    let report = glossary.import_rows(&table, &mapping)?;

    println!("{}", format!("Imported {} term(s)", report.imported).green());
    for failure in &report.failures {
        println!("{}", format!("Skipped {}", failure).yellow());
    }

    Ok(())
}

fn export_terms(path: &Path, file: &str) -> Result<()> {
    let glossary = open_glossary(path)?;

    glossary
        .export_csv(file)
        .with_context(|| format!("Failed to write {}", file))?;

    let message = format!("Exported {} term(s) to {}", glossary.store().len(), file);
    println!("{}", message.green());

    Ok(())
}

fn show_stats(path: &Path) -> Result<()> {
    let glossary = open_glossary(path)?;
    let stats = glossary.statistics();

    println!("{}: {}", "Total terms".blue(), stats.total);
    println!("{}: {}", "Translated".blue(), stats.translated);
    println!("{}: {}", "Progress".blue(), stats.progress);

    if !stats.categories.is_empty() {
        println!();
        println!("{}", "Per category:".blue());
        let mut categories: Vec<_> = stats.categories.iter().collect();
        categories.sort();
        for (category, count) in categories {
            println!("  {}: {}", category, count);
        }
    }

    Ok(())
}

fn show_duplicates(path: &Path) -> Result<()> {
    let glossary = open_glossary(path)?;
    let pairs = glossary.duplicate_translations();

    if pairs.is_empty() {
        println!("{}", "No duplicate translations found.".green());
        return Ok(());
    }

    println!("Found duplicate translations:");
    for (first, second) in pairs {
        println!("- '{}' and '{}' share the same translation", first, second);
    }

    Ok(())
}

fn check_file(file: &str, args: &MappingArgs) -> Result<()> {
    let table: TabularData = read_csv(file).with_context(|| format!("Failed to read {}", file))?;
    if table.headers.is_empty() {
        anyhow::bail!("{} has no header row", file);
    }

    let mapping = prompts::resolve_mapping(&table.headers, args)?;

    // Dry-run the rows against a scratch store to count construction
    // failures without touching the glossary.
    let mut scratch = TermStore::new();
    let report = import_rows(&mut scratch, &table, &mapping)?;

    let pairs = term_translation_pairs(&table, &mapping)?;
    let issues = consistency_issues(pairs);

    if report.failures.is_empty() && issues.is_empty() {
        let message = format!("{} row(s) ready to import.", report.imported);
        println!("{}", message.green());
        return Ok(());
    }

    for failure in &report.failures {
        println!("{}", format!("Invalid {}", failure).red());
    }
    for issue in &issues {
        println!("{}", format!("Inconsistent: {}", issue).yellow());
    }
    println!(
        "{} row(s) importable, {} invalid, {} consistency issue(s)",
        report.imported,
        report.failures.len(),
        issues.len()
    );

    Ok(())
}
