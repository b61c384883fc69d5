use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(author, version, about = "A bilingual terminology glossary manager")]
pub struct Cli {
    /// Path to the glossary JSON file
    #[clap(long)]
    pub file: Option<String>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new term (interactive when no field flags are given)
    Add {
        /// Source-language text
        #[clap(long)]
        term: Option<String>,

        /// Target-language text
        #[clap(long)]
        translation: Option<String>,

        /// Category label
        #[clap(long)]
        category: Option<String>,

        /// Example usage or where the term appears
        #[clap(long)]
        context: Option<String>,

        /// Free-form notes
        #[clap(long)]
        notes: Option<String>,

        /// Force the interactive prompts
        #[clap(long)]
        interactive: bool,
    },

    /// List terms, optionally filtered
    List {
        /// Case-insensitive substring matched against source text and
        /// translation
        filter: Option<String>,
    },

    /// Show every field of one term
    Show {
        /// Source text of the term
        term: String,
    },

    /// Edit a term field by field
    Edit {
        /// Source text of the term
        term: String,
    },

    /// Delete a term
    Del {
        /// Source text of the term
        term: String,

        /// Skip the confirmation prompt
        #[clap(long)]
        yes: bool,
    },

    /// Import terms from a CSV file
    Import {
        /// Path to the CSV file
        file: String,

        #[clap(flatten)]
        mapping: MappingArgs,
    },

    /// Export the glossary to a CSV file
    Export {
        /// Path to write
        file: String,
    },

    /// Show glossary statistics
    Stats,

    /// Report terms sharing the same translation
    Dups,

    /// Validate a CSV file before importing it
    Check {
        /// Path to the CSV file
        file: String,

        #[clap(flatten)]
        mapping: MappingArgs,
    },
}

/// Column-header overrides for import and check
#[derive(Args, Debug)]
pub struct MappingArgs {
    /// Header of the source-text column
    #[clap(long = "term-col")]
    pub term_col: Option<String>,

    /// Header of the translation column
    #[clap(long = "translation-col")]
    pub translation_col: Option<String>,

    /// Header of the category column
    #[clap(long = "category-col")]
    pub category_col: Option<String>,

    /// Header of the context column
    #[clap(long = "context-col")]
    pub context_col: Option<String>,

    /// Header of the notes column
    #[clap(long = "notes-col")]
    pub notes_col: Option<String>,
}
