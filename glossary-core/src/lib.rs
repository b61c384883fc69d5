pub mod analytics;
pub mod glossary;
pub mod models;
pub mod project;
pub mod storage;
pub mod tabular;

// Re-export commonly used types
pub use analytics::{consistency_issues, duplicate_translations, statistics, GlossaryStats};
pub use glossary::Glossary;
pub use models::{GlossaryError, Term, TermStore};
pub use project::determine_glossary_path;
pub use storage::{LoadOutcome, Storage};
pub use tabular::{
    export_rows, import_rows, read_csv, term_translation_pairs, write_csv, ColumnMapping,
    ImportReport, TabularData, EXPORT_HEADERS,
};
