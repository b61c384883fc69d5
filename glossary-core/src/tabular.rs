use std::fs;
use std::path::Path;

use crate::models::{GlossaryError, Term, TermStore};

/// Column order of the canonical export
pub const EXPORT_HEADERS: [&str; 6] = [
    "term",
    "translation",
    "category",
    "context",
    "notes",
    "created_at",
];

/// Spreadsheet-shaped data: a header row and data rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Maps the glossary's logical fields onto the actual column headers of an
/// imported table. Header names are matched case-insensitively.
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    pub term: String,
    pub translation: String,
    pub category: Option<String>,
    pub context: Option<String>,
    pub notes: Option<String>,
}

impl ColumnMapping {
    /// Mapping for files that already use the canonical header names
    pub fn canonical() -> Self {
        Self {
            term: "Term".to_string(),
            translation: "Translation".to_string(),
            category: Some("Category".to_string()),
            context: Some("Context".to_string()),
            notes: Some("Notes".to_string()),
        }
    }
}

/// Outcome of an import batch
#[derive(Debug, Default)]
pub struct ImportReport {
    pub imported: usize,
    /// One `GlossaryError::ImportRow` per skipped row
    pub failures: Vec<GlossaryError>,
}

fn column_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

fn require_column(headers: &[String], name: &str) -> Result<usize, GlossaryError> {
    column_index(headers, name).ok_or_else(|| GlossaryError::MissingColumn {
        column: name.to_string(),
    })
}

/// Builds a term from each mapped row and adds it to the store. Rows that
/// fail validation are skipped and reported per row. A required mapped
/// column missing from the header row fails the whole import; an optional
/// one falls back to empty values.
pub fn import_rows(
    store: &mut TermStore,
    table: &TabularData,
    mapping: &ColumnMapping,
) -> Result<ImportReport, GlossaryError> {
    let term_idx = require_column(&table.headers, &mapping.term)?;
    let translation_idx = require_column(&table.headers, &mapping.translation)?;
    let category_idx = mapping
        .category
        .as_deref()
        .and_then(|name| column_index(&table.headers, name));
    let context_idx = mapping
        .context
        .as_deref()
        .and_then(|name| column_index(&table.headers, name));
    let notes_idx = mapping
        .notes
        .as_deref()
        .and_then(|name| column_index(&table.headers, name));

    let mut report = ImportReport::default();
    for (i, row) in table.rows.iter().enumerate() {
        let cell = |idx: Option<usize>| {
            idx.and_then(|idx| row.get(idx))
                .cloned()
                .unwrap_or_default()
        };

        let mut term = Term::new(cell(Some(term_idx)), cell(Some(translation_idx)));
        term.category = cell(category_idx);
        term.context = cell(context_idx);
        term.notes = cell(notes_idx);

        match store.add(term) {
            Ok(()) => report.imported += 1,
            Err(e) => report.failures.push(GlossaryError::ImportRow {
                row: i + 1,
                reason: e.to_string(),
            }),
        }
    }

    Ok(report)
}

/// Lays the store out as rows under the canonical header, one row per term
/// in store order
pub fn export_rows(store: &TermStore) -> TabularData {
    TabularData {
        headers: EXPORT_HEADERS.iter().map(|h| h.to_string()).collect(),
        rows: store
            .terms()
            .iter()
            .map(|t| {
                vec![
                    t.term.clone(),
                    t.translation.clone(),
                    t.category.clone(),
                    t.context.clone(),
                    t.notes.clone(),
                    t.created_at.clone(),
                ]
            })
            .collect(),
    }
}

/// Extracts the (term, translation) cell pairs the mapping points at,
/// without touching a store. Feed these to `consistency_issues` to vet a
/// batch before it collapses into keyed entries.
pub fn term_translation_pairs(
    table: &TabularData,
    mapping: &ColumnMapping,
) -> Result<Vec<(String, String)>, GlossaryError> {
    let term_idx = require_column(&table.headers, &mapping.term)?;
    let translation_idx = require_column(&table.headers, &mapping.translation)?;

    Ok(table
        .rows
        .iter()
        .map(|row| {
            (
                row.get(term_idx).cloned().unwrap_or_default(),
                row.get(translation_idx).cloned().unwrap_or_default(),
            )
        })
        .collect())
}

/// Reads a CSV file into headers plus data rows. Handles quoted fields
/// (embedded commas, newlines, doubled quotes) and strips a leading UTF-8
/// BOM. Short rows are padded to the header width.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<TabularData, GlossaryError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| GlossaryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let mut records = parse_csv(content);
    if records.is_empty() {
        return Ok(TabularData::default());
    }

    let headers = records.remove(0);
    for row in &mut records {
        while row.len() < headers.len() {
            row.push(String::new());
        }
    }

    Ok(TabularData {
        headers,
        rows: records,
    })
}

/// Writes the table as CSV. A UTF-8 BOM is emitted first so spreadsheet
/// tools detect the encoding.
pub fn write_csv<P: AsRef<Path>>(path: P, table: &TabularData) -> Result<(), GlossaryError> {
    let path = path.as_ref();

    let mut out = String::from("\u{feff}");
    out.push_str(&join_row(&table.headers));
    out.push('\n');
    for row in &table.rows {
        out.push_str(&join_row(row));
        out.push('\n');
    }

    fs::write(path, out).map_err(|source| GlossaryError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn join_row(row: &[String]) -> String {
    row.iter()
        .map(|cell| csv_escape(cell))
        .collect::<Vec<_>>()
        .join(",")
}

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn parse_csv(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => row.push(std::mem::take(&mut field)),
                '\r' => {}
                '\n' => {
                    row.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut row));
                }
                _ => field.push(c),
            }
        }
    }

    // final record without a trailing newline
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        records.push(row);
    }

    records.retain(|r| !(r.len() == 1 && r[0].is_empty()));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn table(headers: &[&str], rows: &[&[&str]]) -> TabularData {
        TabularData {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn import_skips_rows_missing_required_values() {
        let table = table(
            &["Term", "Translation", "Category"],
            &[
                &["hello", "你好", "greeting"],
                &["world", "世界", ""],
                &["goodbye", "", "greeting"],
                &["cache", "缓存", "computing"],
            ],
        );

        let mut store = TermStore::new();
        let report = import_rows(&mut store, &table, &ColumnMapping::canonical()).unwrap();

        assert_eq!(report.imported, 3);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].to_string().contains("row 3"));
        assert_eq!(store.len(), 3);
        assert!(store.get("goodbye").is_none());
        assert_eq!(store.get("cache").unwrap().category, "computing");
    }

    #[test]
    fn import_requires_the_mapped_columns_to_exist() {
        let table = table(&["Term", "Meaning"], &[&["hello", "你好"]]);

        let mut store = TermStore::new();
        let err = import_rows(&mut store, &table, &ColumnMapping::canonical()).unwrap_err();

        assert!(matches!(err, GlossaryError::MissingColumn { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn header_match_is_case_insensitive() {
        let table = table(&["term", "TRANSLATION"], &[&["hello", "你好"]]);

        let mut store = TermStore::new();
        let report = import_rows(&mut store, &table, &ColumnMapping::canonical()).unwrap();

        assert_eq!(report.imported, 1);
        assert_eq!(store.get("hello").unwrap().translation, "你好");
    }

    #[test]
    fn optional_columns_default_to_empty() {
        let table = table(&["Term", "Translation"], &[&["hello", "你好"]]);

        let mut store = TermStore::new();
        import_rows(&mut store, &table, &ColumnMapping::canonical()).unwrap();

        let term = store.get("hello").unwrap();
        assert_eq!(term.category, "");
        assert_eq!(term.context, "");
        assert_eq!(term.notes, "");
    }

    #[test]
    fn export_rows_uses_the_canonical_header() {
        let mut store = TermStore::new();
        store.add(Term::new("hello", "你好")).unwrap();
        store.add(Term::new("world", "世界")).unwrap();

        let exported = export_rows(&store);
        assert_eq!(exported.headers, EXPORT_HEADERS);
        assert_eq!(exported.rows.len(), 2);
        assert_eq!(exported.rows[0][0], "hello");
        assert_eq!(exported.rows[1][1], "世界");
    }

    #[test]
    fn term_translation_pairs_follow_the_mapping() {
        let table = table(
            &["Source", "Target"],
            &[&["hello", "你好"], &["hello", "您好"]],
        );
        let mapping = ColumnMapping {
            term: "Source".to_string(),
            translation: "Target".to_string(),
            category: None,
            context: None,
            notes: None,
        };

        let pairs = term_translation_pairs(&table, &mapping).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("hello".to_string(), "你好".to_string()),
                ("hello".to_string(), "您好".to_string()),
            ]
        );
    }

    #[test]
    fn csv_round_trip_preserves_quoting() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.csv");

        let original = table(
            &["Term", "Translation", "Notes"],
            &[
                &["hello, world", "你好", "has, commas"],
                &["quote", "引用", "she said \"hi\""],
                &["multi", "多行", "line one\nline two"],
            ],
        );

        write_csv(&path, &original).unwrap();
        let read_back = read_csv(&path).unwrap();

        assert_eq!(read_back, original);
    }

    #[test]
    fn read_csv_strips_a_leading_bom() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("import.csv");
        fs::write(&path, "\u{feff}Term,Translation\nhello,你好\n").unwrap();

        let table = read_csv(&path).unwrap();
        assert_eq!(table.headers[0], "Term");
        assert_eq!(table.rows, vec![vec!["hello", "你好"]]);
    }

    #[test]
    fn short_rows_are_padded_to_the_header_width() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("import.csv");
        fs::write(&path, "Term,Translation,Notes\nhello,你好\n").unwrap();

        let table = read_csv(&path).unwrap();
        assert_eq!(table.rows, vec![vec!["hello", "你好", ""]]);
    }

    #[test]
    fn crlf_input_parses_cleanly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("import.csv");
        fs::write(&path, "Term,Translation\r\nhello,你好\r\n").unwrap();

        let table = read_csv(&path).unwrap();
        assert_eq!(table.headers, vec!["Term", "Translation"]);
        assert_eq!(table.rows, vec![vec!["hello", "你好"]]);
    }
}
