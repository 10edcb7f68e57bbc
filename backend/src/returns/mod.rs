//! ECAD return-file processing.
//!
//! ECAD answers each submission with a table (CSV, TXT or a spreadsheet
//! export) listing one outcome per phonogram. This module turns that table
//! into a [`ReturnReport`]; applying it to stored records is left to the
//! caller.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ return file │────▶│   parser    │────▶│  ColumnMap   │────▶│ ReturnReport │
//! │ (csv / txt) │     │ (auto-enc)  │     │  (synonyms)  │     │  + unmatched │
//! └─────────────┘     └─────────────┘     └──────────────┘     └──────────────┘
//!                                                 │
//!                                         RecordLookup (ISRC → record)
//! ```
//!
//! Structural problems (unreadable table, missing identifier or status
//! column) abort the whole file. A row whose identifier is unknown is only
//! reported in [`ReturnReport::unmatched`].

pub mod columns;
pub mod status;

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::hash::BuildHasher;
use std::path::Path;

use crate::error::{ReturnFileError, ReturnResult};
use crate::logs::{log_info, log_success, log_warning};
use crate::parser::{parse_bytes_auto, parse_file_auto, Table};

pub use columns::{normalize_header, ColumnMap, ReturnField};
pub use status::{describe_error_code, map_status, ReturnStatus};

// =============================================================================
// Lookup
// =============================================================================

/// Finds the stored record an identifier refers to.
///
/// Identifiers are passed already normalised with [`normalize_identifier`].
pub trait RecordLookup {
    type Key: Clone;

    fn lookup(&self, identifier: &str) -> Option<Self::Key>;
}

impl<K: Clone, S: BuildHasher> RecordLookup for HashMap<String, K, S> {
    type Key = K;

    fn lookup(&self, identifier: &str) -> Option<K> {
        self.get(identifier).cloned()
    }
}

impl<S: BuildHasher> RecordLookup for HashSet<String, S> {
    type Key = String;

    fn lookup(&self, identifier: &str) -> Option<String> {
        self.get(identifier).cloned()
    }
}

/// Adapts a closure into a [`RecordLookup`].
pub struct LookupFn<F>(pub F);

impl<F, K> RecordLookup for LookupFn<F>
where
    F: Fn(&str) -> Option<K>,
    K: Clone,
{
    type Key = K;

    fn lookup(&self, identifier: &str) -> Option<K> {
        (self.0)(identifier)
    }
}

/// Trim, upper-case and drop hyphens: `br-abc-24-00001` becomes `BRABC2400001`.
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_uppercase().replace('-', "")
}

// =============================================================================
// Report
// =============================================================================

/// One matched row of a return file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnOutcome<K> {
    /// 1-based line in the file (the header is line 1).
    pub row: usize,
    pub key: K,
    pub identifier: String,
    pub status: ReturnStatus,
    /// Raw status text as sent by ECAD.
    pub raw_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// ECAD's message, or the description of `error_code` when it sent none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Code assigned by ECAD to an accepted record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_code: Option<String>,
}

/// A row whose identifier matched no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedRow {
    pub row: usize,
    pub identifier: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReturnSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub unmatched: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnReport<K> {
    pub outcomes: Vec<ReturnOutcome<K>>,
    pub unmatched: Vec<UnmatchedRow>,
    pub summary: ReturnSummary,
}

impl<K> ReturnReport<K> {
    /// Identifiers ECAD rejected, in file order, for resubmission.
    pub fn rejected_identifiers(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.status == ReturnStatus::Rejected)
            .map(|o| o.identifier.as_str())
            .collect()
    }

    /// Keys of the records ECAD rejected.
    pub fn rejected_keys(&self) -> Vec<&K> {
        self.outcomes
            .iter()
            .filter(|o| o.status == ReturnStatus::Rejected)
            .map(|o| &o.key)
            .collect()
    }
}

// =============================================================================
// Processing
// =============================================================================

/// Interpret a parsed return table.
///
/// # Example
/// ```
/// use std::collections::HashSet;
/// use ecad::parser::Table;
/// use ecad::returns::{process_return_table, ReturnStatus};
///
/// let table = Table::from_rows(["ISRC", "SITUACAO"], vec![vec!["BRABC2400001", "Aprovado"]]);
/// let known: HashSet<String> = ["BRABC2400001".to_string()].into_iter().collect();
///
/// let report = process_return_table(&table, &known).unwrap();
/// assert_eq!(report.outcomes[0].status, ReturnStatus::Accepted);
/// ```
pub fn process_return_table<L>(table: &Table, lookup: &L) -> ReturnResult<ReturnReport<L::Key>>
where
    L: RecordLookup + ?Sized,
{
    let columns = ColumnMap::resolve(&table.headers);
    let missing = columns.missing_required();
    if !missing.is_empty() {
        return Err(ReturnFileError::MissingColumns {
            missing,
            found: table.headers.clone(),
        });
    }
    if table.is_empty() {
        return Err(ReturnFileError::Empty);
    }

    let mut outcomes = Vec::new();
    let mut unmatched = Vec::new();
    let mut summary = ReturnSummary {
        total: table.len(),
        ..Default::default()
    };

    for (idx, row) in table.rows.iter().enumerate() {
        let line = table.line_of(idx);
        let cell = |field: ReturnField| -> Option<String> {
            columns
                .get(field)
                .and_then(|i| row.get(i))
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let identifier = normalize_identifier(&cell(ReturnField::Identifier).unwrap_or_default());
        let key = match lookup.lookup(&identifier) {
            Some(key) if !identifier.is_empty() => key,
            _ => {
                log_warning(format!("Line {}: no record for '{}'", line, identifier));
                unmatched.push(UnmatchedRow { row: line, identifier });
                continue;
            }
        };

        let raw_status = cell(ReturnField::Status).unwrap_or_default();
        let status = map_status(&raw_status);
        let error_code = cell(ReturnField::ErrorCode);
        let message = cell(ReturnField::Message)
            .or_else(|| error_code.as_deref().map(describe_error_code));

        match status {
            ReturnStatus::Accepted => summary.accepted += 1,
            ReturnStatus::Rejected => summary.rejected += 1,
        }

        outcomes.push(ReturnOutcome {
            row: line,
            key,
            identifier,
            status,
            raw_status,
            error_code,
            message,
            external_code: cell(ReturnField::ExternalCode),
        });
    }

    summary.unmatched = unmatched.len();
    log_success(format!(
        "Return processed: {} accepted, {} rejected, {} unmatched ({} rows)",
        summary.accepted, summary.rejected, summary.unmatched, summary.total
    ));

    Ok(ReturnReport {
        outcomes,
        unmatched,
        summary,
    })
}

/// Read a return file from memory (encoding and delimiter auto-detected).
pub fn parse_return_bytes<L>(bytes: &[u8], lookup: &L) -> ReturnResult<ReturnReport<L::Key>>
where
    L: RecordLookup + ?Sized,
{
    let table = parse_bytes_auto(bytes)?;
    log_info(format!(
        "Return table: {} rows, encoding {}, delimiter {:?}",
        table.len(),
        table.encoding,
        table.delimiter
    ));
    process_return_table(&table, lookup)
}

/// Read a return file from disk.
pub fn parse_return_file<P, L>(path: P, lookup: &L) -> ReturnResult<ReturnReport<L::Key>>
where
    P: AsRef<Path>,
    L: RecordLookup + ?Sized,
{
    let table = parse_file_auto(path)?;
    process_return_table(&table, lookup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;

    fn known() -> HashMap<String, u64> {
        [("BRABC2400001", 1), ("BRABC2400002", 2), ("BRABC2400003", 3)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_process_mixed_file() {
        let csv = "ISRC;STATUS;CODIGO_ERRO;MENSAGEM;COD_ECAD\n\
                   BR-ABC-24-00001;ACEITO;;;98765\n\
                   brabc2400002;Rejeitado pelo sistema;E003;;\n\
                   BRXYZ9900009;ACEITO;;;\n\
                   BRABC2400003;???;E999;Falha manual;\n";
        let report = parse_return_bytes(csv.as_bytes(), &known()).unwrap();

        assert_eq!(
            report.summary,
            ReturnSummary { accepted: 1, rejected: 2, unmatched: 1, total: 4 }
        );

        let first = &report.outcomes[0];
        assert_eq!(first.key, 1);
        assert_eq!(first.row, 2);
        assert_eq!(first.status, ReturnStatus::Accepted);
        assert_eq!(first.external_code.as_deref(), Some("98765"));

        let second = &report.outcomes[1];
        assert_eq!(second.status, ReturnStatus::Rejected);
        assert_eq!(second.message.as_deref(), Some("Percentuais não somam 100%"));

        // an explicit message wins over the code description
        assert_eq!(report.outcomes[2].message.as_deref(), Some("Falha manual"));

        assert_eq!(report.unmatched, vec![UnmatchedRow { row: 4, identifier: "BRXYZ9900009".into() }]);
        assert_eq!(report.rejected_identifiers(), vec!["BRABC2400002", "BRABC2400003"]);
        assert_eq!(report.rejected_keys(), vec![&2, &3]);
    }

    #[test]
    fn test_rows_after_blank_lines_keep_file_line() {
        let csv = "ISRC;STATUS\nBRABC2400001;OK\n\nBRABC2400002;ERRO\n\n\nBRXYZ9900009;OK\n";
        let report = parse_return_bytes(csv.as_bytes(), &known()).unwrap();

        let rows: Vec<(&str, usize)> = report
            .outcomes
            .iter()
            .map(|o| (o.identifier.as_str(), o.row))
            .collect();
        assert_eq!(rows, vec![("BRABC2400001", 2), ("BRABC2400002", 4)]);
        assert_eq!(report.unmatched, vec![UnmatchedRow { row: 7, identifier: "BRXYZ9900009".into() }]);
    }

    #[test]
    fn test_synonym_headers_and_tabs() {
        let txt = "Código ISRC\tSituação\tDescrição\nBRABC2400001\tAprovado\tok\n";
        let report = parse_return_bytes(txt.as_bytes(), &known()).unwrap();
        assert_eq!(report.summary.accepted, 1);
        assert_eq!(report.outcomes[0].message.as_deref(), Some("ok"));
    }

    #[test]
    fn test_missing_columns_aborts() {
        let err = parse_return_bytes(b"ISRC;OBS\nBRABC2400001;x\n", &known()).unwrap_err();
        match err {
            ReturnFileError::MissingColumns { missing, found } => {
                assert_eq!(missing, vec!["STATUS"]);
                assert_eq!(found, vec!["ISRC", "OBS"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_only_and_empty() {
        assert!(matches!(
            parse_return_bytes(b"ISRC;STATUS\n", &known()),
            Err(ReturnFileError::Empty)
        ));
        assert!(matches!(
            parse_return_bytes(b"", &known()),
            Err(ReturnFileError::Table(TableError::EmptyFile))
        ));
    }

    #[test]
    fn test_blank_identifier_is_unmatched() {
        let table = Table::from_rows(["ISRC", "STATUS"], vec![vec!["", "ACEITO"]]);
        let report = process_return_table(&table, &LookupFn(|_: &str| Some(0u8))).unwrap();
        assert!(report.outcomes.is_empty());
        assert_eq!(report.summary.unmatched, 1);
    }

    #[test]
    fn test_hashset_lookup() {
        let known: HashSet<String> = ["BRABC2400001".to_string()].into_iter().collect();
        let table = Table::from_rows(["isrc", "resultado"], vec![vec!["BRABC2400001", "negado"]]);
        let report = process_return_table(&table, &known).unwrap();
        assert_eq!(report.outcomes[0].key, "BRABC2400001");
        assert_eq!(report.outcomes[0].status, ReturnStatus::Rejected);
    }

    #[test]
    fn test_normalize_identifier() {
        assert_eq!(normalize_identifier(" br-abc-24-00001 "), "BRABC2400001");
    }
}
