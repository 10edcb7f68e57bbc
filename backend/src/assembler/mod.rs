//! File assembly and export.
//!
//! ```text
//! ┌───────────┐     ┌───────────────┐     ┌───────────┐     ┌──────────────┐
//! │  Catalog  │────▶│ FileAssembler │────▶│  EcadFile │────▶│ write_atomic │
//! │ works/fon │     │ (sections)    │     │ (records) │     │ (Latin-1)    │
//! └───────────┘     └───────────────┘     └───────────┘     └──────────────┘
//! ```
//!
//! ## ECAD file
//!
//! | Lines | Content |
//! |-------|---------|
//! | 1 | file header `000` |
//! | 2 | society header `0660` |
//! | per work | `0660OBM000000`, OBM1, OBM2 ×n, OBM4 ×n, `0669OBM0` |
//! | per phonogram | `0660FON000000`, FON1, FON2 ×n, FON3, `0669FON0` |
//! | last | trailer `999`: total lines (itself included), total groups |
//!
//! ## Mailing file
//!
//! Header, one detail per titleholder, trailer. Every line is 428 wide.

pub mod mailing;
pub mod state;

use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::ExportContext;
use crate::encoding::{encode_legacy, normalize_output_path, write_atomic};
use crate::error::ExportResult;
use crate::layout::EncodedRecord;
use crate::logs::{log_error, log_success, log_warning};
use crate::models::{MailingTitleholder, Phonogram, Work};

pub use mailing::assemble_mailing_file;
pub use state::{assemble_ecad_file, FileAssembler, Section};

/// Counts of one generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    /// Correlates log lines and stored submissions with this file.
    pub export_id: Uuid,
    pub generated_at: NaiveDateTime,
    pub works: usize,
    pub phonograms: usize,
    pub titleholders: usize,
    /// Every line, trailer included.
    pub lines: usize,
    pub groups: usize,
}

/// A fully assembled file, header first and trailer last.
#[derive(Debug, Clone)]
pub struct EcadFile {
    records: Vec<EncodedRecord>,
    summary: ExportSummary,
}

impl EcadFile {
    pub(crate) fn new(records: Vec<EncodedRecord>, summary: ExportSummary) -> Self {
        Self { records, summary }
    }

    pub fn records(&self) -> &[EncodedRecord] {
        &self.records
    }

    pub fn summary(&self) -> &ExportSummary {
        &self.summary
    }

    /// One record per line, every line `\n`-terminated.
    pub fn to_text(&self) -> String {
        let capacity = self.records.iter().map(|r| r.as_str().len() + 1).sum();
        let mut text = String::with_capacity(capacity);
        for record in &self.records {
            text.push_str(record.as_str());
            text.push('\n');
        }
        text
    }

    /// [`to_text`](Self::to_text) in the legacy single-byte encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        encode_legacy(&self.to_text()).0
    }

    /// Encode and write atomically. Returns the path actually written.
    pub fn write_to(&self, path: &Path) -> ExportResult<PathBuf> {
        let target = normalize_output_path(path);
        let (bytes, substituted) = encode_legacy(&self.to_text());
        if substituted > 0 {
            log_warning(format!("{} characters not representable in Latin-1, written as '?'", substituted));
        }

        if let Err(err) = write_atomic(&target, &bytes) {
            log_error(err.to_string());
            return Err(err);
        }
        log_success(format!("Wrote {} ({} lines)", target.display(), self.summary.lines));
        Ok(target)
    }
}

/// Assemble the ECAD file and write it to `path`.
///
/// A `.exp` extension is replaced by `.txt`; the returned path is the one
/// written.
pub fn export_ecad_file(
    works: &[Work],
    phonograms: &[Phonogram],
    ctx: &ExportContext,
    path: &Path,
) -> ExportResult<(PathBuf, ExportSummary)> {
    let file = assemble_ecad_file(works, phonograms, ctx)?;
    let written = file.write_to(path)?;
    Ok((written, file.summary))
}

/// Assemble the mailing file and write it to `path`.
pub fn export_mailing_file(
    titleholders: &[MailingTitleholder],
    ctx: &ExportContext,
    path: &Path,
) -> ExportResult<(PathBuf, ExportSummary)> {
    let file = assemble_mailing_file(titleholders, ctx);
    let written = file.write_to(path)?;
    Ok((written, file.summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportOptions;
    use crate::models::WorkTitleholder;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn ctx() -> ExportContext {
        let at = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        ExportContext::new(ExportOptions::default(), at)
    }

    #[test]
    fn test_to_text_terminates_every_line() {
        let ctx = ctx();
        let file = assemble_ecad_file(&[], &[], &ctx).unwrap();
        let text = file.to_text();

        assert!(text.ends_with("999000000003000000000\n"));
        assert_eq!(text.lines().count(), 3);
        assert_eq!(text.matches('\n').count(), 3);
    }

    #[test]
    fn test_to_bytes_is_single_byte() {
        let ctx = ctx();
        let mut work = Work::new("1", "Canção");
        work.add_author(WorkTitleholder::new("José", "1", "Compositor", 100.0));
        let file = assemble_ecad_file(&[work], &[], &ctx).unwrap();

        // accents are stripped by the builders, so bytes == chars
        assert_eq!(file.to_bytes().len(), file.to_text().chars().count());
        assert!(file.to_bytes().is_ascii());
    }

    #[test]
    fn test_export_writes_txt() {
        let dir = tempdir().unwrap();
        let ctx = ctx();
        let (written, summary) =
            export_ecad_file(&[Work::new("1", "A")], &[], &ctx, &dir.path().join("ECAD.exp")).unwrap();

        assert_eq!(written, dir.path().join("ECAD.txt"));
        let content = std::fs::read_to_string(&written).unwrap();
        assert_eq!(content.lines().count(), summary.lines);
        assert_eq!(summary.groups, 1);
        assert!(!dir.path().join("ECAD.exp").exists());
    }

    #[test]
    fn test_failed_write_is_logged() {
        use crate::logs::{LogLevel, LOG_BROADCASTER};
        use tokio::sync::broadcast::error::TryRecvError;

        let mut rx = LOG_BROADCASTER.subscribe();
        let dir = tempdir().unwrap();
        let target = dir.path().join("missing").join("ECAD.txt");

        let ctx = ctx();
        let file = assemble_ecad_file(&[], &[], &ctx).unwrap();
        assert!(file.write_to(&target).is_err());

        // other tests share the broadcaster, so scan for our entry
        let mut found = false;
        loop {
            match rx.try_recv() {
                Ok(entry) => {
                    if entry.level == LogLevel::Error && entry.message.contains("missing") {
                        found = true;
                        break;
                    }
                }
                Err(TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
        assert!(found);
    }

    #[test]
    fn test_export_ids_are_unique() {
        let ctx = ctx();
        let a = assemble_ecad_file(&[], &[], &ctx).unwrap();
        let b = assemble_ecad_file(&[], &[], &ctx).unwrap();
        assert_ne!(a.summary().export_id, b.summary().export_id);
        assert_eq!(a.to_text(), b.to_text());
    }
}
