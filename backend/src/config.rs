//! Export configuration.
//!
//! [`ExportOptions`] holds the society identity written into file headers.
//! The defaults match the files SBACEM sends today; every value can be
//! overridden from the environment (or a `.env` file loaded by the binary).
//!
//! | Variable | Default |
//! |----------|---------|
//! | `ECAD_ORIGINATOR` | `SBACEM FONOGRAMAS` |
//! | `ECAD_SOCIETY_CODE` | `226` |
//! | `ECAD_FILE_SEQUENCE` | `00001` |
//! | `ECAD_BATCH_SEQUENCE` | `0002` |
//! | `ECAD_MANAGING_SOCIETY` | `SBACEM` |
//! | `ECAD_DEFAULT_SOCIETY` | `SBACEM` |

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ORIGINATOR: &str = "SBACEM FONOGRAMAS";
pub const DEFAULT_SOCIETY_CODE: &str = "226";
pub const DEFAULT_FILE_SEQUENCE: &str = "00001";
pub const DEFAULT_BATCH_SEQUENCE: &str = "0002";
pub const DEFAULT_MANAGING_SOCIETY: &str = "SBACEM";

/// Society identity and sequence numbers for one export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    /// Name written in the file header.
    pub originator: String,
    /// 3-digit society code of the society header.
    pub society_code: String,
    /// 5-digit file sequence of the file header.
    pub file_sequence: String,
    /// 4-digit batch sequence of the society header.
    pub batch_sequence: String,
    /// Managing and receiving society of every work.
    pub managing_society: String,
    /// Society of phonogram titleholders that declare none.
    pub default_phonogram_society: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            originator: DEFAULT_ORIGINATOR.to_string(),
            society_code: DEFAULT_SOCIETY_CODE.to_string(),
            file_sequence: DEFAULT_FILE_SEQUENCE.to_string(),
            batch_sequence: DEFAULT_BATCH_SEQUENCE.to_string(),
            managing_society: DEFAULT_MANAGING_SOCIETY.to_string(),
            default_phonogram_society: DEFAULT_MANAGING_SOCIETY.to_string(),
        }
    }
}

impl ExportOptions {
    /// Defaults overridden by any `ECAD_*` variable that is set and not blank.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit lookup, so the
    /// process environment stays untouched in tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();
        let fields: [(&str, &mut String); 6] = [
            ("ECAD_ORIGINATOR", &mut options.originator),
            ("ECAD_SOCIETY_CODE", &mut options.society_code),
            ("ECAD_FILE_SEQUENCE", &mut options.file_sequence),
            ("ECAD_BATCH_SEQUENCE", &mut options.batch_sequence),
            ("ECAD_MANAGING_SOCIETY", &mut options.managing_society),
            ("ECAD_DEFAULT_SOCIETY", &mut options.default_phonogram_society),
        ];
        for (key, slot) in fields {
            if let Some(value) = lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
                *slot = value;
            }
        }
        options
    }
}

/// Options plus the instant the file is generated.
///
/// The clock is injected so that two runs with the same context produce the
/// same bytes.
#[derive(Debug, Clone)]
pub struct ExportContext {
    pub options: ExportOptions,
    pub generated_at: NaiveDateTime,
}

impl ExportContext {
    pub fn new(options: ExportOptions, generated_at: NaiveDateTime) -> Self {
        Self { options, generated_at }
    }

    /// Context stamped with the local wall clock.
    pub fn now(options: ExportOptions) -> Self {
        Self::new(options, Local::now().naive_local())
    }

    /// `DDMMYYYY`
    pub fn date_stamp(&self) -> String {
        self.generated_at.format("%d%m%Y").to_string()
    }

    /// `HHMMSS`
    pub fn time_stamp(&self) -> String {
        self.generated_at.format("%H%M%S").to_string()
    }
}
