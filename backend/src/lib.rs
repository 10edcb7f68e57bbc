//! # ECAD - fixed-width export and return-file codec
//!
//! Serialises works, phonograms and their rights-holders into the positional
//! text files read by the ECAD importer, and reads back the tabular return
//! files that report what was accepted.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Models    │────▶│  Records    │────▶│  Assembler  │────▶│  ECAD .txt  │
//! │ (work/fon)  │     │ (layouts)   │     │ (sections)  │     │  (Latin-1)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Return file │────▶│   Parser    │────▶│   Returns   │────▶ ReturnReport
//! │ (csv / txt) │     │ (auto-enc)  │     │ (synonyms)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ecad::{assemble_ecad_file, ExportContext, ExportOptions, Work, WorkTitleholder};
//!
//! let mut work = Work::new("1234", "Eu Sem Você");
//! work.add_author(WorkTitleholder::new("Ruben Jose Marques Gomes", "65126207300", "Compositor", 100.0));
//!
//! let ctx = ExportContext::now(ExportOptions::from_env());
//! let file = assemble_ecad_file(&[work], &[], &ctx).unwrap();
//! std::fs::write("ECAD.txt", file.to_bytes()).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Works, phonograms and titleholders
//! - [`config`] - Society identity and the generation clock
//! - [`format`] - Field formatters
//! - [`layout`] - Declarative record layouts, writer and decoder
//! - [`records`] - The ECAD record types and their builders
//! - [`assembler`] - File assembly and export
//! - [`encoding`] - Latin-1 output and atomic writes
//! - [`parser`] - Delimited table reading with auto-detection
//! - [`returns`] - Return-file interpretation
//! - [`logs`] - Progress log broadcasting

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Encoding
pub mod format;
pub mod layout;
pub mod records;

// Output
pub mod assembler;
pub mod encoding;

// Return files
pub mod parser;
pub mod returns;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    CliError, CliResult, DecodeError, ExportError, ExportResult, ReturnFileError, ReturnResult,
    TableError,
};

// =============================================================================
// Re-exports - Models and configuration
// =============================================================================

pub use config::{ExportContext, ExportOptions};
pub use models::{
    Catalog, MailingTitleholder, Nationality, Phonogram, PhonogramTitleholder, Work,
    WorkParticipant, WorkTitleholder,
};

// =============================================================================
// Re-exports - Export
// =============================================================================

pub use assembler::{
    assemble_ecad_file, assemble_mailing_file, export_ecad_file, export_mailing_file, EcadFile,
    ExportSummary, FileAssembler,
};
pub use layout::{decode_line, DecodedRecord, EncodedRecord, RecordKind};

// =============================================================================
// Re-exports - Return files
// =============================================================================

pub use parser::{parse_bytes_auto, Table};
pub use returns::{
    describe_error_code, map_status, parse_return_bytes, parse_return_file, process_return_table,
    RecordLookup, ReturnOutcome, ReturnReport, ReturnStatus, ReturnSummary,
};
