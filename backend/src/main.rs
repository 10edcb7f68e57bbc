//! ECAD CLI - fixed-width export and return-file processing
//!
//! # Commands
//!
//! ```bash
//! ecad export catalog.json -o ECAD.txt        # Works + phonograms to ECAD file
//! ecad mailing titleholders.json -o MALA.txt  # Titleholder mailing file
//! ecad return retorno.csv --known isrcs.json  # Interpret an ECAD return file
//! ecad inspect ECAD.txt                       # Decode a fixed-width file
//! ecad genres                                 # Show the genre code table
//! ```
//!
//! Society identity comes from `ECAD_*` environment variables, which may be
//! set in a `.env` file.

use clap::{Parser, Subcommand};
use ecad::{
    decode_line, export_ecad_file, export_mailing_file, parse_return_file, Catalog, CliError,
    CliResult, ExportContext, ExportOptions, MailingTitleholder,
};
use ecad::encoding::decode_legacy;
use ecad::format::{GENRE_CODES, GENRE_DEFAULT_CODE};
use ecad::returns::normalize_identifier;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ecad")]
#[command(about = "Generate ECAD fixed-width files and read ECAD return files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export works and phonograms to an ECAD file
    Export {
        /// Catalog JSON file: {"works": [...], "phonograms": [...]}
        input: PathBuf,

        /// Output file (.exp is written as .txt)
        #[arg(short, long, default_value = "ECAD.txt")]
        output: PathBuf,

        /// File sequence number (overrides ECAD_FILE_SEQUENCE)
        #[arg(long)]
        sequence: Option<String>,
    },

    /// Export the titleholder mailing file
    Mailing {
        /// JSON array of titleholders with addresses
        input: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "MALA_DIRETA.txt")]
        output: PathBuf,
    },

    /// Interpret an ECAD return file
    Return {
        /// Return file (CSV or delimited TXT)
        input: PathBuf,

        /// JSON array of the identifiers (ISRCs) that were submitted
        #[arg(short, long)]
        known: PathBuf,

        /// Output file for the JSON report (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decode every line of a fixed-width file into named fields
    Inspect {
        /// ECAD or mailing file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the genre code table
    Genres,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Export {
            input,
            output,
            sequence,
        } => cmd_export(&input, &output, sequence),

        Commands::Mailing { input, output } => cmd_mailing(&input, &output),

        Commands::Return {
            input,
            known,
            output,
        } => cmd_return(&input, &known, output.as_deref()),

        Commands::Inspect { input, output } => cmd_inspect(&input, output.as_deref()),

        Commands::Genres => cmd_genres(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_export(input: &Path, output: &Path, sequence: Option<String>) -> CliResult<()> {
    eprintln!("📄 Reading catalog: {}", input.display());

    let catalog: Catalog = serde_json::from_str(&fs::read_to_string(input)?)?;
    let mut options = ExportOptions::from_env();
    if let Some(sequence) = sequence {
        options.file_sequence = sequence;
    }
    let ctx = ExportContext::now(options);

    let (written, summary) = export_ecad_file(&catalog.works, &catalog.phonograms, &ctx, output)?;

    eprintln!("   Works: {}", summary.works);
    eprintln!("   Phonograms: {}", summary.phonograms);
    eprintln!("   Titleholders: {}", summary.titleholders);
    eprintln!("   Lines: {}", summary.lines);
    eprintln!("✅ Saved to: {} (export {})", written.display(), summary.export_id);
    Ok(())
}

fn cmd_mailing(input: &Path, output: &Path) -> CliResult<()> {
    eprintln!("📄 Reading titleholders: {}", input.display());

    let titleholders: Vec<MailingTitleholder> = serde_json::from_str(&fs::read_to_string(input)?)?;
    let ctx = ExportContext::now(ExportOptions::from_env());

    let (written, summary) = export_mailing_file(&titleholders, &ctx, output)?;
    eprintln!("✅ {} titleholders saved to: {}", summary.titleholders, written.display());
    Ok(())
}

fn cmd_return(input: &Path, known: &Path, output: Option<&Path>) -> CliResult<()> {
    eprintln!("📄 Processing return file: {}", input.display());

    let identifiers: Vec<String> = serde_json::from_str(&fs::read_to_string(known)?)?;
    let known: HashSet<String> = identifiers.iter().map(|id| normalize_identifier(id)).collect();

    let report = parse_return_file(input, &known)?;

    eprintln!("   Accepted: {}", report.summary.accepted);
    eprintln!("   Rejected: {}", report.summary.rejected);
    eprintln!("   Unmatched: {}", report.summary.unmatched);
    for id in report.rejected_identifiers().iter().take(10) {
        eprintln!("     - resubmit {}", id);
    }

    let json = serde_json::to_string_pretty(&report)?;
    write_output(&json, output)
}

#[derive(Serialize)]
struct InspectedLine<'a> {
    line: usize,
    #[serde(flatten)]
    record: ecad::DecodedRecord<'a>,
}

fn cmd_inspect(input: &Path, output: Option<&Path>) -> CliResult<()> {
    let text = decode_legacy(&fs::read(input)?);

    let mut decoded = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let record = decode_line(line).map_err(|source| CliError::Decode {
            line: idx + 1,
            source,
        })?;
        decoded.push(InspectedLine {
            line: idx + 1,
            record,
        });
    }
    eprintln!("✅ Decoded {} lines", decoded.len());

    let json = serde_json::to_string_pretty(&decoded)?;
    write_output(&json, output)
}

fn cmd_genres() -> CliResult<()> {
    println!("{:<16} CODE", "GENRE");
    for (name, code) in GENRE_CODES {
        println!("{:<16} {}", name, code);
    }
    println!("{:<16} {}", "(other)", GENRE_DEFAULT_CODE);
    Ok(())
}

fn write_output(content: &str, output: Option<&Path>) -> CliResult<()> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!("💾 Saved to: {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
