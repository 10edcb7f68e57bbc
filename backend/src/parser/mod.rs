//! Delimited table reader with encoding and delimiter auto-detection.
//!
//! Reads the tabular return files ECAD sends back. No return-file semantics
//! here: the result is a plain [`Table`] of strings.
//!
//! ```text
//! bytes ──▶ detect_encoding ──▶ decode_content ──▶ detect_delimiter ──▶ csv ──▶ Table
//!           (chardet)           (encoding_rs)      (; , TAB |)
//! ```

use std::path::Path;

use crate::error::{TableError, TableResult};

/// Delimiters tried by [`detect_delimiter`], in order of preference on ties.
pub const DELIMITERS: [char; 4] = [';', ',', '\t', '|'];

/// A header row and its data rows.
///
/// Every row has exactly as many cells as there are headers: short rows are
/// padded with empty strings, extra cells are dropped. Blank rows are skipped,
/// so `row_lines` keeps the source line of each row for error reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// 1-based source line of each entry of `rows` (the header is line 1)
    pub row_lines: Vec<usize>,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
}

impl Table {
    /// Build a table from rows that were already extracted, for instance from
    /// a spreadsheet. Cells are trimmed and rows normalised like parsed ones.
    pub fn from_rows<H, R, C>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let headers: Vec<String> = headers.into_iter().map(|h| h.as_ref().trim().to_string()).collect();
        let width = headers.len();
        let (row_lines, rows) = rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| {
                let cells = row.into_iter().map(|c| c.as_ref().trim().to_string()).collect::<Vec<_>>();
                (idx + 2, cells)
            })
            .filter(|(_, row)| row.iter().any(|c| !c.is_empty()))
            .map(|(line, row)| (line, fit_row(row, width)))
            .unzip();

        Self {
            headers,
            rows,
            row_lines,
            encoding: "utf-8".to_string(),
            delimiter: ';',
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Source line of the row at `index`.
    pub fn line_of(&self, index: usize) -> usize {
        self.row_lines.get(index).copied().unwrap_or(index + 2)
    }
}

fn fit_row(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    // chardet guesses poorly on short ASCII/UTF-8 files
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let charset = chardet::detect(bytes).0;
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding. A leading UTF-8 BOM
/// is dropped.
pub fn decode_content(bytes: &[u8], encoding: &str) -> TableResult<String> {
    let text = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned()
        }
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            Some(enc) => enc.decode_without_bom_handling(bytes).0.into_owned(),
            None => return Err(TableError::EncodingError(format!("unsupported encoding '{}'", other))),
        },
    };

    Ok(text.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(text))
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let mut best_sep = DELIMITERS[0];
    let mut best_count = 0;

    for &sep in &DELIMITERS {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse delimited text with an explicit delimiter.
///
/// # Example
/// ```
/// use ecad::parser::parse_table;
///
/// let table = parse_table("ISRC;STATUS\nBRABC2400001;ACEITO", ';', "utf-8").unwrap();
/// assert_eq!(table.headers, vec!["ISRC", "STATUS"]);
/// assert_eq!(table.rows[0][1], "ACEITO");
/// ```
pub fn parse_table(content: &str, delimiter: char, encoding: &str) -> TableResult<Table> {
    if content.trim().is_empty() {
        return Err(TableError::EmptyFile);
    }
    let delimiter_byte = u8::try_from(delimiter)
        .map_err(|_| TableError::parse(format!("delimiter '{}' is not a single byte", delimiter)))?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_byte)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(TableError::NoHeaders);
    }

    let mut rows = Vec::new();
    let mut row_lines = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<String> = record.iter().map(str::to_string).collect();
        if row.iter().all(|c| c.is_empty()) {
            continue;
        }
        // the csv reader skips empty lines, so count from its position
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(rows.len() + 2);
        row_lines.push(line);
        rows.push(fit_row(row, headers.len()));
    }

    Ok(Table {
        headers,
        rows,
        row_lines,
        encoding: encoding.to_string(),
        delimiter,
    })
}

/// Parse bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> TableResult<Table> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);
    parse_table(&content, delimiter, &encoding)
}

/// Parse a file with auto-detection of encoding and delimiter.
pub fn parse_file_auto<P: AsRef<Path>>(path: P) -> TableResult<Table> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_auto(&bytes)
}
