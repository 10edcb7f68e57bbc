//! Header normalisation and synonym resolution for return files.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::format::strip_accents_upper;

/// A logical column of a return file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnField {
    Identifier,
    Status,
    ErrorCode,
    Message,
    ExternalCode,
}

impl ReturnField {
    pub const ALL: [ReturnField; 5] = [
        Self::Identifier,
        Self::Status,
        Self::ErrorCode,
        Self::Message,
        Self::ExternalCode,
    ];

    /// Name used in error reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Identifier => "ISRC",
            Self::Status => "STATUS",
            Self::ErrorCode => "CODIGO_ERRO",
            Self::Message => "MENSAGEM",
            Self::ExternalCode => "COD_ECAD",
        }
    }

    /// Accepted header names, in priority order.
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            Self::Identifier => &["ISRC", "CODIGO_ISRC", "COD_ISRC"],
            Self::Status => &["STATUS", "SITUACAO", "RESULTADO"],
            Self::ErrorCode => &["CODIGO_ERRO", "COD_ERRO", "ERRO_COD", "CODIGO"],
            Self::Message => &["MENSAGEM", "MENSAGEM_ERRO", "DESCRICAO", "OBSERVACAO"],
            Self::ExternalCode => &["COD_ECAD", "CODIGO_ECAD", "ID_ECAD"],
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, Self::Identifier | Self::Status)
    }
}

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Trim, strip accents, upper-case and join inner whitespace with `_`.
///
/// `" Código  ISRC "` becomes `CODIGO_ISRC`.
pub fn normalize_header(header: &str) -> String {
    WHITESPACE
        .replace_all(strip_accents_upper(header.trim()).as_str(), "_")
        .into_owned()
}

/// Column index of every logical field found in `headers`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub identifier: Option<usize>,
    pub status: Option<usize>,
    pub error_code: Option<usize>,
    pub message: Option<usize>,
    pub external_code: Option<usize>,
}

impl ColumnMap {
    /// Resolve each field to the first synonym present in `headers`.
    pub fn resolve(headers: &[String]) -> Self {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        let find = |field: ReturnField| {
            field
                .synonyms()
                .iter()
                .find_map(|syn| normalized.iter().position(|h| h == syn))
        };

        Self {
            identifier: find(ReturnField::Identifier),
            status: find(ReturnField::Status),
            error_code: find(ReturnField::ErrorCode),
            message: find(ReturnField::Message),
            external_code: find(ReturnField::ExternalCode),
        }
    }

    pub fn get(&self, field: ReturnField) -> Option<usize> {
        match field {
            ReturnField::Identifier => self.identifier,
            ReturnField::Status => self.status,
            ReturnField::ErrorCode => self.error_code,
            ReturnField::Message => self.message,
            ReturnField::ExternalCode => self.external_code,
        }
    }

    /// Names of the required fields that did not resolve.
    pub fn missing_required(&self) -> Vec<&'static str> {
        ReturnField::ALL
            .iter()
            .filter(|f| f.is_required() && self.get(**f).is_none())
            .map(|f| f.name())
            .collect()
    }
}
