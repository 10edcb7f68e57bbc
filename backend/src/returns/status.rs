//! Status and error-code interpretation.

use serde::{Deserialize, Serialize};

use crate::format::strip_accents_upper;

/// Outcome of one submitted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnStatus {
    Accepted,
    Rejected,
}

const ACCEPTED_TERMS: &[&str] = &["ACEITO", "APROVADO", "OK", "SUCESSO", "IMPORTADO", "CADASTRADO"];
const REJECTED_TERMS: &[&str] = &["RECUSADO", "REJEITADO", "ERRO", "FALHA", "INVALIDO", "NEGADO"];

/// Map a free-text status to [`ReturnStatus`].
///
/// Substring match on the accent-free, upper-cased value. Accepted terms are
/// checked first; anything unrecognised counts as rejected so it gets
/// resubmitted rather than silently dropped.
pub fn map_status(raw: &str) -> ReturnStatus {
    let status = strip_accents_upper(raw.trim());

    if ACCEPTED_TERMS.iter().any(|t| status.contains(t)) {
        return ReturnStatus::Accepted;
    }
    if REJECTED_TERMS.iter().any(|t| status.contains(t)) {
        return ReturnStatus::Rejected;
    }
    ReturnStatus::Rejected
}

const ERROR_CODES: &[(&str, &str)] = &[
    ("E001", "ISRC inválido ou duplicado"),
    ("E002", "Campos obrigatórios faltando"),
    ("E003", "Percentuais não somam 100%"),
    ("E004", "CPF/CNPJ inválido"),
    ("E005", "Obra não cadastrada"),
    ("E006", "Autor não cadastrado"),
    ("E007", "Produtor não cadastrado"),
    ("E008", "Formato de data inválido"),
    ("E009", "Duração inválida"),
    ("E010", "Gênero não reconhecido"),
];

/// Readable message for an ECAD error code. Empty codes yield an empty string.
pub fn describe_error_code(code: &str) -> String {
    let code = code.trim();
    if code.is_empty() {
        return String::new();
    }

    ERROR_CODES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(_, message)| message.to_string())
        .unwrap_or_else(|| format!("Código de erro: {}", code))
}
