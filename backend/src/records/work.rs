//! Work records: OBM1 header, OBM2 titleholder, OBM4 participant.
//!
//! ```text
//! OBM1 (292)  tag | work_code | internal_code | title | flags | duration |
//!             BR | genre | language | managing/receiving society | ...
//! OBM2 (329)  tag | work_code | internal_code | titleholder_code | name |
//!             F/J | cpf | cnpj | ipi | TD1 | A/E | subfunction | share |
//!             pseudonym | I | ipi | sequence | 1001
//! OBM4 (82)   tag | work_code | internal_code | name | role
//! ```

use crate::config::ExportContext;
use crate::format::{
    document_digits, duration_to_seconds, genre_to_code, strip_accents_upper,
};
use crate::layout::{EncodedRecord, FieldSpec, RecordKind, RecordLayout};
use crate::models::{Work, WorkParticipant, WorkTitleholder};

use super::{share_field, PersonType};

pub static WORK_HEADER: RecordLayout = RecordLayout::new(
    RecordKind::WorkHeader,
    292,
    &[
        FieldSpec::constant("tag", "0661OBM1"),
        FieldSpec::digits("work_code", 13),
        FieldSpec::digits("internal_code", 15),
        FieldSpec::text("title", 95),
        FieldSpec::text("national", 1),
        FieldSpec::constant("lyrics_flags", "NN"),
        FieldSpec::zeros("reserved_1", 24),
        FieldSpec::spaces("reserved_2", 11),
        FieldSpec::digits("duration", 6),
        FieldSpec::constant("country", "BR"),
        FieldSpec::text("genre", 10),
        FieldSpec::constant("flags", "NNN"),
        FieldSpec::zeros("reserved_3", 13),
        FieldSpec::spaces("reserved_4", 15),
        FieldSpec::text("language", 3),
        FieldSpec::spaces("reserved_5", 3),
        FieldSpec::text("managing_society", 22),
        FieldSpec::text("receiving_society", 22),
        FieldSpec::constant("identification", "IDN"),
        FieldSpec::constant("reserved_6", "000N"),
        FieldSpec::zeros("reserved_7", 8),
        FieldSpec::spaces("reserved_8", 1),
        FieldSpec::zeros("reserved_9", 8),
    ],
);

pub static WORK_TITLEHOLDER: RecordLayout = RecordLayout::new(
    RecordKind::WorkTitleholder,
    329,
    &[
        FieldSpec::constant("tag", "0661OBM2"),
        FieldSpec::digits("work_code", 13),
        FieldSpec::digits("internal_code", 15),
        FieldSpec::digits("titleholder_code", 13),
        FieldSpec::zeros("reserved_1", 15),
        FieldSpec::text("name", 70),
        FieldSpec::text("person_type", 1),
        FieldSpec::text("cpf", 11),
        FieldSpec::text("cnpj", 14),
        FieldSpec::text("complement", 9),
        FieldSpec::spaces("reserved_2", 2),
        FieldSpec::constant("document_type", "TD1"),
        FieldSpec::spaces("reserved_3", 3),
        FieldSpec::text("titleholder_type", 1),
        FieldSpec::spaces("reserved_4", 1),
        FieldSpec::text("subfunction", 2),
        FieldSpec::digits("share", 5),
        FieldSpec::zeros("reserved_5", 16),
        FieldSpec::constant("society_flag", "AS"),
        FieldSpec::text("pseudonym", 75),
        FieldSpec::zeros("reserved_6", 13),
        FieldSpec::spaces("reserved_7", 15),
        FieldSpec::zeros("reserved_8", 5),
        FieldSpec::text("ipi_flag", 1),
        FieldSpec::text("ipi", 9),
        FieldSpec::digits("sequence", 3),
        FieldSpec::constant("end_code", "1001"),
    ],
);

pub static WORK_PARTICIPANT: RecordLayout = RecordLayout::new(
    RecordKind::WorkParticipant,
    82,
    &[
        FieldSpec::constant("tag", "0661OBM4"),
        FieldSpec::digits("work_code", 13),
        FieldSpec::digits("internal_code", 15),
        FieldSpec::text("name", 45),
        FieldSpec::text("role", 1),
    ],
);

/// Which list of a [`Work`] a titleholder comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleholderSide {
    Author,
    Publisher,
}

/// Two-character OBM2 sub-function for a free-text role.
///
/// Unknown roles are treated as composers (`CA`).
pub fn work_subfunction(role: &str) -> &'static str {
    match strip_accents_upper(role.trim()).as_str() {
        "ARRANJADOR" | "ARRANGER" => "AR",
        "EDITORA" | "PUBLISHER" => "E ",
        "SUB-REGENTE" | "SUBAUTOR" | "SUB-AUTOR" | "SUB-AUTHOR" => "SR",
        "ADAPTADOR" | "ADAPTER" => "AS",
        _ => "CA",
    }
}

/// OBM4 role letter for a work-level performer category.
pub fn participant_role(category: &str) -> &'static str {
    match strip_accents_upper(category.trim()).as_str() {
        "COADJUVANTE" | "PARTICIPACAO" => "C",
        "GRAVADORA" => "G",
        _ => "I",
    }
}

/// `PTN` for Portuguese (or unknown), `ENN` for anything else.
pub fn language_code(language: Option<&str>) -> &'static str {
    let language = strip_accents_upper(language.unwrap_or("").trim());
    if language.is_empty() || language.starts_with('P') {
        "PTN"
    } else {
        "ENN"
    }
}

fn work_code(work: &Work) -> &str {
    work.ecad_code.as_deref().unwrap_or("")
}

pub fn build_work_header(work: &Work, ctx: &ExportContext) -> EncodedRecord {
    let society = &ctx.options.managing_society;

    WORK_HEADER
        .writer()
        .digits("work_code", work_code(work))
        .digits("internal_code", &work.internal_code)
        .text("title", &strip_accents_upper(&work.title))
        .text("national", work.nationality.ecad_flag())
        .digits("duration", &duration_to_seconds(work.duration.as_deref().unwrap_or("")))
        .text("genre", genre_to_code(work.genre.as_deref().unwrap_or("")))
        .text("language", language_code(work.language.as_deref()))
        .text("managing_society", society)
        .text("receiving_society", society)
        .finish()
}

/// OBM2 line. `sequence` runs across authors then publishers, from 1.
pub fn build_work_titleholder(
    work: &Work,
    holder: &WorkTitleholder,
    side: TitleholderSide,
    sequence: usize,
) -> EncodedRecord {
    let document = document_digits(&holder.document);
    let person = PersonType::from_document(&document);
    let (cpf, cnpj) = match person {
        PersonType::Natural => (document.as_str(), ""),
        PersonType::Legal => ("", document.as_str()),
    };

    let subfunction = match side {
        TitleholderSide::Publisher => "E ",
        TitleholderSide::Author => work_subfunction(&holder.role),
    };
    let titleholder_type = if subfunction == "E " { "E" } else { "A" };

    let ipi = document_digits(holder.ipi.as_deref().unwrap_or(""));
    let ipi_flag = if ipi.is_empty() { "" } else { "I" };

    WORK_TITLEHOLDER
        .writer()
        .digits("work_code", work_code(work))
        .digits("internal_code", &work.internal_code)
        .digits("titleholder_code", holder.ecad_code.as_deref().unwrap_or(""))
        .text("name", &strip_accents_upper(&holder.name))
        .text("person_type", person.code())
        .text("cpf", cpf)
        .text("cnpj", cnpj)
        .text("complement", &ipi)
        .text("titleholder_type", titleholder_type)
        .text("subfunction", subfunction)
        .digits("share", &share_field(holder.share))
        .text("pseudonym", &strip_accents_upper(holder.pseudonym.as_deref().unwrap_or("")))
        .text("ipi_flag", ipi_flag)
        .text("ipi", &ipi)
        .digits("sequence", &sequence.to_string())
        .finish()
}

pub fn build_work_participant(work: &Work, participant: &WorkParticipant) -> EncodedRecord {
    WORK_PARTICIPANT
        .writer()
        .digits("work_code", work_code(work))
        .digits("internal_code", &work.internal_code)
        .text("name", &strip_accents_upper(&participant.name))
        .text("role", participant_role(&participant.category))
        .finish()
}
