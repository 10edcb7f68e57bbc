//! Phonogram records: FON1 header, FON2 titleholder, FON3 auxiliary.
//!
//! All three carry the numeric phonogram id, which is how the importer links
//! them to each other.

use crate::config::ExportContext;
use crate::format::{date_ddmmyyyy, duration_to_seconds, genre_to_code, strip_accents_upper, ZERO_DATE};
use crate::layout::{EncodedRecord, FieldSpec, RecordKind, RecordLayout};
use crate::models::{Phonogram, PhonogramTitleholder};

use super::{share_field, PersonType};

pub static PHONOGRAM_HEADER: RecordLayout = RecordLayout::new(
    RecordKind::PhonogramHeader,
    333,
    &[
        FieldSpec::constant("tag", "0661FON1"),
        FieldSpec::digits("phonogram_id", 12),
        FieldSpec::digits("internal_code", 15),
        FieldSpec::digits("work_code", 13),
        FieldSpec::zeros("reserved_1", 45),
        FieldSpec::text("isrc", 12),
        FieldSpec::digits("recording_date", 8),
        FieldSpec::digits("release_date", 8),
        FieldSpec::digits("generation_date", 8),
        FieldSpec::text("national", 1),
        FieldSpec::digits("duration", 6),
        FieldSpec::spaces("reserved_2", 12),
        FieldSpec::constant("reserved_3", "S"),
        FieldSpec::constant("country", "BR"),
        FieldSpec::text("genre", 13),
        FieldSpec::constant("reserved_4", "001000000"),
        FieldSpec::spaces("reserved_5", 157),
        FieldSpec::constant("end_code", "0NN"),
    ],
);

pub static PHONOGRAM_TITLEHOLDER: RecordLayout = RecordLayout::new(
    RecordKind::PhonogramTitleholder,
    348,
    &[
        FieldSpec::constant("tag", "0661FON2"),
        FieldSpec::digits("phonogram_id", 12),
        FieldSpec::zeros("reserved_1", 15),
        FieldSpec::zeros("titleholder_code", 13),
        FieldSpec::zeros("reserved_2", 15),
        FieldSpec::text("name", 70),
        FieldSpec::text("person_type", 1),
        FieldSpec::digits("document", 13),
        FieldSpec::zeros("reserved_3", 13),
        FieldSpec::spaces("reserved_4", 10),
        FieldSpec::text("category", 3),
        FieldSpec::text("subcategory", 3),
        FieldSpec::digits("share", 5),
        FieldSpec::constant("reserved_5", "00000SS"),
        FieldSpec::text("society", 6),
        FieldSpec::spaces("reserved_6", 6),
        FieldSpec::spaces("pseudonym", 75),
        FieldSpec::constant("status", "A"),
        FieldSpec::zeros("reserved_7", 71),
        FieldSpec::constant("end_code", "S"),
    ],
);

pub static PHONOGRAM_AUXILIARY: RecordLayout = RecordLayout::new(
    RecordKind::PhonogramAuxiliary,
    65,
    &[
        FieldSpec::constant("tag", "0661FON3"),
        FieldSpec::zeros("reserved_1", 12),
        FieldSpec::zeros("reserved_2", 15),
        FieldSpec::digits("phonogram_id", 13),
        FieldSpec::zeros("reserved_3", 14),
        FieldSpec::constant("end_code", "56A"),
    ],
);

/// Role of a FON2 titleholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhonogramCategory {
    Producer,
    Musician,
    Interpreter,
}

impl PhonogramCategory {
    /// Category of a performer from its free-text description. Producers are
    /// never inferred: they come from [`Phonogram::producer`].
    pub fn of_performer(category: &str) -> Self {
        if strip_accents_upper(category).contains("MUSICO") {
            Self::Musician
        } else {
            Self::Interpreter
        }
    }

    /// `(category, subcategory)` codes.
    pub fn codes(self) -> (&'static str, &'static str) {
        match self {
            Self::Producer => ("PFP", "FN "),
            Self::Musician => ("MAM", "AN "),
            Self::Interpreter => ("I I", " N "),
        }
    }
}

fn release_date(phonogram: &Phonogram) -> String {
    let from_date = date_ddmmyyyy(phonogram.release_date.as_deref().unwrap_or(""));
    if from_date != ZERO_DATE {
        return from_date;
    }
    match phonogram.release_year {
        Some(year) => date_ddmmyyyy(&year.to_string()),
        None => ZERO_DATE.to_string(),
    }
}

fn isrc_field(isrc: &str) -> String {
    strip_accents_upper(isrc.trim()).replace('-', "")
}

pub fn build_phonogram_header(phonogram: &Phonogram, ctx: &ExportContext) -> EncodedRecord {
    PHONOGRAM_HEADER
        .writer()
        .digits("phonogram_id", &phonogram.id.to_string())
        .digits("internal_code", &phonogram.internal_code_digits())
        .digits("work_code", phonogram.work_code.as_deref().unwrap_or(""))
        .text("isrc", &isrc_field(&phonogram.isrc))
        .digits("recording_date", &date_ddmmyyyy(phonogram.recording_date.as_deref().unwrap_or("")))
        .digits("release_date", &release_date(phonogram))
        .digits("generation_date", &ctx.date_stamp())
        .text("national", phonogram.nationality.ecad_flag())
        .digits("duration", &duration_to_seconds(&phonogram.duration))
        .text("genre", genre_to_code(&phonogram.genre))
        .finish()
}

/// FON2 line. A titleholder without a society is filed under the configured
/// default.
pub fn build_phonogram_titleholder(
    phonogram: &Phonogram,
    holder: &PhonogramTitleholder,
    category: PhonogramCategory,
    ctx: &ExportContext,
) -> EncodedRecord {
    let (category_code, subcategory_code) = category.codes();
    let society = holder
        .society
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(ctx.options.default_phonogram_society.as_str());

    PHONOGRAM_TITLEHOLDER
        .writer()
        .digits("phonogram_id", &phonogram.id.to_string())
        .text("name", &strip_accents_upper(&holder.name))
        .text("person_type", PersonType::from_document(&holder.document).code())
        .digits("document", &holder.document)
        .text("category", category_code)
        .text("subcategory", subcategory_code)
        .digits("share", &share_field(holder.share))
        .text("society", &strip_accents_upper(society))
        .finish()
}

pub fn build_phonogram_auxiliary(phonogram: &Phonogram) -> EncodedRecord {
    PHONOGRAM_AUXILIARY
        .writer()
        .digits("phonogram_id", &phonogram.id.to_string())
        .finish()
}
