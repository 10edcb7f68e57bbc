//! Record tables and builders.
//!
//! One `static` [`RecordLayout`](crate::layout::RecordLayout) per ECAD record
//! type, plus a builder that maps a model onto it. Builders never validate:
//! every value goes through a total formatter, so any input yields a line of
//! the documented width.
//!
//! ```text
//! envelope    000 file header, 0660 society header, separators, trailers
//! work        OBM1 work header, OBM2 titleholder, OBM4 participant
//! phonogram   FON1 header, FON2 titleholder, FON3 auxiliary
//! mailing     0660001 / 0660002 / 0660999
//! ```

pub mod envelope;
pub mod mailing;
pub mod phonogram;
pub mod work;

pub use envelope::{
    build_file_header, build_file_trailer, build_phonogram_separator, build_phonogram_trailer,
    build_society_header, build_work_separator, build_work_trailer, FILE_HEADER, FILE_TRAILER,
    PHONOGRAM_SEPARATOR, PHONOGRAM_TRAILER, SOCIETY_HEADER, WORK_SEPARATOR, WORK_TRAILER,
};
pub use mailing::{
    build_mailing_detail, build_mailing_header, build_mailing_trailer, MAILING_DETAIL,
    MAILING_HEADER, MAILING_TRAILER,
};
pub use phonogram::{
    build_phonogram_auxiliary, build_phonogram_header, build_phonogram_titleholder,
    PhonogramCategory, PHONOGRAM_AUXILIARY, PHONOGRAM_HEADER, PHONOGRAM_TITLEHOLDER,
};
pub use work::{
    build_work_header, build_work_participant, build_work_titleholder, language_code,
    participant_role, work_subfunction, TitleholderSide, WORK_HEADER, WORK_PARTICIPANT,
    WORK_TITLEHOLDER,
};

use crate::format::{document_digits, percent_to_scaled_int, PERCENT_SCALE};

/// Natural person (CPF) or legal entity (CNPJ).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonType {
    Natural,
    Legal,
}

impl PersonType {
    /// Up to 11 digits is a CPF, anything longer a CNPJ.
    pub fn from_document(document: &str) -> Self {
        if document_digits(document).len() > 11 {
            Self::Legal
        } else {
            Self::Natural
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Natural => "F",
            Self::Legal => "J",
        }
    }
}

/// Five-digit share field: `100.0` becomes `10000`.
pub(crate) fn share_field(share: f64) -> String {
    percent_to_scaled_int(&share.to_string(), PERCENT_SCALE, 5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_type_from_document() {
        assert_eq!(PersonType::from_document("651.262.073-00"), PersonType::Natural);
        assert_eq!(PersonType::from_document("12.345.678/0001-90"), PersonType::Legal);
        assert_eq!(PersonType::from_document(""), PersonType::Natural);
        assert_eq!(PersonType::Legal.code(), "J");
    }

    #[test]
    fn test_share_field() {
        assert_eq!(share_field(100.0), "10000");
        assert_eq!(share_field(33.33), "03333");
        assert_eq!(share_field(0.0), "00000");
    }
}
