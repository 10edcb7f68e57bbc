//! Record kinds and their tags.

use serde::Serialize;

use super::RecordLayout;
use crate::records;

/// Every record type the codec can emit or decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// `000` file header: sequence, date, time, originator.
    FileHeader,
    /// `0660` society header: society code, batch, date.
    SocietyHeader,
    /// `0660OBM000000`, opens a work group.
    WorkSeparator,
    /// `0661OBM1`
    WorkHeader,
    /// `0661OBM2`, author or publisher.
    WorkTitleholder,
    /// `0661OBM4`, performer listed at work level.
    WorkParticipant,
    /// `0669OBM0`, closes a work group.
    WorkTrailer,
    /// `0660FON000000`, opens a phonogram group.
    PhonogramSeparator,
    /// `0661FON1`
    PhonogramHeader,
    /// `0661FON2`, producer or performer.
    PhonogramTitleholder,
    /// `0661FON3`
    PhonogramAuxiliary,
    /// `0669FON0`, closes a phonogram group.
    PhonogramTrailer,
    /// `999` line and group totals.
    FileTrailer,
    /// `0660001` mailing file header.
    MailingHeader,
    /// `0660002` one rights-holder.
    MailingDetail,
    /// `0660999` mailing totals.
    MailingTrailer,
}

impl RecordKind {
    pub const ALL: &'static [RecordKind] = &[
        Self::FileHeader,
        Self::SocietyHeader,
        Self::WorkSeparator,
        Self::WorkHeader,
        Self::WorkTitleholder,
        Self::WorkParticipant,
        Self::WorkTrailer,
        Self::PhonogramSeparator,
        Self::PhonogramHeader,
        Self::PhonogramTitleholder,
        Self::PhonogramAuxiliary,
        Self::PhonogramTrailer,
        Self::FileTrailer,
        Self::MailingHeader,
        Self::MailingDetail,
        Self::MailingTrailer,
    ];

    /// Literal prefix of every line of this kind.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::FileHeader => "0000661",
            Self::SocietyHeader => "0660",
            Self::WorkSeparator => "0660OBM000000",
            Self::WorkHeader => "0661OBM1",
            Self::WorkTitleholder => "0661OBM2",
            Self::WorkParticipant => "0661OBM4",
            Self::WorkTrailer => "0669OBM0",
            Self::PhonogramSeparator => "0660FON000000",
            Self::PhonogramHeader => "0661FON1",
            Self::PhonogramTitleholder => "0661FON2",
            Self::PhonogramAuxiliary => "0661FON3",
            Self::PhonogramTrailer => "0669FON0",
            Self::FileTrailer => "999",
            Self::MailingHeader => "0660001",
            Self::MailingDetail => "0660002",
            Self::MailingTrailer => "0660999",
        }
    }

    /// Layout version carried by the tag.
    pub const fn layout_version(self) -> &'static str {
        match self {
            Self::FileHeader
            | Self::WorkHeader
            | Self::WorkTitleholder
            | Self::WorkParticipant
            | Self::PhonogramHeader
            | Self::PhonogramTitleholder
            | Self::PhonogramAuxiliary => "0661",
            Self::WorkTrailer | Self::PhonogramTrailer => "0669",
            Self::FileTrailer => "999",
            Self::SocietyHeader
            | Self::WorkSeparator
            | Self::PhonogramSeparator
            | Self::MailingHeader
            | Self::MailingDetail
            | Self::MailingTrailer => "0660",
        }
    }

    pub fn layout(self) -> &'static RecordLayout {
        match self {
            Self::FileHeader => &records::FILE_HEADER,
            Self::SocietyHeader => &records::SOCIETY_HEADER,
            Self::WorkSeparator => &records::WORK_SEPARATOR,
            Self::WorkHeader => &records::WORK_HEADER,
            Self::WorkTitleholder => &records::WORK_TITLEHOLDER,
            Self::WorkParticipant => &records::WORK_PARTICIPANT,
            Self::WorkTrailer => &records::WORK_TRAILER,
            Self::PhonogramSeparator => &records::PHONOGRAM_SEPARATOR,
            Self::PhonogramHeader => &records::PHONOGRAM_HEADER,
            Self::PhonogramTitleholder => &records::PHONOGRAM_TITLEHOLDER,
            Self::PhonogramAuxiliary => &records::PHONOGRAM_AUXILIARY,
            Self::PhonogramTrailer => &records::PHONOGRAM_TRAILER,
            Self::FileTrailer => &records::FILE_TRAILER,
            Self::MailingHeader => &records::MAILING_HEADER,
            Self::MailingDetail => &records::MAILING_DETAIL,
            Self::MailingTrailer => &records::MAILING_TRAILER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_record_tags_are_eight_chars() {
        for kind in [
            RecordKind::WorkHeader,
            RecordKind::WorkTitleholder,
            RecordKind::WorkParticipant,
            RecordKind::PhonogramHeader,
            RecordKind::PhonogramTitleholder,
            RecordKind::PhonogramAuxiliary,
        ] {
            assert_eq!(kind.tag().len(), 8);
            assert!(kind.tag().starts_with(kind.layout_version()));
        }
    }

    #[test]
    fn test_documented_widths() {
        assert_eq!(RecordKind::WorkHeader.layout().width, 292);
        assert_eq!(RecordKind::WorkTitleholder.layout().width, 329);
        assert_eq!(RecordKind::WorkParticipant.layout().width, 82);
        assert_eq!(RecordKind::PhonogramHeader.layout().width, 333);
        assert_eq!(RecordKind::PhonogramTitleholder.layout().width, 348);
        assert_eq!(RecordKind::PhonogramAuxiliary.layout().width, 65);
        assert_eq!(RecordKind::MailingDetail.layout().width, 428);
    }
}
