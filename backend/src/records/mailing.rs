//! Titleholder mailing records (0660 layout, 428 wide).
//!
//! ```text
//! 0660001  header   sequence | date | time | originator
//! 0660002  detail   sequence | cpf | name | address ...
//! 0660999  trailer  total lines | total groups
//! ```

use crate::config::ExportContext;
use crate::format::strip_accents_upper;
use crate::layout::{EncodedRecord, FieldSpec, RecordKind, RecordLayout};
use crate::models::MailingTitleholder;

pub static MAILING_HEADER: RecordLayout = RecordLayout::new(
    RecordKind::MailingHeader,
    428,
    &[
        FieldSpec::constant("tag", "0660001"),
        FieldSpec::digits("sequence", 6),
        FieldSpec::digits("date", 8),
        FieldSpec::digits("time", 6),
        FieldSpec::text("originator", 30),
        FieldSpec::spaces("reserved", 371),
    ],
);

pub static MAILING_DETAIL: RecordLayout = RecordLayout::new(
    RecordKind::MailingDetail,
    428,
    &[
        FieldSpec::constant("tag", "0660002"),
        FieldSpec::digits("sequence", 6),
        FieldSpec::digits("cpf", 14),
        FieldSpec::text("name", 80),
        FieldSpec::text("street", 60),
        FieldSpec::text("number", 10),
        FieldSpec::text("complement", 30),
        FieldSpec::text("district", 40),
        FieldSpec::text("city", 40),
        FieldSpec::text("state", 2),
        FieldSpec::text("postal_code", 10),
        FieldSpec::text("country", 3),
        FieldSpec::spaces("reserved", 126),
    ],
);

pub static MAILING_TRAILER: RecordLayout = RecordLayout::new(
    RecordKind::MailingTrailer,
    428,
    &[
        FieldSpec::constant("tag", "0660999"),
        FieldSpec::digits("total_lines", 6),
        FieldSpec::digits("total_groups", 6),
        FieldSpec::spaces("reserved", 409),
    ],
);

/// The header is always line 1.
pub fn build_mailing_header(ctx: &ExportContext) -> EncodedRecord {
    MAILING_HEADER
        .writer()
        .digits("sequence", "1")
        .digits("date", &ctx.date_stamp())
        .digits("time", &ctx.time_stamp())
        .text("originator", &ctx.options.originator)
        .finish()
}

/// `sequence` is the line number of the detail in the file.
pub fn build_mailing_detail(holder: &MailingTitleholder, sequence: usize) -> EncodedRecord {
    let text = |value: &str| strip_accents_upper(value.trim());

    MAILING_DETAIL
        .writer()
        .digits("sequence", &sequence.to_string())
        .digits("cpf", &holder.document)
        .text("name", &text(&holder.name))
        .text("street", &text(&holder.street))
        .text("number", &text(&holder.number))
        .text("complement", &text(&holder.complement))
        .text("district", &text(&holder.district))
        .text("city", &text(&holder.city))
        .text("state", &text(&holder.state))
        .text("postal_code", &holder.postal_code.trim().replace('-', ""))
        .text("country", &text(&holder.country))
        .finish()
}

pub fn build_mailing_trailer(total_lines: usize, total_groups: usize) -> EncodedRecord {
    MAILING_TRAILER
        .writer()
        .digits("total_lines", &total_lines.to_string())
        .digits("total_groups", &total_groups.to_string())
        .finish()
}
