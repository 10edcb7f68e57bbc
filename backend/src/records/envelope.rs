//! File and section framing records.

use crate::config::ExportContext;
use crate::layout::{EncodedRecord, FieldSpec, RecordKind, RecordLayout};

pub static FILE_HEADER: RecordLayout = RecordLayout::new(
    RecordKind::FileHeader,
    56,
    &[
        FieldSpec::constant("tag", "0000661"),
        FieldSpec::digits("file_sequence", 5),
        FieldSpec::digits("date", 8),
        FieldSpec::digits("time", 6),
        FieldSpec::text("originator", 30),
    ],
);

pub static SOCIETY_HEADER: RecordLayout = RecordLayout::new(
    RecordKind::SocietyHeader,
    19,
    &[
        FieldSpec::constant("tag", "0660"),
        FieldSpec::digits("society_code", 3),
        FieldSpec::digits("batch_sequence", 4),
        FieldSpec::digits("date", 8),
    ],
);

pub static WORK_SEPARATOR: RecordLayout = RecordLayout::new(
    RecordKind::WorkSeparator,
    13,
    &[FieldSpec::constant("tag", "0660OBM000000")],
);

pub static WORK_TRAILER: RecordLayout = RecordLayout::new(
    RecordKind::WorkTrailer,
    8,
    &[FieldSpec::constant("tag", "0669OBM0")],
);

pub static PHONOGRAM_SEPARATOR: RecordLayout = RecordLayout::new(
    RecordKind::PhonogramSeparator,
    13,
    &[FieldSpec::constant("tag", "0660FON000000")],
);

pub static PHONOGRAM_TRAILER: RecordLayout = RecordLayout::new(
    RecordKind::PhonogramTrailer,
    8,
    &[FieldSpec::constant("tag", "0669FON0")],
);

pub static FILE_TRAILER: RecordLayout = RecordLayout::new(
    RecordKind::FileTrailer,
    21,
    &[
        FieldSpec::constant("tag", "999"),
        FieldSpec::digits("total_lines", 9),
        FieldSpec::digits("total_groups", 9),
    ],
);

pub fn build_file_header(ctx: &ExportContext) -> EncodedRecord {
    FILE_HEADER
        .writer()
        .digits("file_sequence", &ctx.options.file_sequence)
        .digits("date", &ctx.date_stamp())
        .digits("time", &ctx.time_stamp())
        .text("originator", &ctx.options.originator)
        .finish()
}

pub fn build_society_header(ctx: &ExportContext) -> EncodedRecord {
    SOCIETY_HEADER
        .writer()
        .digits("society_code", &ctx.options.society_code)
        .digits("batch_sequence", &ctx.options.batch_sequence)
        .digits("date", &ctx.date_stamp())
        .finish()
}

pub fn build_work_separator() -> EncodedRecord {
    WORK_SEPARATOR.writer().finish()
}

pub fn build_work_trailer() -> EncodedRecord {
    WORK_TRAILER.writer().finish()
}

pub fn build_phonogram_separator() -> EncodedRecord {
    PHONOGRAM_SEPARATOR.writer().finish()
}

pub fn build_phonogram_trailer() -> EncodedRecord {
    PHONOGRAM_TRAILER.writer().finish()
}

/// `total_lines` counts every line of the file, this one included.
pub fn build_file_trailer(total_lines: usize, total_groups: usize) -> EncodedRecord {
    FILE_TRAILER
        .writer()
        .digits("total_lines", &total_lines.to_string())
        .digits("total_groups", &total_groups.to_string())
        .finish()
}
