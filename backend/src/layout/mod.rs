//! Declarative fixed-width record layouts.
//!
//! Every ECAD record type is described once, as an ordered table of
//! [`FieldSpec`]s. The same table drives encoding ([`RecordWriter`]) and
//! decoding ([`RecordLayout::decode`], [`decode_line`]).
//!
//! ```text
//! RecordLayout { kind: WorkParticipant, width: 82 }
//! ┌──────────┬──────────┬──────────────┬───────────────┬──────┐
//! │ tag (8)  │ work(13) │ internal(15) │   name (45)   │ r(1) │
//! └──────────┴──────────┴──────────────┴───────────────┴──────┘
//! ```
//!
//! Layouts are built with [`RecordLayout::new`], a `const fn` that refuses to
//! compile when the field widths do not add up to the documented total.

pub mod kind;

use serde::Serialize;
use std::ops::Range;

use crate::error::DecodeError;
use crate::format::{fixed_text, zero_number};

pub use kind::RecordKind;

// =============================================================================
// Field table
// =============================================================================

/// How a field is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Left-justified, space-padded, truncated ([`fixed_text`]).
    Text,
    /// Right-justified, zero-padded digits ([`zero_number`]).
    Digits,
    /// Literal reproduced byte for byte.
    Constant(&'static str),
    /// A run of a single character.
    Filler(char),
}

/// One positional field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub width: usize,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(name: &'static str, width: usize) -> Self {
        Self { name, width, kind: FieldKind::Text }
    }

    pub const fn digits(name: &'static str, width: usize) -> Self {
        Self { name, width, kind: FieldKind::Digits }
    }

    /// Literal segment; its width is the literal's length.
    pub const fn constant(name: &'static str, value: &'static str) -> Self {
        Self { name, width: value.len(), kind: FieldKind::Constant(value) }
    }

    pub const fn zeros(name: &'static str, width: usize) -> Self {
        Self { name, width, kind: FieldKind::Filler('0') }
    }

    pub const fn spaces(name: &'static str, width: usize) -> Self {
        Self { name, width, kind: FieldKind::Filler(' ') }
    }
}

const fn sum_widths(fields: &[FieldSpec]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < fields.len() {
        total += fields[i].width;
        i += 1;
    }
    total
}

/// A complete record type: kind, documented width and field table.
#[derive(Debug)]
pub struct RecordLayout {
    pub kind: RecordKind,
    pub width: usize,
    pub fields: &'static [FieldSpec],
}

impl RecordLayout {
    /// Build a layout. Panics (at compile time, for `static` layouts) when the
    /// field widths do not sum to `width`.
    pub const fn new(kind: RecordKind, width: usize, fields: &'static [FieldSpec]) -> Self {
        assert!(
            sum_widths(fields) == width,
            "record layout field widths do not sum to the documented width"
        );
        Self { kind, width, fields }
    }

    /// Sum of the field widths. Always equal to `width`.
    pub const fn field_width_total(&self) -> usize {
        sum_widths(self.fields)
    }

    /// Character range of a named field.
    pub fn range_of(&self, name: &str) -> Option<Range<usize>> {
        let mut start = 0;
        for field in self.fields {
            if field.name == name {
                return Some(start..start + field.width);
            }
            start += field.width;
        }
        None
    }

    /// Literal prefix shared by every line of this layout.
    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    /// Start writing a record of this layout.
    pub fn writer(&'static self) -> RecordWriter {
        RecordWriter::new(self)
    }

    /// Slice `line` back into its named fields.
    pub fn decode<'a>(&'static self, line: &'a str) -> Result<DecodedRecord<'a>, DecodeError> {
        let found = line.chars().count();
        if found != self.width {
            return Err(DecodeError::WidthMismatch {
                kind: self.kind,
                expected: self.width,
                found,
            });
        }

        // char index -> byte index, with one extra entry for the end
        let mut bounds: Vec<usize> = line.char_indices().map(|(b, _)| b).collect();
        bounds.push(line.len());

        let mut fields = Vec::with_capacity(self.fields.len());
        let mut start = 0;
        for field in self.fields {
            let end = start + field.width;
            fields.push((field.name, &line[bounds[start]..bounds[end]]));
            start = end;
        }

        Ok(DecodedRecord { kind: self.kind, fields })
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// An encoded fixed-width line tagged with its record kind.
///
/// Only [`RecordWriter::finish`] creates these, so the line always has the
/// exact width of its layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedRecord {
    kind: RecordKind,
    line: String,
}

impl EncodedRecord {
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// Width in characters.
    pub fn width(&self) -> usize {
        self.kind.layout().width
    }

    /// Layout version prefix (`0661`, `0660`, ...).
    pub fn layout_version(&self) -> &'static str {
        self.kind.layout_version()
    }

    pub fn into_string(self) -> String {
        self.line
    }
}

impl std::fmt::Display for EncodedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.line)
    }
}

/// Writes the fields of one record, strictly in layout order.
///
/// Constant and filler segments are emitted automatically. Supplying a value
/// for the wrong field, or finishing before every field is written, is a
/// programming error and panics.
///
/// # Example
/// ```
/// use ecad::records::WORK_PARTICIPANT;
///
/// let record = WORK_PARTICIPANT
///     .writer()
///     .digits("work_code", "")
///     .digits("internal_code", "42")
///     .text("name", "JOAO")
///     .text("role", "I")
///     .finish();
/// assert_eq!(record.as_str().len(), 82);
/// ```
#[derive(Debug)]
pub struct RecordWriter {
    layout: &'static RecordLayout,
    line: String,
    next: usize,
}

impl RecordWriter {
    pub fn new(layout: &'static RecordLayout) -> Self {
        let mut writer = Self {
            layout,
            line: String::with_capacity(layout.width),
            next: 0,
        };
        writer.fill_fixed();
        writer
    }

    /// Write a [`FieldKind::Text`] field.
    pub fn text(mut self, name: &str, value: &str) -> Self {
        let spec = self.expect_field(name, FieldKind::Text);
        self.line.push_str(&fixed_text(value, spec.width));
        self.advance();
        self
    }

    /// Write a [`FieldKind::Digits`] field.
    pub fn digits(mut self, name: &str, value: &str) -> Self {
        let spec = self.expect_field(name, FieldKind::Digits);
        self.line.push_str(&zero_number(value, spec.width));
        self.advance();
        self
    }

    /// Skip a text field, leaving it blank.
    pub fn blank(self, name: &str) -> Self {
        self.text(name, "")
    }

    /// Close the record and check its width.
    pub fn finish(self) -> EncodedRecord {
        assert!(
            self.next == self.layout.fields.len(),
            "{:?}: record finished before field '{}'",
            self.layout.kind,
            self.layout.fields[self.next].name
        );
        let width = self.line.chars().count();
        assert_eq!(
            width, self.layout.width,
            "{:?}: encoded width {} differs from layout width {}",
            self.layout.kind, width, self.layout.width
        );

        EncodedRecord {
            kind: self.layout.kind,
            line: self.line,
        }
    }

    fn expect_field(&self, name: &str, kind: FieldKind) -> FieldSpec {
        let spec = match self.layout.fields.get(self.next) {
            Some(spec) => *spec,
            None => panic!(
                "{:?}: value for '{}' supplied after the last field",
                self.layout.kind, name
            ),
        };
        assert!(
            spec.name == name && spec.kind == kind,
            "{:?}: expected field '{}' ({:?}), got '{}' ({:?})",
            self.layout.kind,
            spec.name,
            spec.kind,
            name,
            kind
        );
        spec
    }

    fn advance(&mut self) {
        self.next += 1;
        self.fill_fixed();
    }

    fn fill_fixed(&mut self) {
        while let Some(spec) = self.layout.fields.get(self.next) {
            match spec.kind {
                FieldKind::Constant(value) => self.line.push_str(value),
                FieldKind::Filler(c) => self.line.extend(std::iter::repeat(c).take(spec.width)),
                FieldKind::Text | FieldKind::Digits => break,
            }
            self.next += 1;
        }
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// A fixed-width line sliced into named fields. Values are raw (untrimmed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedRecord<'a> {
    pub kind: RecordKind,
    pub fields: Vec<(&'static str, &'a str)>,
}

impl<'a> DecodedRecord<'a> {
    /// Raw value of a field.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }

    /// Value with padding spaces removed.
    pub fn get_trimmed(&self, name: &str) -> Option<&'a str> {
        self.get(name).map(str::trim)
    }
}

/// Identify the layout of a line by tag and width, then decode it.
pub fn decode_line(line: &str) -> Result<DecodedRecord<'_>, DecodeError> {
    let width = line.chars().count();
    RecordKind::ALL
        .iter()
        .map(|kind| kind.layout())
        .find(|layout| layout.width == width && line.starts_with(layout.tag()))
        .ok_or_else(|| DecodeError::UnknownRecord {
            width,
            prefix: line.chars().take(8).collect(),
        })?
        .decode(line)
}
