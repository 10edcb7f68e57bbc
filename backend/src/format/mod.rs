//! Field formatters for the ECAD fixed-width layouts.
//!
//! Every function here is total: whatever the input, it returns a value of the
//! documented width. The ECAD importer rejects a whole file on a single
//! malformed line, so a defaulted field is always preferred over an error.
//!
//! | Formatter | Output |
//! |-----------|--------|
//! | [`fixed_text`] | left-justified, space-padded, truncated text |
//! | [`zero_number`] | right-justified, zero-padded digits |
//! | [`strip_accents_upper`] | accent-free upper-case text |
//! | [`duration_to_seconds`] | 6-digit total seconds |
//! | [`percent_to_scaled_int`] | zero-padded scaled percentage |
//! | [`genre_to_code`] | ECAD numeric genre code |
//! | [`document_digits`] | CPF/CNPJ digits only |
//! | [`date_ddmmyyyy`] | 8-digit `DDMMYYYY` date |

pub mod genre;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub use genre::{genre_to_code, GENRE_CODES, GENRE_DEFAULT_CODE};

/// Scale used for royalty shares: `100.0%` becomes `10000`.
pub const PERCENT_SCALE: u32 = 100;

/// Zero duration, returned for any unparseable input.
pub const ZERO_DURATION: &str = "000000";

/// Zero date, returned for any unparseable input.
pub const ZERO_DATE: &str = "00000000";

// =============================================================================
// Padding
// =============================================================================

/// Truncate `value` to `width` characters, then right-pad with spaces.
///
/// Control characters are blanked so a stray newline can never split a record.
///
/// # Example
/// ```
/// use ecad::format::fixed_text;
///
/// assert_eq!(fixed_text("ABC", 5), "ABC  ");
/// assert_eq!(fixed_text("ABCDEFG", 3), "ABC");
/// ```
pub fn fixed_text(value: &str, width: usize) -> String {
    fixed_text_fill(value, width, ' ')
}

/// Same as [`fixed_text`] with a custom fill character.
pub fn fixed_text_fill(value: &str, width: usize, fill: char) -> String {
    let mut out: String = value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .take(width)
        .collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(fill).take(width - len));
    out
}

/// Keep only ASCII digits, then right-justify with zeros to `width`.
///
/// When more digits than `width` remain, the **last** `width` digits are kept.
///
/// # Example
/// ```
/// use ecad::format::zero_number;
///
/// assert_eq!(zero_number("651.262.073-00", 13), "0065126207300");
/// assert_eq!(zero_number("", 3), "000");
/// assert_eq!(zero_number("123456", 4), "3456");
/// ```
pub fn zero_number(value: &str, width: usize) -> String {
    let mut digits = document_digits(value);
    if digits.is_empty() {
        digits.push('0');
    }
    if digits.len() > width {
        // ASCII only, byte offsets are char offsets
        return digits[digits.len() - width..].to_string();
    }
    format!("{:0>width$}", digits, width = width)
}

// =============================================================================
// Text normalisation
// =============================================================================

/// Decompose, drop combining marks and upper-case.
///
/// # Example
/// ```
/// use ecad::format::strip_accents_upper;
///
/// assert_eq!(strip_accents_upper("Eu Sem Você"), "EU SEM VOCE");
/// ```
pub fn strip_accents_upper(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_uppercase()
}

/// Strip every non-digit from a CPF/CNPJ. No checksum validation.
pub fn document_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

// =============================================================================
// Numbers
// =============================================================================

/// Convert `mm:ss` or `hh:mm:ss` into total seconds, zero-padded to 6 digits.
///
/// Returns [`ZERO_DURATION`] for anything else.
pub fn duration_to_seconds(duration: &str) -> String {
    let parts: Option<Vec<u64>> = duration
        .trim()
        .split(':')
        .map(|p| p.trim().parse::<u64>().ok())
        .collect();

    let total = match parts.as_deref() {
        Some([m, s]) => m.saturating_mul(60).saturating_add(*s),
        Some([h, m, s]) => h
            .saturating_mul(3600)
            .saturating_add(m.saturating_mul(60))
            .saturating_add(*s),
        _ => return ZERO_DURATION.to_string(),
    };

    zero_number(&total.to_string(), 6)
}

/// Parse a percentage and scale it to a zero-padded integer.
///
/// Accepts `,` or `.` as decimal separator and an optional trailing `%`.
/// Rounds half away from zero. Unparseable input scales to zero.
///
/// # Example
/// ```
/// use ecad::format::percent_to_scaled_int;
///
/// assert_eq!(percent_to_scaled_int("100", 100, 5), "10000");
/// assert_eq!(percent_to_scaled_int("33,33%", 100, 5), "03333");
/// ```
pub fn percent_to_scaled_int(value: &str, scale: u32, width: usize) -> String {
    let cleaned = value.trim().trim_end_matches('%').trim().replace(',', ".");
    let scaled = cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| (v * f64::from(scale)).round().abs())
        .unwrap_or(0.0);

    zero_number(&format!("{}", scaled as u64), width)
}

// =============================================================================
// Dates
// =============================================================================

static SLASHED_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})[/.-](\d{1,2})[/.-](\d{4})$").expect("valid regex"));

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid regex"));

/// Normalise a year or a date into `DDMMYYYY`.
///
/// - `2019` becomes `01012019`
/// - `5/3/2019` becomes `05032019`
/// - `2019-03-05` becomes `05032019`
/// - eight digits are kept as they are
///
/// Anything else yields [`ZERO_DATE`].
pub fn date_ddmmyyyy(value: &str) -> String {
    let v = value.trim();
    let all_digits = !v.is_empty() && v.chars().all(|c| c.is_ascii_digit());

    if all_digits && v.len() == 4 {
        return format!("0101{}", v);
    }
    if all_digits && v.len() == 8 {
        return v.to_string();
    }
    if let Some(caps) = SLASHED_DATE.captures(v) {
        return format!("{:0>2}{:0>2}{}", &caps[1], &caps[2], &caps[3]);
    }
    if let Some(caps) = ISO_DATE.captures(v) {
        return format!("{}{}{}", &caps[3], &caps[2], &caps[1]);
    }

    ZERO_DATE.to_string()
}
