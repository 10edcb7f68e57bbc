//! Genre name to ECAD genre code table.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::strip_accents_upper;

/// Code used for empty or unknown genres (generic / other).
pub const GENRE_DEFAULT_CODE: &str = "18";

/// Accent-free, upper-case genre names and their ECAD codes.
pub const GENRE_CODES: &[(&str, &str)] = &[
    ("MPB", "8"),
    ("SAMBA", "14"),
    ("POP", "34"),
    ("ROCK", "22"),
    ("FUNK", "14"),
    ("SERTANEJO", "20"),
    ("GOSPEL", "52"),
    ("FORRO", "76"),
    ("PAGODE", "14"),
    ("AXE", "18"),
    ("BOSSA NOVA", "8"),
    ("RAP", "14"),
    ("HIP HOP", "14"),
    ("ELETRONICA", "94"),
    ("REGGAE", "80"),
    ("COUNTRY", "36"),
    ("JAZZ", "12"),
    ("BLUES", "32"),
    ("CLASSICA", "40"),
    ("INFANTIL", "18"),
    ("ROMANTICO", "58"),
    ("TRAP", "14"),
    ("PISEIRO", "76"),
    ("REGGAETON", "94"),
    ("R&B", "34"),
    ("SOUL", "34"),
    ("HEAVY METAL", "128"),
    ("PUNK", "22"),
    ("INDIE", "22"),
    ("BALADA", "18"),
    ("INSTRUMENTAL", "8"),
    ("WORLD MUSIC", "187"),
    ("FOLK", "26"),
    ("DANCE", "94"),
    ("EDM", "94"),
    ("LATINO", "170"),
    ("AFROBEAT", "28"),
];

static GENRE_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| GENRE_CODES.iter().copied().collect());

/// Look up the ECAD code for a genre name.
///
/// Case, accents and repeated inner whitespace are ignored. Unknown or empty
/// names map to [`GENRE_DEFAULT_CODE`].
///
/// # Example
/// ```
/// use ecad::format::genre_to_code;
///
/// assert_eq!(genre_to_code("Forró"), "76");
/// assert_eq!(genre_to_code("Nonexistent Genre"), "18");
/// ```
pub fn genre_to_code(genre: &str) -> &'static str {
    let key = strip_accents_upper(genre)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    GENRE_INDEX.get(key.as_str()).copied().unwrap_or(GENRE_DEFAULT_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_genres() {
        assert_eq!(genre_to_code("MPB"), "8");
        assert_eq!(genre_to_code("samba"), "14");
        assert_eq!(genre_to_code("Eletrônica"), "94");
        assert_eq!(genre_to_code("  bossa   nova "), "8");
        assert_eq!(genre_to_code("Heavy Metal"), "128");
    }

    #[test]
    fn test_default_code() {
        assert_eq!(genre_to_code("Nonexistent Genre"), GENRE_DEFAULT_CODE);
        assert_eq!(genre_to_code(""), GENRE_DEFAULT_CODE);
    }

    #[test]
    fn test_table_keys_are_normalised() {
        for (name, code) in GENRE_CODES {
            assert_eq!(strip_accents_upper(name), *name);
            assert!(!code.is_empty() && code.len() <= 3);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
