//! Legacy single-byte output and atomic file writes.
//!
//! The ECAD importer reads Latin-1 text. Builders already strip accents, so
//! in practice every character is ASCII; anything that still cannot be
//! represented becomes a single `?`, which keeps every line at its width.

use encoding_rs::{EncoderResult, WINDOWS_1252};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{ExportError, ExportResult};

/// Byte substituted for unencodable characters.
pub const SUBSTITUTE: u8 = b'?';

/// Encode `text` as Windows-1252 (the superset browsers use for `latin1`).
///
/// Returns the bytes and the number of substituted characters.
pub fn encode_legacy(text: &str) -> (Vec<u8>, usize) {
    let mut encoder = WINDOWS_1252.new_encoder();
    let mut out = Vec::with_capacity(text.len());
    let mut buf = [0u8; 4096];
    let mut rest = text;
    let mut substituted = 0;

    loop {
        let (result, read, written) = encoder.encode_from_utf8_without_replacement(rest, &mut buf, true);
        out.extend_from_slice(&buf[..written]);
        rest = &rest[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => {}
            EncoderResult::Unmappable(_) => {
                out.push(SUBSTITUTE);
                substituted += 1;
            }
        }
    }

    (out, substituted)
}

/// Decode Windows-1252 bytes. Every byte maps to a character, so this never
/// fails and never changes line widths.
pub fn decode_legacy(bytes: &[u8]) -> String {
    WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned()
}

/// `.exp` targets are written as `.txt`, the extension the importer expects.
pub fn normalize_output_path(path: &Path) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("exp") => path.with_extension("txt"),
        _ => path.to_path_buf(),
    }
}

/// Write `bytes` to a temporary file next to `path`, then rename it over
/// `path`. Readers see either the old file or the complete new one.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> ExportResult<()> {
    let wrap = |source: std::io::Error| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(wrap)?;
    tmp.write_all(bytes).map_err(wrap)?;
    tmp.as_file().sync_all().map_err(wrap)?;
    tmp.persist(path).map_err(|e| wrap(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ascii_passes_through() {
        let (bytes, substituted) = encode_legacy("0661OBM1 EU SEM VOCE\n");
        assert_eq!(bytes, b"0661OBM1 EU SEM VOCE\n");
        assert_eq!(substituted, 0);
    }

    #[test]
    fn test_latin1_is_single_byte() {
        let (bytes, substituted) = encode_legacy("VOCÊ");
        assert_eq!(bytes, vec![b'V', b'O', b'C', 0xCA]);
        assert_eq!(substituted, 0);
    }

    #[test]
    fn test_unmappable_becomes_question_mark() {
        let (bytes, substituted) = encode_legacy("A日本B😀");
        assert_eq!(bytes, b"A??B?");
        assert_eq!(substituted, 3);
    }

    #[test]
    fn test_decode_legacy() {
        assert_eq!(decode_legacy(&[b'V', 0xCA]), "VÊ");
    }

    #[test]
    fn test_normalize_output_path() {
        assert_eq!(normalize_output_path(Path::new("out/ECAD.exp")), PathBuf::from("out/ECAD.txt"));
        assert_eq!(normalize_output_path(Path::new("ECAD.EXP")), PathBuf::from("ECAD.txt"));
        assert_eq!(normalize_output_path(Path::new("ECAD.txt")), PathBuf::from("ECAD.txt"));
        assert_eq!(normalize_output_path(Path::new("ECAD")), PathBuf::from("ECAD"));
    }

    #[test]
    fn test_write_atomic_replaces_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ecad.txt");

        std::fs::write(&path, b"old content").unwrap();
        write_atomic(&path, b"new").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"new");
        // only the target remains, no temp files left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_missing_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("ecad.txt");
        let err = write_atomic(&path, b"x").unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
    }
}
