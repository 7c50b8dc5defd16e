//! The fragment naming scheme.
//!
//! Fragments are named `<base>.part<NNN>.<ext>` with `NNN` a 1-based
//! sequence number zero-padded to 3 digits. Reconstruction order is
//! recovered from filenames alone: the embedded number is parsed instead of
//! relying on lexical sort, which would silently break if the padding width
//! were ever exceeded. Matching is case-insensitive on the `part` token and
//! the extension.

use std::path::Path;

use regex::Regex;

use crate::error::SplitzipError;

/// Default fragment filename extension.
pub const DEFAULT_EXTENSION: &str = "b64";

/// Formats the filename for fragment `seq` of the given base name.
pub fn fragment_file_name(base: &str, seq: u64, ext: &str) -> String {
    format!("{base}.part{seq:03}.{ext}")
}

/// Rejects extensions that cannot appear verbatim in a fragment filename.
pub fn validate_extension(ext: &str) -> Result<(), SplitzipError> {
    if ext.is_empty() {
        return Err(SplitzipError::InvalidConfig(
            "fragment extension must not be empty".into(),
        ));
    }
    if ext.contains(['.', '/', '\\']) {
        return Err(SplitzipError::InvalidConfig(format!(
            "fragment extension '{ext}' must not contain dots or path separators"
        )));
    }
    Ok(())
}

/// Extracts the ordering key from fragment filenames for one extension.
pub struct SequenceMatcher {
    re: Regex,
}

impl SequenceMatcher {
    pub fn new(ext: &str) -> Result<Self, SplitzipError> {
        let pattern = format!(r"(?i)\.part(\d{{3}})\.{}$", regex::escape(ext));
        let re = Regex::new(&pattern)
            .map_err(|e| SplitzipError::InvalidConfig(format!("bad fragment extension: {e}")))?;
        Ok(Self { re })
    }

    /// Parses the sequence number out of a fragment filename.
    ///
    /// Names that do not match the pattern yield 0, so stray files sharing
    /// the extension sort ahead of every real fragment instead of crashing
    /// discovery. Real fragments always start at 001.
    pub fn sequence_of(&self, file_name: &str) -> u64 {
        self.re
            .captures(file_name)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    }
}

/// Derives the container base name from a fragment filename: the stem text
/// preceding the first `.part` marker, or the whole stem if no marker exists.
pub fn base_name_of(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    match find_part_marker(&stem) {
        Some(idx) => stem[..idx].to_string(),
        None => stem,
    }
}

fn find_part_marker(stem: &str) -> Option<usize> {
    stem.as_bytes()
        .windows(5)
        .position(|w| w.eq_ignore_ascii_case(b".part"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_zero_padded() {
        assert_eq!(fragment_file_name("photos", 1, "b64"), "photos.part001.b64");
        assert_eq!(fragment_file_name("photos", 42, "b64"), "photos.part042.b64");
        assert_eq!(fragment_file_name("a.b", 7, "txt"), "a.b.part007.txt");
    }

    #[test]
    fn sequence_parsing_is_case_insensitive() {
        let m = SequenceMatcher::new("b64").unwrap();
        assert_eq!(m.sequence_of("photos.part003.b64"), 3);
        assert_eq!(m.sequence_of("photos.PART010.B64"), 10);
        assert_eq!(m.sequence_of("photos.Part999.b64"), 999);
    }

    #[test]
    fn non_matching_names_sort_as_zero() {
        let m = SequenceMatcher::new("b64").unwrap();
        assert_eq!(m.sequence_of("notes.b64"), 0);
        assert_eq!(m.sequence_of("photos.part12.b64"), 0);
        assert_eq!(m.sequence_of("photos.part001.txt"), 0);
    }

    #[test]
    fn stray_files_sort_ahead_without_disturbing_real_fragments() {
        let m = SequenceMatcher::new("b64").unwrap();
        let mut names = vec![
            "photos.part003.b64",
            "stray-notes.b64",
            "photos.part001.b64",
            "photos.part002.b64",
        ];
        names.sort_by_key(|n| m.sequence_of(n));
        assert_eq!(
            names,
            vec![
                "stray-notes.b64",
                "photos.part001.b64",
                "photos.part002.b64",
                "photos.part003.b64",
            ]
        );
    }

    #[test]
    fn escaped_extension_is_matched_literally() {
        // A regex metacharacter in the extension must not widen the match.
        let m = SequenceMatcher::new("b+4").unwrap();
        assert_eq!(m.sequence_of("x.part001.b+4"), 1);
        assert_eq!(m.sequence_of("x.part001.bb4"), 0);
    }

    #[test]
    fn base_name_strips_the_part_marker() {
        assert_eq!(base_name_of("photos.part001.b64"), "photos");
        assert_eq!(base_name_of("photos.PART001.b64"), "photos");
        assert_eq!(base_name_of("my.album.part002.b64"), "my.album");
        assert_eq!(base_name_of("loose.b64"), "loose");
    }

    #[test]
    fn extension_validation() {
        assert!(validate_extension("b64").is_ok());
        assert!(validate_extension("").is_err());
        assert!(validate_extension("b.64").is_err());
        assert!(validate_extension("b/64").is_err());
    }
}
