//! # Join Pipeline
//!
//! Discovers fragment files by extension, orders them by their embedded
//! sequence number (never by directory iteration or lexical order), decodes
//! and concatenates them into a temporary ZIP container, then expands that
//! container into the destination.

use std::fs;
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::SplitzipError;
use crate::extract;
use crate::fragment::{self, SequenceMatcher};
use crate::progress::{Phase, Progress, ProgressCallback};
use crate::split::discard;

/// Reassembles the fragments in `src` and extracts the result under `dst`.
///
/// Returns `dst` exactly as passed in. Whether the restored files sit
/// directly in `dst` or under a `<base>` subdirectory depends on the entry
/// count of the reconstructed container, so callers that need the precise
/// location must apply the same one-entry rule themselves.
pub fn join(
    src: &Path,
    dst: &Path,
    extension: &str,
    progress: Option<&ProgressCallback>,
) -> Result<PathBuf, SplitzipError> {
    fragment::validate_extension(extension)?;
    let progress = Progress::new(progress);
    fs::create_dir_all(dst).map_err(SplitzipError::io_at(dst))?;

    let matcher = SequenceMatcher::new(extension)?;
    let fragments = discover_fragments(src, extension, &matcher)?;
    let total = fragments.len() as u64;

    let first_name = fragments[0]
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = fragment::base_name_of(&first_name);
    debug!(total, base, "reassembling container from fragments");

    let mut container = NamedTempFile::new()?;
    for (i, path) in fragments.iter().enumerate() {
        progress.emit(Phase::Decoding, i as u64, total);

        let text = fs::read(path).map_err(SplitzipError::io_at(path))?;
        // Tolerate whitespace picked up in transit; anything else is corruption.
        let text: Vec<u8> = text
            .into_iter()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        let bytes = STANDARD.decode(&text).map_err(|source| SplitzipError::Decode {
            source,
            path: path.clone(),
        })?;
        container.as_file_mut().write_all(&bytes)?;

        progress.emit(Phase::Decoding, i as u64 + 1, total);
    }

    container.as_file_mut().seek(SeekFrom::Start(0))?;
    extract::unpack_container(container.as_file(), &base, dst, progress)?;

    discard(container);
    Ok(dst.to_path_buf())
}

/// Lists `*.<ext>` files in `src` (extension match is case-insensitive) in
/// ascending sequence order. Zero matches is a hard error: an empty fragment
/// set has nothing to reconstruct.
fn discover_fragments(
    src: &Path,
    extension: &str,
    matcher: &SequenceMatcher,
) -> Result<Vec<PathBuf>, SplitzipError> {
    let mut fragments = Vec::new();
    let entries = fs::read_dir(src).map_err(SplitzipError::io_at(src))?;
    for entry in entries {
        let entry = entry.map_err(SplitzipError::io_at(src))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .map(|e| e.to_string_lossy().eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if matches {
            fragments.push(path);
        }
    }

    if fragments.is_empty() {
        return Err(SplitzipError::NotFound {
            extension: extension.to_string(),
            dir: src.to_path_buf(),
        });
    }

    fragments.sort_by_key(|p| {
        p.file_name()
            .map(|n| matcher.sequence_of(&n.to_string_lossy()))
            .unwrap_or(0)
    });
    Ok(fragments)
}
