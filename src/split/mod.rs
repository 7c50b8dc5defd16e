//! # Split Pipeline
//!
//! Builds the temporary ZIP container for a source tree, then cuts it into
//! fixed-size byte windows and writes each window as a base64 text fragment.
//! The container only ever lives in a scratch file and is removed on every
//! exit path; the fragments are the sole durable output.

use std::fs;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::archive;
use crate::error::SplitzipError;
use crate::fragment::{self, DEFAULT_EXTENSION};
use crate::progress::{Phase, Progress, ProgressCallback};

/// Default byte-window size for fragments: 16 MiB.
pub const DEFAULT_CHUNK_SIZE: u64 = 16 * 1024 * 1024;

/// Tunables for a split operation.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Size of each container byte window; the last window may be shorter.
    pub chunk_size: u64,
    /// Filename extension given to fragment files.
    pub extension: String,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

/// Splits the directory tree at `src` into encoded fragments under `dst`.
///
/// Placement mirrors extraction: a single fragment is written directly into
/// `dst`, two or more go under `<dst>/<base>/`. The returned paths are in
/// ascending sequence order and are the only way the caller learns which of
/// the two layouts was chosen.
///
/// A source tree with no regular files produces an empty container and
/// therefore no fragments; the call succeeds and returns an empty list.
pub fn split(
    src: &Path,
    dst: &Path,
    opts: &SplitOptions,
    progress: Option<&ProgressCallback>,
) -> Result<Vec<PathBuf>, SplitzipError> {
    if opts.chunk_size == 0 {
        return Err(SplitzipError::InvalidConfig(
            "chunk size must be positive".into(),
        ));
    }
    fragment::validate_extension(&opts.extension)?;
    let progress = Progress::new(progress);

    let src = src.canonicalize().map_err(SplitzipError::io_at(src))?;
    let base = src
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            SplitzipError::InvalidConfig(format!(
                "source directory '{}' has no base name",
                src.display()
            ))
        })?;
    fs::create_dir_all(dst).map_err(SplitzipError::io_at(dst))?;

    let mut container = NamedTempFile::new()?;
    progress.emit(Phase::Compressing, 0, 1);
    let entries = archive::pack_dir(&src, container.as_file_mut())?;
    progress.emit(Phase::Compressing, 1, 1);

    if entries == 0 {
        debug!(src = %src.display(), "source tree holds no files, nothing to split");
        discard(container);
        return Ok(Vec::new());
    }

    let container_size = container.as_file().metadata()?.len();
    let total = container_size.div_ceil(opts.chunk_size);
    debug!(container_size, total, "container built, fragmenting");

    let target_dir = if total > 1 {
        let nested = dst.join(&base);
        fs::create_dir_all(&nested).map_err(SplitzipError::io_at(&nested))?;
        nested
    } else {
        dst.to_path_buf()
    };

    container.as_file_mut().seek(SeekFrom::Start(0))?;
    let mut written = Vec::with_capacity(total as usize);
    for seq in 1..=total {
        progress.emit(Phase::Splitting, seq - 1, total);

        let mut window = Vec::new();
        container
            .as_file()
            .take(opts.chunk_size)
            .read_to_end(&mut window)?;

        let name = fragment::fragment_file_name(&base, seq, &opts.extension);
        let path = target_dir.join(name);
        fs::write(&path, STANDARD.encode(&window)).map_err(SplitzipError::io_at(&path))?;

        progress.emit(Phase::Splitting, seq, total);
        written.push(path);
    }

    discard(container);
    Ok(written)
}

/// Best-effort removal of the scratch container; never raises.
pub(crate) fn discard(container: NamedTempFile) {
    if let Err(e) = container.close() {
        warn!("failed to remove temporary container: {e}");
    }
}
