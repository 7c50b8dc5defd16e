//! # Container Construction
//!
//! Builds the intermediate ZIP container for the split pipeline: every
//! regular file under the source tree becomes one DEFLATE-compressed entry
//! whose name is its path relative to the source root, with forward-slash
//! separators regardless of the host platform. Directories are structural
//! only and never stored as entries. The walk is sorted so the same tree
//! always produces the same entry order.

use std::fs::File;
use std::io::{self, Seek, Write};
use std::path::Path;

use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::CompressionMethod;

use crate::error::SplitzipError;

/// Packs the directory tree rooted at `src` into `writer` as a ZIP archive.
///
/// Returns the number of entries written. A missing or unreadable source
/// directory surfaces as an [`SplitzipError::Io`] carrying the path.
pub fn pack_dir<W: Write + Seek>(src: &Path, writer: W) -> Result<u64, SplitzipError> {
    let mut container = zip::ZipWriter::new(writer);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = 0u64;
    for item in WalkDir::new(src).sort_by_file_name() {
        let item = item.map_err(|e| SplitzipError::Io {
            source: e.into(),
            path: src.to_path_buf(),
        })?;
        if !item.file_type().is_file() {
            continue;
        }

        let rel = item
            .path()
            .strip_prefix(src)
            .map_err(|_| SplitzipError::StripPrefix {
                prefix: src.to_path_buf(),
                path: item.path().to_path_buf(),
            })?;
        let entry_name = posix_entry_name(rel);

        container.start_file(entry_name, options)?;
        let mut input = File::open(item.path()).map_err(SplitzipError::io_at(item.path()))?;
        io::copy(&mut input, &mut container).map_err(SplitzipError::io_at(item.path()))?;
        entries += 1;
    }

    let mut inner = container.finish()?;
    inner.flush()?;
    Ok(entries)
}

/// Joins path components with `/` so entry names are portable across hosts.
fn posix_entry_name(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn pack_to_vec(src: &Path) -> (u64, Vec<u8>) {
        let mut buf = Cursor::new(Vec::new());
        let count = pack_dir(src, &mut buf).unwrap();
        (count, buf.into_inner())
    }

    #[test]
    fn packs_nested_tree_with_posix_names() {
        let src = tempdir().unwrap();
        fs::write(src.path().join("a.txt"), b"alpha").unwrap();
        fs::create_dir_all(src.path().join("sub/deep")).unwrap();
        fs::write(src.path().join("sub/deep/b.bin"), [0u8, 1, 2, 3]).unwrap();

        let (count, bytes) = pack_to_vec(src.path());
        assert_eq!(count, 2);

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: BTreeSet<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert!(names.contains("a.txt"));
        assert!(names.contains("sub/deep/b.bin"));
    }

    #[test]
    fn empty_directory_yields_zero_entries() {
        let src = tempdir().unwrap();
        let (count, bytes) = pack_to_vec(src.path());
        assert_eq!(count, 0);

        // Still a structurally valid (empty) archive.
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn missing_source_fails_with_io_error() {
        let scratch = tempdir().unwrap();
        let gone = scratch.path().join("does-not-exist");
        let mut buf = Cursor::new(Vec::new());
        match pack_dir(&gone, &mut buf) {
            Err(SplitzipError::Io { path, .. }) => assert_eq!(path, gone),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
