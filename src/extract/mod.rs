//! # Container Expansion
//!
//! Expands a reconstructed ZIP container into a destination directory.
//!
//! Placement asymmetry: a container with exactly one entry writes that file
//! directly into the destination; a container with more than one entry nests
//! everything under `<destination>/<base>/`. The base name comes from the
//! fragment filenames, never from anything stored inside the container.

use std::fs::{self, File};
use std::io::{self, Read, Seek};
use std::path::Path;

use tracing::debug;

use crate::error::SplitzipError;
use crate::progress::{Phase, Progress};

/// Expands every entry of the container in `reader` under `dst`, in stored
/// order, emitting one `extracting` event pair per entry.
///
/// Entry names are validated before anything is written: a name that would
/// resolve outside the target directory (absolute, or containing `..`
/// segments) fails the whole operation.
pub(crate) fn unpack_container<R: Read + Seek>(
    reader: R,
    base_name: &str,
    dst: &Path,
    progress: Progress<'_>,
) -> Result<(), SplitzipError> {
    let mut container = zip::ZipArchive::new(reader)?;
    let total = container.len() as u64;

    let target = if total > 1 {
        let nested = dst.join(base_name);
        fs::create_dir_all(&nested).map_err(SplitzipError::io_at(&nested))?;
        nested
    } else {
        dst.to_path_buf()
    };
    debug!(total, target = %target.display(), "expanding container");

    for i in 0..container.len() {
        progress.emit(Phase::Extracting, i as u64, total);

        let mut entry = container.by_index(i)?;
        let rel = match entry.enclosed_name() {
            Some(p) => p.to_path_buf(),
            None => {
                return Err(SplitzipError::UnsafeEntryName {
                    name: entry.name().to_string(),
                })
            }
        };
        let out_path = target.join(rel);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(SplitzipError::io_at(&out_path))?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent).map_err(SplitzipError::io_at(parent))?;
            }
            let mut output = File::create(&out_path).map_err(SplitzipError::io_at(&out_path))?;
            io::copy(&mut entry, &mut output).map_err(SplitzipError::io_at(&out_path))?;
        }

        progress.emit(Phase::Extracting, i as u64 + 1, total);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;
    use zip::write::FileOptions;

    fn container_with(entries: &[(&str, &[u8])]) -> Cursor<Vec<u8>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in entries {
            writer.start_file(*name, FileOptions::default()).unwrap();
            use std::io::Write;
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap()
    }

    #[test]
    fn single_entry_lands_directly_in_destination() {
        let dst = tempdir().unwrap();
        let container = container_with(&[("only.txt", b"solo")]);
        unpack_container(container, "stuff", dst.path(), Progress::new(None)).unwrap();

        assert_eq!(fs::read(dst.path().join("only.txt")).unwrap(), b"solo");
        assert!(!dst.path().join("stuff").exists());
    }

    #[test]
    fn multiple_entries_nest_under_base_name() {
        let dst = tempdir().unwrap();
        let container = container_with(&[("a.txt", b"a"), ("dir/b.txt", b"b")]);
        unpack_container(container, "stuff", dst.path(), Progress::new(None)).unwrap();

        assert_eq!(fs::read(dst.path().join("stuff/a.txt")).unwrap(), b"a");
        assert_eq!(fs::read(dst.path().join("stuff/dir/b.txt")).unwrap(), b"b");
    }

    #[test]
    fn traversal_entry_name_rejects_the_operation() {
        let dst = tempdir().unwrap();
        let container = container_with(&[("../evil.txt", b"owned")]);
        let err =
            unpack_container(container, "stuff", dst.path(), Progress::new(None)).unwrap_err();
        assert!(matches!(err, SplitzipError::UnsafeEntryName { .. }));
        assert!(!dst.path().join("../evil.txt").exists());
    }
}
