//! Directory reading operations.

use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::fs::file::File;
use crate::fs::path::path_fix;
use crate::seq::extensions::SeqExtensions;

/// Reads the immediate contents of a directory and returns them as stat-ed
/// [`File`] values, one per name on disk.
///
/// The returned entries are **unsorted** and not yet grouped into
/// sequences. Use [`crate::sort`] and then [`crate::seq_compress`] for
/// that. Names are normalised to NFC. Entries that cannot be stat-ed are
/// skipped.
///
/// # Errors
///
/// - [`CoreError::NotFound`]: the path does not exist.
/// - [`CoreError::NotADirectory`]: the path is not a directory.
/// - [`CoreError::PermissionDenied`]: read access is denied.
/// - [`CoreError::Io`]: any other I/O error.
///
/// # Examples
///
/// ```no_run
/// use seqfm_core::{read_directory, SeqExtensions};
/// use std::path::Path;
///
/// let exts = SeqExtensions::new([".exr"]);
/// let files = read_directory(Path::new("/shots/sh010/comp"), &exts).unwrap();
/// for file in &files {
///     println!("{}", file.name());
/// }
/// ```
pub fn read_directory(path: &Path, extensions: &SeqExtensions) -> CoreResult<Vec<File>> {
    if !path.exists() {
        return Err(CoreError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(CoreError::NotADirectory(path.to_path_buf()));
    }

    let read_dir = std::fs::read_dir(path).map_err(|e| CoreError::from_io(path, e))?;
    let prefix = path_fix(&path.to_string_lossy());

    let mut files = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!(dir = %path.display(), %err, "skipping unreadable entry");
                continue;
            }
        };
        let name = crate::nfc_string(&dir_entry.file_name().to_string_lossy());
        let mut file = File::new(&format!("{prefix}{name}"), extensions);
        if !file.stat() {
            tracing::warn!(name = %name, "skipping entry that could not be stat-ed");
            continue;
        }
        files.push(file);
    }

    tracing::debug!(dir = %path.display(), count = files.len(), "read directory");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::file::FileType;
    use std::fs;
    use tempfile::TempDir;

    fn exts() -> SeqExtensions {
        SeqExtensions::new([".exr"])
    }

    #[test]
    fn read_directory_lists_entries() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("render.0001.exr"), "a").unwrap();
        fs::write(tmp.path().join("render.0002.exr"), "bb").unwrap();
        fs::create_dir(tmp.path().join("comp")).unwrap();

        let mut files = read_directory(tmp.path(), &exts()).unwrap();
        files.sort_by_key(File::name);

        let names: Vec<String> = files.iter().map(File::name).collect();
        assert_eq!(names, vec!["comp", "render.0001.exr", "render.0002.exr"]);
        assert_eq!(files[0].file_type(), FileType::Directory);
        assert_eq!(files[2].size(), 2);
        assert!(files[1].has_seq_extension());
    }

    #[test]
    fn read_directory_entries_carry_full_path() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "").unwrap();

        let files = read_directory(tmp.path(), &exts()).unwrap();
        let full = files[0].get(None, true);
        assert!(Path::new(&full).exists());
        assert!(full.ends_with("a.txt"));
    }

    #[test]
    fn read_directory_empty() {
        let tmp = TempDir::new().unwrap();
        let files = read_directory(tmp.path(), &exts()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn read_directory_missing_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = read_directory(&tmp.path().join("nope"), &exts());
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[test]
    fn read_directory_on_file_is_not_a_directory() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("plate.exr");
        fs::write(&file, "").unwrap();

        let result = read_directory(&file, &exts());
        assert!(matches!(result, Err(CoreError::NotADirectory(_))));
    }

    #[test]
    fn read_directory_unicode_names() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("렌더.0001.exr"), "").unwrap();

        let files = read_directory(tmp.path(), &exts()).unwrap();
        assert_eq!(files[0].base(), "렌더.");
        assert_eq!(files[0].number(), "0001");
    }
}
