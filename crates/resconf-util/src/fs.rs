use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Create `dir` and any missing parents. An existing directory is not an error.
///
/// # Errors
/// Returns an error if the directory cannot be created, or if `dir` exists
/// but is not a directory.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

/// Atomically replace `path` with `bytes`.
///
/// The content is staged in a temp file next to the target (same filesystem)
/// and renamed into place, so readers see either the old file or the new one.
///
/// # Errors
/// Returns an error if the temp file cannot be written or persisted.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(parent)?;
    staged.write_all(bytes)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Remove each of `paths`, ignoring files that are already gone.
///
/// Used to undo a partially populated output directory. Returns the first
/// error other than `NotFound`, after attempting every path.
///
/// # Errors
/// Returns the first removal failure.
pub fn remove_files(paths: &[PathBuf]) -> io::Result<()> {
    let mut first_err = None;
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            if e.kind() != io::ErrorKind::NotFound && first_err.is_none() {
                first_err = Some(e);
            }
        }
    }
    first_err.map_or(Ok(()), Err)
}

/// List every regular file under `root`, as paths relative to `root`.
///
/// Separators are normalized to `/` and the result is sorted, so the listing
/// is stable across platforms and runs.
///
/// # Errors
/// Returns an error if the tree cannot be walked.
pub fn list_files(root: &Path) -> io::Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        files.push(rel.to_string_lossy().replace('\\', "/"));
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_tolerates_existing() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_ensure_dir_fails_on_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("config");
        fs::write(&file, "not a dir").unwrap();

        assert!(ensure_dir(&file).is_err());
    }

    #[test]
    fn test_write_atomic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.js");

        write_atomic(&path, b"hello").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");

        // Overwrite
        write_atomic(&path, b"world").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "world");
    }

    #[test]
    fn test_write_atomic_no_temp_left_on_success() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.js");

        write_atomic(&path, b"content").unwrap();

        assert_eq!(list_files(dir.path()).unwrap(), vec!["out.js"]);
    }

    #[test]
    fn test_write_atomic_missing_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.js");

        assert!(write_atomic(&path, b"x").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_remove_files_ignores_missing() {
        let dir = tempdir().unwrap();
        let present = dir.path().join("a.js");
        fs::write(&present, "a").unwrap();
        let absent = dir.path().join("b.js");

        remove_files(&[present.clone(), absent]).unwrap();
        assert!(!present.exists());
    }

    #[test]
    fn test_list_files_sorted_and_relative() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();
        fs::write(dir.path().join("config").join("z.js"), "").unwrap();
        fs::write(dir.path().join("config").join("a.d.ts"), "").unwrap();
        fs::write(dir.path().join("top.txt"), "").unwrap();

        let files = list_files(dir.path()).unwrap();
        assert_eq!(files, vec!["config/a.d.ts", "config/z.js", "top.txt"]);
    }
}
