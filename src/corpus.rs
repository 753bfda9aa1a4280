//! Corpus enumeration.
//!
//! The corpus is any directory tree; every regular file under it is a
//! candidate posting. Nothing is filtered by name or extension: files that are
//! not postings fail at parse time and show up in the discard report.
//!
//! Enumeration walks the tree without following directory symlinks, so a
//! linked directory is never listed twice and a link back to an ancestor
//! cannot loop. Symlinks that point at regular files are kept. A subdirectory
//! that cannot be read is skipped with a warning; only problems with the root
//! itself are fatal. Results are sorted so repeated runs over the same tree
//! see the same order.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// List every regular file under `root`, recursively, in sorted order.
///
/// Hidden files and directories are included.
///
/// # Errors
///
/// Returns an error if `root` does not exist, is not a directory, or cannot
/// be read.
pub fn enumerate_files(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let meta = std::fs::metadata(root)
        .with_context(|| format!("corpus root {} is not accessible", root.display()))?;
    if !meta.is_dir() {
        bail!("corpus root {} is not a directory", root.display());
    }
    // Fail early on an unreadable root rather than returning an empty listing.
    std::fs::read_dir(root).with_context(|| format!("read directory {}", root.display()))?;

    let mut files = Vec::new();
    let mut skipped = 0usize;
    for entry in WalkDir::new(root).follow_links(false) {
        match entry {
            Ok(entry) => {
                if is_posting_file(&entry) {
                    files.push(entry.into_path());
                }
            }
            Err(err) if err.depth() == 0 => {
                return Err(err).with_context(|| format!("walk corpus under {}", root.display()));
            }
            Err(err) => {
                skipped += 1;
                let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                warn!(path = %path.display(), error = %err, "skipping unreadable corpus entry");
            }
        }
    }
    files.sort();

    debug!(root = %root.display(), files = files.len(), skipped, "enumerated corpus");
    Ok(files)
}

/// Regular files, plus symlinks whose target is a regular file.
fn is_posting_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn lists_nested_files_sorted() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let root = dir.path();
        fs::create_dir_all(root.join("sci.space/deep"))?;
        fs::create_dir_all(root.join("alt.atheism"))?;
        fs::write(root.join("sci.space/61000"), "x")?;
        fs::write(root.join("sci.space/deep/61001"), "x")?;
        fs::write(root.join("alt.atheism/49960"), "x")?;
        fs::write(root.join("alt.atheism/.hidden"), "x")?;

        let files = enumerate_files(root)?;
        let rel: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("alt.atheism/.hidden"),
                PathBuf::from("alt.atheism/49960"),
                PathBuf::from("sci.space/61000"),
                PathBuf::from("sci.space/deep/61001"),
            ]
        );
        Ok(())
    }

    #[test]
    fn directories_are_not_listed() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::create_dir_all(dir.path().join("empty/also_empty"))?;
        assert!(enumerate_files(dir.path())?.is_empty());
        Ok(())
    }

    #[test]
    fn root_with_pattern_metacharacters_is_literal() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let root = dir.path().join("news[2024]");
        fs::create_dir_all(root.join("misc.forsale"))?;
        fs::write(root.join("misc.forsale/1"), "x")?;
        assert_eq!(enumerate_files(&root)?.len(), 1);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_walked() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let root = dir.path();
        fs::create_dir_all(root.join("sci.space"))?;
        fs::write(root.join("sci.space/61000"), "x")?;
        std::os::unix::fs::symlink(root, root.join("sci.space/loop"))?;
        std::os::unix::fs::symlink(root.join("sci.space"), root.join("alias"))?;

        let files = enumerate_files(root)?;
        assert_eq!(files, vec![root.join("sci.space/61000")]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_are_listed() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let root = dir.path();
        fs::create_dir_all(root.join("sci.space"))?;
        fs::write(root.join("sci.space/61000"), "x")?;
        std::os::unix::fs::symlink(root.join("sci.space/61000"), root.join("sci.space/61001"))?;

        assert_eq!(enumerate_files(root)?.len(), 2);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_is_skipped() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir()?;
        let root = dir.path();
        let private = root.join("sci.space/private");
        fs::create_dir_all(&private)?;
        fs::write(private.join("61002"), "x")?;
        fs::write(root.join("sci.space/61000"), "x")?;
        fs::set_permissions(&private, fs::Permissions::from_mode(0o000))?;

        // Permission bits do not restrict root; nothing to check there.
        let denied = fs::read_dir(&private).is_err();
        let result = enumerate_files(root);
        fs::set_permissions(&private, fs::Permissions::from_mode(0o755))?;
        if !denied {
            return Ok(());
        }

        assert_eq!(result?, vec![root.join("sci.space/61000")]);
        Ok(())
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = enumerate_files(dir.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("not accessible"));
    }

    #[test]
    fn file_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("posting");
        fs::write(&file, "x").unwrap();
        let err = enumerate_files(&file).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }
}
