//! Category derivation from posting paths.
//!
//! A posting's category is not stored in the file; it comes from where the
//! file sits in the corpus tree. Two rules are supported:
//!
//! - [`CategoryRule::ParentDir`] (default) uses the name of the directory that
//!   directly contains the file, so `corpus/rec.autos/101551` is labelled
//!   `rec.autos` no matter how deep `corpus` itself is.
//! - [`CategoryRule::PathSegment`] splits the path string on the platform
//!   separator and takes a fixed element. `PathSegment(2)` reproduces the
//!   classic "third segment" layout of `<root>/<group>/<category>/<file>`
//!   invocations and is sensitive to the depth of the path passed in.

use std::fmt;
use std::path::{MAIN_SEPARATOR, Path};

/// How a category label is derived from a posting's path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryRule {
    /// Name of the file's immediate parent directory.
    #[default]
    ParentDir,
    /// Element `n` (0-based) of the path string split on the path separator.
    PathSegment(usize),
}

impl CategoryRule {
    /// Derive the category for `path`, or `None` if the rule cannot be applied.
    #[must_use]
    pub fn derive(&self, path: &Path) -> Option<String> {
        match *self {
            Self::ParentDir => path
                .parent()
                .and_then(Path::file_name)
                .and_then(|name| name.to_str())
                .map(str::to_owned),
            Self::PathSegment(index) => path
                .to_str()?
                .split(MAIN_SEPARATOR)
                .nth(index)
                .map(str::to_owned),
        }
    }
}

impl fmt::Display for CategoryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParentDir => write!(f, "parent directory"),
            Self::PathSegment(index) => write!(f, "path segment {index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn p(parts: &[&str]) -> PathBuf {
        parts.iter().collect()
    }

    #[test]
    fn parent_dir_uses_enclosing_folder() {
        let path = p(&["root", "group", "20_newsgroups", "rec.sport", "102"]);
        assert_eq!(
            CategoryRule::ParentDir.derive(&path).as_deref(),
            Some("rec.sport")
        );
    }

    #[test]
    fn path_segment_is_positional() {
        let path = p(&["root", "group", "20_newsgroups", "rec.sport", "102"]);
        assert_eq!(
            CategoryRule::PathSegment(2).derive(&path).as_deref(),
            Some("20_newsgroups")
        );
    }

    #[test]
    fn path_segment_out_of_range() {
        let path = p(&["root", "102"]);
        assert_eq!(CategoryRule::PathSegment(2).derive(&path), None);
    }

    #[test]
    fn bare_file_name_has_no_parent_category() {
        assert_eq!(CategoryRule::ParentDir.derive(Path::new("102")), None);
    }
}
