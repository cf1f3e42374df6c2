use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Extension trait for Path with the string and suffix helpers template discovery needs.
pub trait PathExt {
    /// Converts a path to a string slice.
    ///
    /// Fails when the path is not valid Unicode.
    ///
    /// # Examples
    /// ```
    /// use config_render::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("nginx.conf.j2");
    /// assert_eq!(path.to_str_checked().unwrap(), "nginx.conf.j2");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;

    /// Whether the file name ends with `suffix` and has something before it.
    fn has_template_suffix(&self, suffix: &str) -> bool;

    /// The same path with `suffix` removed from the file name.
    ///
    /// Returns `None` when the file name does not carry the suffix.
    ///
    /// # Examples
    /// ```
    /// use config_render::ext::PathExt;
    /// use std::path::{Path, PathBuf};
    ///
    /// let path = Path::new("etc/nginx.conf.j2");
    /// assert_eq!(path.strip_template_suffix(".j2"), Some(PathBuf::from("etc/nginx.conf")));
    /// ```
    fn strip_template_suffix(&self, suffix: &str) -> Option<PathBuf>;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| {
            Error::Other(anyhow::anyhow!(
                "Path '{}' contains invalid Unicode characters",
                self.display()
            ))
        })
    }

    fn has_template_suffix(&self, suffix: &str) -> bool {
        self.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.len() > suffix.len() && name.ends_with(suffix))
    }

    fn strip_template_suffix(&self, suffix: &str) -> Option<PathBuf> {
        if !self.has_template_suffix(suffix) {
            return None;
        }
        let name = self.file_name()?.to_str()?;
        let stripped = name.strip_suffix(suffix)?;
        Some(self.with_file_name(stripped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_to_str_checked_valid() {
        let path = Path::new("valid_path");
        assert_eq!(path.to_str_checked().unwrap(), "valid_path");
    }

    #[test]
    fn suffix_must_leave_a_name() {
        assert!(Path::new("app.conf.j2").has_template_suffix(".j2"));
        assert!(!Path::new(".j2").has_template_suffix(".j2"));
        assert!(!Path::new("app.conf").has_template_suffix(".j2"));
        assert!(!Path::new("app.j2/other").has_template_suffix(".j2"));
    }

    #[test]
    fn strips_only_the_file_name() {
        assert_eq!(
            Path::new("conf.j2/site.conf.j2").strip_template_suffix(".j2"),
            Some(PathBuf::from("conf.j2/site.conf"))
        );
        assert_eq!(Path::new("site.conf").strip_template_suffix(".j2"), None);
        assert_eq!(
            Path::new("app.ini.jinja").strip_template_suffix(".jinja"),
            Some(PathBuf::from("app.ini"))
        );
    }
}
