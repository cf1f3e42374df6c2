use crate::constants::{IGNORE_FILE, MANIFEST_FILENAMES};
use crate::error::Result;
use crate::ext::PathExt;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

/// Default patterns to always ignore inside template directories
const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git/**",
    ".git",
    ".hg/**",
    ".hg",
    ".svn/**",
    ".svn",
    "**/.DS_Store",
    IGNORE_FILE,
];

/// Builds the ignore set for a template directory.
///
/// Patterns are relative to `template_root` and come from three places: the
/// built-in list (VCS metadata, manifests), the `.configrenderignore` file at
/// the root if present, and `extra_patterns` from the manifest.
pub fn parse_ignore_file<P: AsRef<Path>>(
    template_root: P,
    extra_patterns: &[String],
) -> Result<GlobSet> {
    let template_root = template_root.as_ref();
    let ignore_path = template_root.join(IGNORE_FILE);

    let mut patterns: Vec<String> = DEFAULT_IGNORE_PATTERNS
        .iter()
        .chain(MANIFEST_FILENAMES.iter())
        .map(|pattern| pattern.to_string())
        .collect();

    if let Ok(contents) = read_to_string(&ignore_path) {
        patterns.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string),
        );
    } else {
        debug!("No {IGNORE_FILE} file found in '{}'.", template_root.display());
    }
    patterns.extend(extra_patterns.iter().cloned());

    // The root is literal text, only the patterns below it are globs
    let escaped_root = PathBuf::from(globset::escape(template_root.to_str_checked()?));
    let mut builder = GlobSetBuilder::new();
    for pattern in &patterns {
        let rooted = escaped_root.join(pattern);
        builder.add(Glob::new(rooted.to_str_checked()?)?);
    }
    debug!("Ignore patterns for '{}': {:?}", template_root.display(), patterns);
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_cover_vcs_and_manifests() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let set = parse_ignore_file(root, &[]).unwrap();
        assert!(set.is_match(root.join(".git/config.j2")));
        assert!(set.is_match(root.join("config_render.yaml")));
        assert!(set.is_match(root.join("nested/.DS_Store")));
        assert!(!set.is_match(root.join("app.conf.j2")));
    }

    #[test]
    fn reads_ignore_file_and_skips_comments() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::write(root.join(IGNORE_FILE), "# drafts\n\ndrafts/**\n*.bak.j2\n").unwrap();
        let set = parse_ignore_file(root, &[]).unwrap();
        assert!(set.is_match(root.join("drafts/site.conf.j2")));
        assert!(set.is_match(root.join("old.bak.j2")));
        assert!(!set.is_match(root.join("# drafts")));
    }

    #[test]
    fn extra_patterns_apply() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let set = parse_ignore_file(root, &["partials/**".to_string()]).unwrap();
        assert!(set.is_match(root.join("partials/header.j2")));
    }

    #[test]
    fn root_with_glob_characters_is_literal() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("configs [prod]");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(root.join(IGNORE_FILE), "drafts/**\n").unwrap();

        let set = parse_ignore_file(&root, &[]).unwrap();
        assert!(set.is_match(root.join("drafts/site.conf.j2")));
        assert!(set.is_match(root.join(".git/config")));
        assert!(!set.is_match(root.join("site.conf.j2")));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(parse_ignore_file(dir.path(), &["a[".to_string()]).is_err());
    }
}
