//! Resolution of template inputs into source/target pairs.

use std::path::{Path, PathBuf};

use log::{debug, trace};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::ext::PathExt;

/// A single template to render and where its output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    /// Template file to read.
    pub source: PathBuf,
    /// Output path before its own template expressions are rendered.
    pub target: PathBuf,
    /// Directory includes and ignore patterns are resolved against.
    pub root: PathBuf,
    /// Named directly by the user rather than found by walking a directory.
    pub explicit: bool,
}

/// Finds templates for a given suffix.
pub struct TemplateDiscovery<'a> {
    suffix: &'a str,
}

impl<'a> TemplateDiscovery<'a> {
    pub fn new(suffix: &'a str) -> Self {
        Self { suffix }
    }

    /// Expands one input into render jobs.
    ///
    /// A file input yields one job. Without `output` its target is the file
    /// with the suffix stripped; with a directory-like `output` it lands in
    /// that directory; otherwise `output` is the target file. A directory input
    /// yields every file below it carrying the suffix, mirrored into `output`
    /// (or rendered in place when no output is given).
    pub fn discover(&self, input: &Path, output: Option<&Path>) -> Result<Vec<RenderJob>> {
        if input.is_dir() {
            self.discover_directory(input, output)
        } else if input.is_file() {
            self.discover_file(input, output).map(|job| vec![job])
        } else {
            Err(Error::TemplateNotFound { path: input.display().to_string() })
        }
    }

    fn discover_file(&self, input: &Path, output: Option<&Path>) -> Result<RenderJob> {
        let file_name = input.file_name().map(PathBuf::from).unwrap_or_default();
        let stripped_name = Path::new(&file_name)
            .strip_template_suffix(self.suffix)
            .unwrap_or_else(|| file_name.clone());

        let target = match output {
            Some(output) if is_dir_like(output) => output.join(&stripped_name),
            Some(output) => output.to_path_buf(),
            None => input.strip_template_suffix(self.suffix).ok_or_else(|| {
                Error::MissingOutput {
                    path: input.display().to_string(),
                    suffix: self.suffix.to_string(),
                }
            })?,
        };

        if same_file(input, &target) {
            return Err(Error::MissingOutput {
                path: input.display().to_string(),
                suffix: self.suffix.to_string(),
            });
        }

        let root = input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        trace!("Template '{}' renders to '{}'", input.display(), target.display());
        Ok(RenderJob { source: input.to_path_buf(), target, root, explicit: true })
    }

    fn discover_directory(&self, input: &Path, output: Option<&Path>) -> Result<Vec<RenderJob>> {
        let output_root = output.unwrap_or(input);
        let mut jobs = Vec::new();

        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(stripped) = path.strip_template_suffix(self.suffix) else {
                trace!("Skipping '{}' (not a template)", path.display());
                continue;
            };
            let relative = stripped.strip_prefix(input).map_err(|e| Error::ProcessError {
                source_path: path.display().to_string(),
                e: e.to_string(),
            })?;
            jobs.push(RenderJob {
                source: path.to_path_buf(),
                target: output_root.join(relative),
                root: input.to_path_buf(),
                explicit: false,
            });
        }

        debug!("Found {} template(s) in '{}'", jobs.len(), input.display());
        Ok(jobs)
    }
}

/// Whether `path` names a directory, existing or spelled with a trailing separator.
pub fn is_dir_like(path: &Path) -> bool {
    if path.is_dir() {
        return true;
    }
    path.to_str()
        .is_some_and(|s| s.ends_with('/') || s.ends_with(std::path::MAIN_SEPARATOR))
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
