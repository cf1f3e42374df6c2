use crate::{
    error::{Error, Result},
    prompt::confirm,
    template::RenderOperation,
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// How rendered output reaches its destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// Overwrite changed files without asking.
    pub force: bool,
    /// A user can be asked before overwriting.
    pub interactive: bool,
    pub dry_run: bool,
    /// Report out-of-date files instead of writing them.
    pub check: bool,
    /// Print output instead of writing files.
    pub stdout: bool,
    /// Prefix each printed document with `# <target>`.
    pub separators: bool,
}

/// Counts of what happened to each template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub written: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub ignored: usize,
    /// Targets that differ from their rendered output, collected by `--check`.
    pub out_of_date: Vec<PathBuf>,
}

impl std::fmt::Display for RenderSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rendered, {} unchanged, {} skipped, {} ignored",
            self.written, self.unchanged, self.skipped, self.ignored
        )
    }
}

/// Applies render operations to the filesystem or an output stream.
pub struct FileProcessor<W: Write> {
    options: WriteOptions,
    out: W,
    summary: RenderSummary,
}

impl FileProcessor<std::io::Stdout> {
    pub fn new(options: WriteOptions) -> Self {
        Self::with_writer(options, std::io::stdout())
    }
}

impl<W: Write> FileProcessor<W> {
    pub fn with_writer(options: WriteOptions, out: W) -> Self {
        Self { options, out, summary: RenderSummary::default() }
    }

    /// Handles a single operation and logs what was done.
    pub fn apply(&mut self, operation: &RenderOperation) -> Result<()> {
        log::debug!("Handling render operation: {operation:?}");
        let user_confirmed_overwrite = self.handle_operation(operation)?;
        let message = operation.get_message(user_confirmed_overwrite, self.options.dry_run);
        match operation {
            RenderOperation::Write { target_exists: true, .. } if !user_confirmed_overwrite => {
                log::warn!("{message}")
            }
            _ => log::info!("{message}"),
        }
        Ok(())
    }

    fn handle_operation(&mut self, operation: &RenderOperation) -> Result<bool> {
        match operation {
            RenderOperation::Ignore { .. } => {
                self.summary.ignored += 1;
                Ok(true)
            }
            RenderOperation::Unchanged { target, .. } => {
                if self.options.stdout {
                    let content = fs::read_to_string(target)?;
                    self.print(target, &content)?;
                }
                self.summary.unchanged += 1;
                Ok(true)
            }
            RenderOperation::Write { target, content, target_exists, .. } => {
                if self.options.stdout {
                    self.print(target, content)?;
                    self.summary.written += 1;
                    return Ok(true);
                }
                if self.options.check {
                    self.summary.out_of_date.push(target.clone());
                    return Ok(true);
                }

                let confirmed = !target_exists || self.confirm_overwrite(target)?;
                if confirmed {
                    if !self.options.dry_run {
                        write_atomic(target, content)?;
                    }
                    self.summary.written += 1;
                } else {
                    self.summary.skipped += 1;
                }
                Ok(confirmed)
            }
        }
    }

    fn confirm_overwrite(&self, target: &Path) -> Result<bool> {
        if self.options.force {
            return Ok(true);
        }
        if !self.options.interactive {
            return Ok(false);
        }
        if self.options.dry_run {
            // A dry run reports the write the user would be asked about.
            return Ok(true);
        }
        confirm(false, format!("Overwrite {}?", target.display()))
    }

    fn print(&mut self, target: &Path, content: &str) -> Result<()> {
        if self.options.separators {
            writeln!(self.out, "# {}", target.display())?;
        }
        self.out.write_all(content.as_bytes())?;
        if self.options.separators && !content.ends_with('\n') {
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn summary(&self) -> &RenderSummary {
        &self.summary
    }

    pub fn into_summary(self) -> RenderSummary {
        self.summary
    }
}

/// Replaces `target` with `content` through a temporary file in the same directory.
///
/// Readers never observe a partially written file. On Unix the permissions of an
/// existing target are carried over, and a new file gets `0o666` less the umask
/// like any other created file.
pub fn write_atomic(target: &Path, content: &str) -> Result<()> {
    let parent = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut file = temp_file_in(parent)?;
    file.write_all(content.as_bytes())?;
    file.as_file().sync_all()?;

    #[cfg(unix)]
    if let Ok(metadata) = fs::metadata(target) {
        file.as_file().set_permissions(metadata.permissions())?;
    }

    file.persist(target).map_err(|e| Error::PersistError {
        path: target.display().to_string(),
        e: e.error.to_string(),
    })?;
    Ok(())
}

#[cfg(unix)]
fn temp_file_in(dir: &Path) -> Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    Ok(tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)?)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> Result<NamedTempFile> {
    Ok(NamedTempFile::new_in(dir)?)
}
