use std::path::PathBuf;

#[derive(Debug)]
pub enum RenderOperation {
    Write { source: PathBuf, target: PathBuf, content: String, target_exists: bool },
    Unchanged { source: PathBuf, target: PathBuf },
    Ignore { source: PathBuf },
}

impl RenderOperation {
    /// Returns the target path for this operation, if it has one.
    pub fn target_path(&self) -> Option<&PathBuf> {
        match self {
            RenderOperation::Write { target, .. } => Some(target),
            RenderOperation::Unchanged { target, .. } => Some(target),
            RenderOperation::Ignore { .. } => None,
        }
    }

    /// Gets a message describing the operation and its status.
    ///
    /// # Arguments
    /// * `user_confirmed_overwrite` - Whether overwriting an existing file was allowed
    /// * `dry_run` - Whether this is a dry run (no actual file operations)
    pub fn get_message(&self, user_confirmed_overwrite: bool, dry_run: bool) -> String {
        let prefix = if dry_run { "[DRY RUN] " } else { "" };

        match self {
            RenderOperation::Write { source, target, target_exists, .. } => {
                if *target_exists {
                    if user_confirmed_overwrite {
                        format!(
                            "{}Rendering '{}' to '{}' (overwriting existing file)",
                            prefix,
                            source.display(),
                            target.display()
                        )
                    } else {
                        format!(
                            "{}Skipping '{}' (target '{}' already exists)",
                            prefix,
                            source.display(),
                            target.display()
                        )
                    }
                } else {
                    format!(
                        "{}Rendering '{}' to '{}'",
                        prefix,
                        source.display(),
                        target.display()
                    )
                }
            }

            RenderOperation::Unchanged { target, .. } => {
                format!("{}Keeping '{}' (already up to date)", prefix, target.display())
            }

            RenderOperation::Ignore { source } => {
                format!("{}Ignoring '{}' (matches ignore pattern)", prefix, source.display())
            }
        }
    }
}
