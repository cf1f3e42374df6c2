use globset::GlobSet;
use log::trace;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::renderer::TemplateRenderer;

use super::discovery::RenderJob;
use super::operation::RenderOperation;

pub struct TemplateProcessor<'a> {
    /// Dependencies
    engine: &'a dyn TemplateRenderer,
    ignore: &'a GlobSet,

    /// Other
    context: &'a serde_json::Value,
}

impl<'a> TemplateProcessor<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        context: &'a serde_json::Value,
        ignore: &'a GlobSet,
    ) -> Self {
        Self { engine, context, ignore }
    }

    /// Validates that rendering did not empty out any path component.
    ///
    /// # Examples
    ///
    /// Valid case:
    /// - Template path: `out/{% if tls %}tls{% endif %}/cert.pem`
    /// - Rendered path (when tls=true): `out/tls/cert.pem`
    ///
    /// Invalid case:
    /// - Rendered path (when tls=false): `out//cert.pem` (contains empty part)
    fn has_valid_rendered_path_parts<S: AsRef<str>>(
        &self,
        template_path: S,
        rendered_path: S,
    ) -> bool {
        let template_path: Vec<&str> =
            template_path.as_ref().split(std::path::MAIN_SEPARATOR).collect();
        let rendered_path: Vec<&str> =
            rendered_path.as_ref().split(std::path::MAIN_SEPARATOR).collect();

        template_path
            .iter()
            .zip(rendered_path.iter())
            .all(|(template_part, rendered_part)| {
                template_part.is_empty() || !rendered_part.is_empty()
            })
    }

    /// Renders the expressions in a target path.
    fn render_target(&self, target: &Path) -> Result<PathBuf> {
        let template_target = target.to_str_checked()?;
        let rendered = self.engine.render_path(target, self.context)?;

        if !self.has_valid_rendered_path_parts(template_target, rendered.as_str()) {
            return Err(Error::ProcessError {
                source_path: rendered,
                e: "The rendered path is not valid".to_string(),
            });
        }

        Ok(PathBuf::from(rendered))
    }

    /// Name used for the template in error messages.
    fn template_name(job: &RenderJob) -> String {
        job.source
            .strip_prefix(&job.root)
            .unwrap_or(&job.source)
            .to_string_lossy()
            .replace('\\', "/")
    }

    /// Renders a job and determines the operation to perform.
    pub fn process(&self, job: &RenderJob) -> Result<RenderOperation> {
        if !job.explicit && self.ignore.is_match(&job.source) {
            return Ok(RenderOperation::Ignore { source: job.source.clone() });
        }

        let target = self.render_target(&job.target)?;
        let template_content = fs::read_to_string(&job.source).map_err(|e| {
            Error::ProcessError { source_path: job.source.display().to_string(), e: e.to_string() }
        })?;
        let name = Self::template_name(job);
        trace!("Rendering template '{name}'");
        let content = self.engine.render(&template_content, self.context, Some(&name))?;

        let target_exists = target.exists();
        if target_exists && target.is_file() {
            let current = fs::read(&target)?;
            if current == content.as_bytes() {
                return Ok(RenderOperation::Unchanged { source: job.source.clone(), target });
            }
        }

        Ok(RenderOperation::Write { source: job.source.clone(), target, content, target_exists })
    }
}
