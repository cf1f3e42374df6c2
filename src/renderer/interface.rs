use crate::error::Result;
use std::path::Path;

/// A templating engine config_render can render through.
pub trait TemplateRenderer {
    /// Makes `template` available under `name` to `include`, `import` and `extends`.
    fn add_template(&mut self, name: &str, template: &str) -> Result<(), minijinja::Error>;

    /// Renders template source against `context`.
    ///
    /// `template_name` identifies the template in error messages.
    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        template_name: Option<&str>,
    ) -> Result<String>;

    /// Renders the template expressions embedded in a path.
    fn render_path(&self, template_path: &Path, context: &serde_json::Value) -> Result<String>;
}
