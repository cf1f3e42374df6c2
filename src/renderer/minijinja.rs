use super::filters::*;
use crate::{error::Result, ext::PathExt, renderer::interface::TemplateRenderer};
use log::trace;
use minijinja::{path_loader, AutoEscape, Environment, UndefinedBehavior};
use std::path::{Path, PathBuf};

/// Knobs applied to the MiniJinja environment.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Undefined variables fail the render instead of rendering empty.
    pub strict: bool,
    /// Directory `include`, `import` and `extends` resolve against.
    pub search_root: Option<PathBuf>,
}

/// Jinja2-compatible renderer backed by minijinja.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a lenient renderer without a template search root.
    pub fn new() -> Self {
        Self::with_options(&RenderOptions::default())
    }

    pub fn with_options(options: &RenderOptions) -> Self {
        let mut env = Environment::new();

        // Config files are not HTML and should end the way the template ends
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(if options.strict {
            UndefinedBehavior::Strict
        } else {
            UndefinedBehavior::Lenient
        });

        if let Some(root) = &options.search_root {
            trace!("Resolving template imports from '{}'", root.display());
            env.set_loader(path_loader(root));
        }

        env.add_filter("camel_case", to_camel_case);
        env.add_filter("kebab_case", to_kebab_case);
        env.add_filter("pascal_case", to_pascal_case);
        env.add_filter("screaming_snake_case", to_screaming_snake_case);
        env.add_filter("snake_case", to_snake_case);
        env.add_filter("train_case", to_train_case);
        env.add_filter("regex", regex_filter);
        env.add_filter("to_yaml", to_yaml);
        env.add_filter("to_toml", to_toml);
        env.add_filter("sha256", sha256);
        env.add_filter("required", required);

        env.add_function("getenv", env_var);
        env.add_function("now", now);

        Self { env }
    }

    /// Internal helper to render a one-off template
    fn render_internal(
        &self,
        template: &str,
        context: &serde_json::Value,
        template_name: Option<&str>,
    ) -> Result<String> {
        let mut env = self.env.clone();
        let name = template_name.unwrap_or("temp").replace('\\', "/");
        env.add_template_owned(name.clone(), template.to_string())?;
        let tmpl = env.get_template(&name)?;
        Ok(tmpl.render(context)?)
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn add_template(&mut self, name: &str, template: &str) -> Result<(), minijinja::Error> {
        let normalized_name = name.replace('\\', "/");
        self.env.add_template_owned(normalized_name, template.to_string())
    }

    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        template_name: Option<&str>,
    ) -> Result<String> {
        self.render_internal(template, context, template_name)
    }

    fn render_path(
        &self,
        template_path: &Path,
        context: &serde_json::Value,
    ) -> Result<String> {
        let path_str = template_path.to_str_checked()?;
        if !path_str.contains("{{") && !path_str.contains("{%") {
            return Ok(path_str.to_string());
        }
        let template_name = template_path.file_name().and_then(|name| name.to_str());
        self.render_internal(path_str, context, template_name)
    }
}
