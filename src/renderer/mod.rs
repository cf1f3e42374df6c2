//! Template rendering engines.
//!
//! `interface` holds the engine-agnostic trait, `minijinja` the Jinja2
//! compatible implementation and `filters` the extra filters and functions
//! registered on it.

pub mod filters;
pub mod interface;
pub mod minijinja;

pub use interface::TemplateRenderer;
pub use self::minijinja::{MiniJinjaRenderer, RenderOptions};

