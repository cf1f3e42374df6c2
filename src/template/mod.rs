//! Template processing for config_render
//!
//! - `discovery`: turns template inputs into render jobs
//! - `operation`: the outcome of rendering a single job
//! - `processor`: renders a job and decides which operation applies

pub mod discovery;
pub mod operation;
pub mod processor;

pub use discovery::{RenderJob, TemplateDiscovery};
pub use operation::RenderOperation;
pub use processor::TemplateProcessor;
