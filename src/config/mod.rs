//! Manifest handling for config_render
//!
//! A manifest is an optional file next to the templates that declares which
//! templates to render, where the output goes and which data feeds them.

pub mod loader;

pub use loader::{Config, ConfigV1, Manifest};
