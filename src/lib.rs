/// Handles argument parsing and the render workflow.
pub mod cli;

/// Manifest loading and validation.
pub mod config;

/// Constants used throughout the crate.
pub mod constants;

/// Assembly of the rendering context.
pub mod context;

/// Defines custom error types.
pub mod error;

/// Extension traits for std types.
pub mod ext;

/// Processes .configrenderignore files to exclude specific paths.
pub mod ignore;

/// A set of helpers for reading data files.
pub mod ioutils;

/// Package metadata derived from Cargo.
pub mod metadata;

/// User confirmation prompts.
pub mod prompt;

/// Template parsing and rendering functionality.
pub mod renderer;

/// Template discovery and processing.
pub mod template;

/// JSON Schema validation of the rendering context.
pub mod validation;

/// Version guard run by `build.rs`, compiled here so its tests run with the suite.
#[cfg(test)]
#[path = "../build/version.rs"]
mod build_version;
