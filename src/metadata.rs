//! Package identity, read once from Cargo at compile time.
//!
//! `Cargo.toml` is the only place the version is written down. Everything at
//! runtime (the `--version` flag, the `config_render.version` context value,
//! `--about`) goes through [`VERSION`]. `build.rs` refuses to build when the
//! manifest does not declare a version.

use std::sync::OnceLock;

/// Crate version as declared in `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The single console script installed by the package.
pub const BINARY_NAME: &str = "config_render";

/// Templating engine every render is delegated to.
pub const TEMPLATE_ENGINE: &str = "minijinja";

/// Target triple the binary was built for, exported by `build.rs`.
pub const BUILD_TARGET: &str = env!("CONFIG_RENDER_BUILD_TARGET");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub authors: Vec<&'static str>,
    pub license: &'static str,
    pub repository: &'static str,
    pub binary: &'static str,
    pub template_engine: &'static str,
    pub build_target: &'static str,
}

impl PackageMetadata {
    /// Metadata of the running build.
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: VERSION,
            description: env!("CARGO_PKG_DESCRIPTION"),
            authors: split_authors(env!("CARGO_PKG_AUTHORS")),
            license: env!("CARGO_PKG_LICENSE"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            binary: BINARY_NAME,
            template_engine: TEMPLATE_ENGINE,
            build_target: BUILD_TARGET,
        }
    }

    /// Version string shown by `--version`.
    pub fn long_version(&self) -> String {
        format!("{} ({})", self.version, self.template_engine)
    }

    /// Multi-line summary printed by `--about`.
    pub fn about(&self) -> String {
        let mut lines = vec![
            format!("{} {}", self.name, self.version),
            self.description.to_string(),
            String::new(),
            format!("authors:         {}", self.authors.join(", ")),
            format!("license:         {}", self.license),
            format!("repository:      {}", self.repository),
            format!("console script:  {}", self.binary),
            format!("template engine: {}", self.template_engine),
        ];
        if !self.build_target.is_empty() {
            lines.push(format!("build target:    {}", self.build_target));
        }
        lines.join("\n")
    }
}

fn split_authors(raw: &'static str) -> Vec<&'static str> {
    raw.split(':').map(str::trim).filter(|a| !a.is_empty()).collect()
}

static LONG_VERSION: OnceLock<String> = OnceLock::new();

/// Long version string handed to clap, built on first use.
pub fn long_version() -> &'static str {
    LONG_VERSION.get_or_init(|| PackageMetadata::current().long_version())
}
