//! Manifest loading and validation

use crate::constants::{DEFAULT_TEMPLATE_SUFFIX, MANIFEST_FILENAMES};
use crate::error::{Error, Result};
use crate::ioutils::DataFormat;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Version 1 of the manifest schema.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigV1 {
    #[serde(default = "get_default_template_suffix")]
    pub template_suffix: String,
    /// Undefined variables are errors instead of rendering empty.
    #[serde(default)]
    pub strict: bool,
    /// Expose process environment variables as `env`.
    #[serde(default = "get_default_environment")]
    pub environment: bool,
    /// Data files merged into the context, in order.
    #[serde(default)]
    pub context: Vec<PathBuf>,
    #[serde(default)]
    pub variables: serde_json::Map<String, serde_json::Value>,
    /// JSON Schema file the merged context must satisfy.
    #[serde(default)]
    pub schema: Option<PathBuf>,
    /// Extra ignore globs for directory templates.
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Template source to output target, rendered in declaration order.
    #[serde(default)]
    pub templates: IndexMap<String, String>,
}

impl Default for ConfigV1 {
    fn default() -> Self {
        Self {
            template_suffix: get_default_template_suffix(),
            strict: false,
            environment: get_default_environment(),
            context: Vec::new(),
            variables: serde_json::Map::new(),
            schema: None,
            ignore: Vec::new(),
            templates: IndexMap::new(),
        }
    }
}

impl ConfigV1 {
    pub fn validate(&self) -> Result<()> {
        validate_template_suffix(&self.template_suffix)?;
        for (source, target) in &self.templates {
            if source.trim().is_empty() {
                return Err(Error::ConfigValidation(
                    "template sources must not be empty".into(),
                ));
            }
            if target.trim().is_empty() {
                return Err(Error::ConfigValidation(format!(
                    "template '{source}' has an empty target"
                )));
            }
        }
        Ok(())
    }
}

/// Checks that a template suffix looks like `.ext`.
pub fn validate_template_suffix(suffix: &str) -> Result<()> {
    if suffix.is_empty() {
        return Err(Error::ConfigValidation("template_suffix must not be empty".into()));
    }
    if !suffix.starts_with('.') || suffix.len() < 2 {
        return Err(Error::ConfigValidation(
            "template_suffix must start with '.' and have at least 1 character after it"
                .into(),
        ));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(tag = "schemaVersion")]
pub enum Config {
    #[serde(rename = "v1")]
    V1(ConfigV1),
}

impl Config {
    /// Parses a manifest file, picking the format from its extension.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ManifestNotFound { path: path.display().to_string() });
        }
        let content = std::fs::read_to_string(path)?;
        let config = match DataFormat::from_path(path)? {
            DataFormat::Json => serde_json::from_str(&content)?,
            DataFormat::Yaml => serde_yaml::from_str(&content)?,
            DataFormat::Toml => toml::from_str(&content)?,
        };
        Ok(config)
    }

    /// Returns the first manifest found in `dir`, if any.
    pub fn find_in<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
        let dir = dir.as_ref();
        MANIFEST_FILENAMES.iter().map(|name| dir.join(name)).find(|path| path.is_file())
    }
}

/// A validated manifest together with the directory its paths are relative to.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub config: ConfigV1,
    pub path: PathBuf,
    pub root: PathBuf,
}

impl Manifest {
    /// Loads the manifest at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let Config::V1(config) = Config::load_file(&path)?;
        config.validate()?;
        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        debug!("Loaded manifest '{}'", path.display());
        Ok(Self { config, path, root })
    }

    /// Loads the explicit manifest, or the first one discovered in `dir`.
    pub fn resolve<P: AsRef<Path>>(explicit: Option<&Path>, dir: P) -> Result<Option<Self>> {
        match explicit {
            Some(path) => Self::load(path).map(Some),
            None => match Config::find_in(dir) {
                Some(path) => Self::load(path).map(Some),
                None => {
                    debug!("No manifest found, using command line arguments only.");
                    Ok(None)
                }
            },
        }
    }

    /// Resolves a manifest-relative path.
    pub fn resolve_path<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

fn get_default_template_suffix() -> String {
    DEFAULT_TEMPLATE_SUFFIX.to_string()
}

fn get_default_environment() -> bool {
    true
}
