use chrono::format::{Item, StrftimeItems};
use log::warn;
use minijinja::{Error as TemplateError, ErrorKind, Value};
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::constants::DEFAULT_TIME_FORMAT;

// Re-export the case conversion functions used as filters
pub use cruet::case::{
    camel::to_camel_case, kebab::to_kebab_case, pascal::to_pascal_case,
    screaming_snake::to_screaming_snake_case, snake::to_snake_case, train::to_train_case,
};

/// Tests if a string matches a regular expression.
///
/// An invalid pattern logs a warning and never matches.
pub fn regex_filter(val: &str, re: &str) -> bool {
    match Regex::new(re) {
        Ok(re) => re.is_match(val),
        Err(err) => {
            warn!("Invalid regex '{re}': {err}");
            false
        }
    }
}

/// Serializes a value as a YAML document, without the trailing newline.
pub fn to_yaml(value: Value) -> Result<String, TemplateError> {
    let yaml = serde_yaml::to_string(&value).map_err(|e| {
        TemplateError::new(ErrorKind::InvalidOperation, "cannot serialize to YAML")
            .with_source(e)
    })?;
    Ok(yaml.trim_end_matches('\n').to_string())
}

/// Serializes a mapping as a TOML document, without the trailing newline.
pub fn to_toml(value: Value) -> Result<String, TemplateError> {
    let toml = toml::to_string(&value).map_err(|e| {
        TemplateError::new(ErrorKind::InvalidOperation, "cannot serialize to TOML")
            .with_source(e)
    })?;
    Ok(toml.trim_end_matches('\n').to_string())
}

/// Hex encoded SHA-256 digest of a string.
pub fn sha256(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}

/// Passes the value through, failing the render when it is missing or none.
pub fn required(value: Value, message: Option<String>) -> Result<Value, TemplateError> {
    if value.is_undefined() || value.is_none() {
        let message = message.unwrap_or_else(|| "a required value is missing".to_string());
        return Err(TemplateError::new(ErrorKind::InvalidOperation, message));
    }
    Ok(value)
}

/// `getenv(name, default)` template function reading the process environment.
pub fn env_var(name: &str, default: Option<Value>) -> Value {
    match std::env::var(name) {
        Ok(value) => Value::from(value),
        Err(_) => default.unwrap_or_else(|| Value::from(())),
    }
}

/// `now(format)` template function returning the local time.
pub fn now(format: Option<&str>) -> Result<String, TemplateError> {
    let format = format.unwrap_or(DEFAULT_TIME_FORMAT);
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(TemplateError::new(
            ErrorKind::InvalidOperation,
            format!("invalid time format '{format}'"),
        ));
    }
    Ok(chrono::Local::now().format(format).to_string())
}
