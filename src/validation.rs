use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

/// Validate a value against a JSON schema document.
pub fn validate_with_schema(value: &serde_json::Value, schema: &str) -> Result<()> {
    let schema_value: serde_json::Value = serde_json::from_str(schema)?;

    let validator = jsonschema::validator_for(&schema_value)
        .map_err(|e| Error::Other(anyhow::anyhow!("Invalid JSON schema: {e}")))?;

    let errors: Vec<String> = validator
        .iter_errors(value)
        .map(|error| error.to_string())
        .collect();

    if !errors.is_empty() {
        return Err(Error::ContextValidation(errors.join("; ")));
    }

    Ok(())
}

/// Validate the rendering context against the schema stored at `schema_path`.
pub fn validate_context<P: AsRef<Path>>(
    context: &serde_json::Value,
    schema_path: P,
) -> Result<()> {
    let schema_path = schema_path.as_ref();
    debug!("Validating context against '{}'", schema_path.display());
    let schema = std::fs::read_to_string(schema_path).map_err(|e| {
        Error::Other(anyhow::anyhow!(
            "Failed to read schema '{}': {e}",
            schema_path.display()
        ))
    })?;
    validate_with_schema(context, &schema)
}
