//! Version guard shared by the build script and the test suite.

/// Version Cargo reports when `Cargo.toml` declares none.
pub const PLACEHOLDER_VERSION: &str = "0.0.0";

/// Rejects a missing or placeholder package version.
pub fn check_version(version: &str) -> Result<(), String> {
    let version = version.trim();
    if version.is_empty() || version == PLACEHOLDER_VERSION {
        return Err(
            "config_render: the package version is missing. Declare `version` in Cargo.toml."
                .to_string(),
        );
    }
    Ok(())
}
