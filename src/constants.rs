//! Constants used throughout config_render

/// Manifest file names in order of preference
pub const MANIFEST_FILENAMES: &[&str] = &[
    "config_render.yaml",
    "config_render.yml",
    "config_render.json",
    "config_render.toml",
];

/// Default template file suffix
pub const DEFAULT_TEMPLATE_SUFFIX: &str = ".j2";

/// Ignore file name, looked up at the root of template directories
pub const IGNORE_FILE: &str = ".configrenderignore";

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Data file extensions accepted for context files
pub const DATA_FILE_EXTENSIONS: &[&str] = &["json", "yaml", "yml", "toml"];

/// Keys reserved in the rendering context
pub mod context_keys {
    pub const ENV: &str = "env";
    pub const PLATFORM: &str = "platform";
    pub const SELF: &str = "config_render";
}

/// Default `now()` format, RFC 3339 without fractional seconds
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
