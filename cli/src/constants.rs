//! Application-wide constants
//!
//! Single source of truth for file names and environment variable names.

/// Data storage paths
pub mod paths {
    /// Directory name under the platform data dir
    pub const APP_DIR: &str = "blockwright";
    /// Configuration file inside the data dir
    pub const CONFIG_FILE: &str = "config.json";
    /// Template directory inside the data dir, unless configured otherwise
    pub const TEMPLATES_DIR: &str = "templates";
}

/// Environment variables that override the config file
pub mod env {
    pub const DATA_DIR: &str = "BLOCKWRIGHT_DATA_DIR";
    pub const BACKEND: &str = "BLOCKWRIGHT_BACKEND";
    pub const BASE_URL: &str = "BLOCKWRIGHT_BASE_URL";
    pub const MODEL: &str = "BLOCKWRIGHT_MODEL";
}
