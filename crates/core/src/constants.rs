//! Constants used throughout the core crate.

/// Default directory for prompt storage when no explicit directory is configured.
pub const DEFAULT_STORAGE_DIR: &str = "prompt_data";

/// Environment variable naming the storage directory.
pub const STORAGE_DIR_ENV: &str = "PLP_STORAGE_DIR";
