/*!
 * Temp Configuration
 *
 * Naming defaults, retry bounds and the default parent directory.
 */

use super::errors::{Result, TempError};
use std::path::PathBuf;

/// Default prefix for generated file names
pub const DEFAULT_FILE_PREFIX: &str = "f-";

/// Default prefix for generated directory names
pub const DEFAULT_DIR_PREFIX: &str = "d-";

/// Default number of creation attempts before giving up on collisions
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Reason `fragment` is unusable as a name prefix or suffix, if any
///
/// `/` and `\` are separators on every platform here.
pub fn fragment_problem(fragment: &str) -> Option<&'static str> {
    if fragment.contains('\0') {
        Some("contains a NUL byte")
    } else if fragment.contains(['/', '\\']) {
        Some("contains a path separator")
    } else {
        None
    }
}

/// Environment variable names read by [`TempConfig::from_env`]
pub mod env {
    pub const ROOT: &str = "TEMP_TRACKER_ROOT";
    pub const MAX_ATTEMPTS: &str = "TEMP_TRACKER_MAX_ATTEMPTS";
    pub const TRACK: &str = "TEMP_TRACKER_TRACK";
    pub const FILE_PREFIX: &str = "TEMP_TRACKER_FILE_PREFIX";
    pub const DIR_PREFIX: &str = "TEMP_TRACKER_DIR_PREFIX";
}

/// Configuration for temp allocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempConfig {
    /// Prefix used for files when the request names none (default: "f-")
    pub file_prefix: String,

    /// Prefix used for directories when the request names none (default: "d-")
    pub dir_prefix: String,

    /// Creation attempts per allocation (default: 5)
    pub max_attempts: u32,

    /// Parent directory override; `None` uses the backend temp root
    pub root: Option<PathBuf>,

    /// Start with tracking enabled
    pub track: bool,
}

impl TempConfig {
    /// Create default configuration
    pub fn new() -> Self {
        Self {
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            dir_prefix: DEFAULT_DIR_PREFIX.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            root: None,
            track: false,
        }
    }

    /// Default configuration with tracking enabled from the start
    pub fn tracked() -> Self {
        Self {
            track: true,
            ..Self::new()
        }
    }

    /// Override the parent directory
    pub fn with_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Override the attempt bound
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Build configuration from `TEMP_TRACKER_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(root) = lookup(env::ROOT).filter(|v| !v.is_empty()) {
            config.root = Some(PathBuf::from(root));
        }

        if let Some(raw) = lookup(env::MAX_ATTEMPTS) {
            config.max_attempts = raw.trim().parse().map_err(|_| {
                TempError::Configuration(format!(
                    "{} must be an integer, got {:?}",
                    env::MAX_ATTEMPTS,
                    raw
                ))
            })?;
        }

        if let Some(raw) = lookup(env::TRACK) {
            config.track = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => {
                    return Err(TempError::Configuration(format!(
                        "{} must be a boolean, got {:?}",
                        env::TRACK,
                        raw
                    )))
                }
            };
        }

        if let Some(prefix) = lookup(env::FILE_PREFIX) {
            config.file_prefix = prefix;
        }
        if let Some(prefix) = lookup(env::DIR_PREFIX) {
            config.dir_prefix = prefix;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce valid allocations
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(TempError::Configuration(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        let prefixes = [
            ("file_prefix", &self.file_prefix),
            ("dir_prefix", &self.dir_prefix),
        ];
        for (name, prefix) in prefixes {
            if let Some(problem) = fragment_problem(prefix) {
                return Err(TempError::Configuration(format!(
                    "{} {:?} {}",
                    name, prefix, problem
                )));
            }
        }
        Ok(())
    }
}

impl Default for TempConfig {
    fn default() -> Self {
        Self::new()
    }
}
