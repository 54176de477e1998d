//! Configuration loading and layered discovery for the bundler.
//!
//! The built-in defaults reproduce the constants of the historical build
//! script: the eight engine source files in their fixed concatenation order,
//! the `spe.js` artifact name, and the generated-file header. A TOML config
//! file may override any of them. Discovery order: explicit path, the
//! `CATENA_CONFIG` environment variable, `./catena.toml`, then the user
//! configuration directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use etcetera::BaseStrategy;
use indexmap::IndexSet;
use log::debug;
use serde::Deserialize;

/// Config file name searched for in the working directory and the user
/// configuration directory.
pub const CONFIG_FILE_NAME: &str = "catena.toml";

/// Environment variable that may point at a config file.
pub const CONFIG_ENV_VAR: &str = "CATENA_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Ordered list of input file names. Order determines concatenation
    /// order in the artifact and is never re-sorted; duplicates collapse to
    /// their first occurrence.
    pub files: IndexSet<String>,

    /// Directory the input file names are resolved against.
    pub src: PathBuf,

    /// Default output artifact path, used when the CLI gives no override.
    pub output: PathBuf,

    /// First line of the generated artifact.
    pub header: String,

    /// Number of newline bytes appended after each section body.
    pub section_gap: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            files: [
                "spe_base.js",
                "math.js",
                "vector.js",
                "world.js",
                "collision.js",
                "group.js",
                "particle.js",
                "shapes.js",
            ]
            .iter()
            .map(|name| (*name).to_owned())
            .collect(),
            src: PathBuf::from("."),
            output: PathBuf::from("spe.js"),
            header: "// Simple Physics Engine (generated single source file)".to_owned(),
            section_gap: 3,
        }
    }
}

impl Config {
    /// Load a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Locate and load the effective configuration.
    ///
    /// An explicit path always wins and its absence is an error; the other
    /// sources are consulted only if present, falling back to the built-in
    /// defaults when none exists.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            if !env_path.is_empty() {
                debug!("using config from {CONFIG_ENV_VAR}");
                return Self::load(Path::new(&env_path));
            }
        }

        let local = Path::new(CONFIG_FILE_NAME);
        if local.is_file() {
            return Self::load(local);
        }

        if let Ok(strategy) = etcetera::choose_base_strategy() {
            let user = strategy.config_dir().join("catena").join(CONFIG_FILE_NAME);
            if user.is_file() {
                return Self::load(&user);
            }
        }

        debug!("no config file found, using built-in defaults");
        Ok(Self::default())
    }
}

/// A scoped guard for safely setting and cleaning up the `CATENA_CONFIG`
/// environment variable.
///
/// This guard ensures that the variable is restored to its original value
/// when the guard is dropped, even if a panic occurs during testing.
#[must_use = "ConfigEnvGuard must be held in scope to ensure cleanup"]
#[derive(Debug)]
pub struct ConfigEnvGuard {
    /// The original value of `CATENA_CONFIG`, `None` if it was not set.
    original_value: Option<String>,
}

impl ConfigEnvGuard {
    /// Set `CATENA_CONFIG` to the given value, remembering the original.
    pub fn new(new_value: &str) -> Self {
        let original_value = std::env::var(CONFIG_ENV_VAR).ok();

        // SAFETY: This is safe in test contexts where we control the
        // environment and ensure proper cleanup via the Drop trait.
        unsafe {
            std::env::set_var(CONFIG_ENV_VAR, new_value);
        }

        Self { original_value }
    }

    /// Ensure `CATENA_CONFIG` is unset, remembering the original.
    pub fn unset() -> Self {
        let original_value = std::env::var(CONFIG_ENV_VAR).ok();

        // SAFETY: This is safe in test contexts where we control the
        // environment and ensure proper cleanup via the Drop trait.
        unsafe {
            std::env::remove_var(CONFIG_ENV_VAR);
        }

        Self { original_value }
    }
}

impl Drop for ConfigEnvGuard {
    fn drop(&mut self) {
        // Always attempt cleanup, even during panics. Errors are swallowed
        // to prevent double panics, but the restore must be attempted.
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            // SAFETY: This is safe as we're restoring the environment to its
            // original state.
            unsafe {
                match self.original_value.take() {
                    Some(original) => std::env::set_var(CONFIG_ENV_VAR, original),
                    None => std::env::remove_var(CONFIG_ENV_VAR),
                }
            }
        }));
    }
}
