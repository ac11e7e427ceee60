//! Facade configuration
//!
//! Read from the `[mirror]` table of a TOML file:
//!
//! ```toml
//! [mirror]
//! type-comparison = "assignability"
//! argument-matching = "equality"
//! null-arguments = "reference-only"
//! ```
//!
//! Every key is optional; missing keys take the defaults below.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::filter::TypeComparison;

/// How null arguments are matched against declared parameter types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NullArguments {
    /// Null fits reference-typed parameters only, never primitives
    #[default]
    ReferenceOnly,
    /// Null fits every parameter
    Any,
}

/// Facade settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct MirrorConfig {
    /// Comparison mode new filters start with
    pub type_comparison: TypeComparison,
    /// How argument types are compared with parameter types
    pub argument_matching: TypeComparison,
    /// How null arguments are treated
    pub null_arguments: NullArguments,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            type_comparison: TypeComparison::Assignability,
            argument_matching: TypeComparison::Equality,
            null_arguments: NullArguments::ReferenceOnly,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    mirror: MirrorConfig,
}

impl MirrorConfig {
    /// Parse from TOML text; a missing `[mirror]` table yields the defaults
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;
        Ok(file.mirror)
    }

    /// Load from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded mirror config");
        Ok(config)
    }

    /// Set the comparison mode for new filters
    pub fn with_type_comparison(mut self, mode: TypeComparison) -> Self {
        self.type_comparison = mode;
        self
    }

    /// Set the argument matching mode
    pub fn with_argument_matching(mut self, mode: TypeComparison) -> Self {
        self.argument_matching = mode;
        self
    }

    /// Set the null argument policy
    pub fn with_null_arguments(mut self, policy: NullArguments) -> Self {
        self.null_arguments = policy;
        self
    }
}
