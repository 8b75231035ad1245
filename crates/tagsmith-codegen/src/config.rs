//! Configuration for the generator.
//!
//! All types implement [`serde::Deserialize`] so the CLI can load them from
//! TOML; the procedural macro always uses [`GeneratorConfig::default`].
//!
//! # Overview
//!
//! - [`GeneratorConfig`] - Top-level configuration combining naming and runtime settings.
//! - [`NamingConfig`] - Suffixes used to name generated types and methods.
//! - [`RuntimeConfig`] - Where generated code finds the runtime crate.
//!
//! # Example
//!
//! ```
//! # use tagsmith_codegen::config::GeneratorConfig;
//! let config = GeneratorConfig::default();
//! assert_eq!(config.naming().type_suffix(), "Tag");
//! assert_eq!(config.runtime().crate_path(), "::tagsmith");
//! ```

use serde::Deserialize;

use crate::error::GenerateError;

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratorConfig {
    /// Naming configuration section.
    #[serde(default)]
    naming: NamingConfig,

    /// Runtime configuration section.
    #[serde(default)]
    runtime: RuntimeConfig,
}

impl GeneratorConfig {
    /// Creates a new [`GeneratorConfig`] from its sections.
    pub fn new(naming: NamingConfig, runtime: RuntimeConfig) -> Self {
        Self { naming, runtime }
    }

    /// Returns the naming configuration.
    pub fn naming(&self) -> &NamingConfig {
        &self.naming
    }

    /// Returns the runtime configuration.
    pub fn runtime(&self) -> &RuntimeConfig {
        &self.runtime
    }

    /// Check that every configured name fragment yields valid identifiers
    /// and that the runtime path parses.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Config`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), GenerateError> {
        let naming = &self.naming;
        for (key, prefix, suffix) in [
            ("naming.type_suffix", "Host", naming.type_suffix.as_str()),
            ("naming.text_suffix", "tag", naming.text_suffix.as_str()),
            ("naming.body_suffix", "tag", naming.body_suffix.as_str()),
            ("naming.attributes_suffix", "tag", naming.attributes_suffix.as_str()),
        ] {
            if syn::parse_str::<syn::Ident>(&format!("{prefix}{suffix}")).is_err() {
                return Err(GenerateError::Config(format!(
                    "`{key}` must extend an identifier, found {suffix:?}"
                )));
            }
        }

        let suffixes = [
            &naming.text_suffix,
            &naming.body_suffix,
            &naming.attributes_suffix,
        ];
        if suffixes.iter().any(|suffix| suffix.is_empty()) {
            return Err(GenerateError::Config(
                "method suffixes in `naming` cannot be empty".to_string(),
            ));
        }
        if suffixes[0] == suffixes[1] || suffixes[0] == suffixes[2] || suffixes[1] == suffixes[2] {
            return Err(GenerateError::Config(
                "method suffixes in `naming` must be distinct".to_string(),
            ));
        }

        self.runtime.path().map(|_| ())
    }
}

/// Name fragments appended to tag names.
///
/// With the defaults, tag `p` under host `Page` yields type `PagePTag` and
/// methods `p`, `p_text`, `p_with` and `p_with_attrs`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    type_suffix: String,
    text_suffix: String,
    body_suffix: String,
    attributes_suffix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            type_suffix: "Tag".to_string(),
            text_suffix: "_text".to_string(),
            body_suffix: "_with".to_string(),
            attributes_suffix: "_with_attrs".to_string(),
        }
    }
}

impl NamingConfig {
    /// Creates a new [`NamingConfig`].
    ///
    /// # Arguments
    ///
    /// * `type_suffix` - Appended to generated type names.
    /// * `text_suffix` - Appended to tag names for the text method.
    /// * `body_suffix` - Appended to tag names for the body method.
    /// * `attributes_suffix` - Appended to tag names for the attributed body method.
    pub fn new(
        type_suffix: impl Into<String>,
        text_suffix: impl Into<String>,
        body_suffix: impl Into<String>,
        attributes_suffix: impl Into<String>,
    ) -> Self {
        Self {
            type_suffix: type_suffix.into(),
            text_suffix: text_suffix.into(),
            body_suffix: body_suffix.into(),
            attributes_suffix: attributes_suffix.into(),
        }
    }

    pub fn type_suffix(&self) -> &str {
        &self.type_suffix
    }

    pub fn text_suffix(&self) -> &str {
        &self.text_suffix
    }

    pub fn body_suffix(&self) -> &str {
        &self.body_suffix
    }

    pub fn attributes_suffix(&self) -> &str {
        &self.attributes_suffix
    }
}

/// Location of the runtime crate as seen from generated code.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    crate_path: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            crate_path: "::tagsmith".to_string(),
        }
    }
}

impl RuntimeConfig {
    pub fn new(crate_path: impl Into<String>) -> Self {
        Self {
            crate_path: crate_path.into(),
        }
    }

    /// The configured path, as written.
    pub fn crate_path(&self) -> &str {
        &self.crate_path
    }

    /// The configured path, parsed.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Config`] if the path is not a Rust path.
    pub fn path(&self) -> Result<syn::Path, GenerateError> {
        syn::parse_str(&self.crate_path).map_err(|err| {
            GenerateError::Config(format!(
                "`runtime.crate_path` is not a valid path ({err}): {:?}",
                self.crate_path
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_custom_runtime_path() {
        let config = GeneratorConfig::new(NamingConfig::default(), RuntimeConfig::new("crate::rt"));
        assert!(config.validate().is_ok());
        assert_eq!(config.runtime().path().unwrap().segments.len(), 2);
    }

    #[test]
    fn test_invalid_runtime_path() {
        let config = GeneratorConfig::new(NamingConfig::default(), RuntimeConfig::new("not a path"));
        assert!(matches!(config.validate(), Err(GenerateError::Config(_))));
    }

    #[test]
    fn test_invalid_suffix() {
        let naming = NamingConfig::new("Tag", "-text", "_with", "_with_attrs");
        let config = GeneratorConfig::new(naming, RuntimeConfig::default());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("naming.text_suffix"));
    }

    #[test]
    fn test_empty_type_suffix_allowed() {
        let naming = NamingConfig::new("", "_text", "_with", "_with_attrs");
        let config = GeneratorConfig::new(naming, RuntimeConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_method_suffix_rejected() {
        let naming = NamingConfig::new("Tag", "", "_with", "_with_attrs");
        let config = GeneratorConfig::new(naming, RuntimeConfig::default());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_method_suffix_rejected() {
        let naming = NamingConfig::new("Tag", "_x", "_x", "_with_attrs");
        let config = GeneratorConfig::new(naming, RuntimeConfig::default());
        assert!(config.validate().unwrap_err().to_string().contains("distinct"));
    }
}
