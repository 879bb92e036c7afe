//! Optional TOML configuration.
//!
//! ```toml
//! # tscat.toml
//! [catalog]
//! duplicate-policy = "first-wins"
//! numerus-rule = "french"
//!
//! [check]
//! warnings-as-errors = true
//! ```
//!
//! Every key is optional; command-line flags take precedence.

use std::path::Path;

use serde::Deserialize;
use tscat_i18n::CatalogOptions;

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct CliConfig {
    pub catalog: CatalogOptions,
    pub check: CheckConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct CheckConfig {
    /// Treat warnings like errors when deciding the exit status.
    pub warnings_as_errors: bool,
}

impl CliConfig {
    pub fn from_toml_str(s: &str, path: &Path) -> Result<Self> {
        toml::from_str(s).map_err(|err| CliError::Config {
            path: path.to_path_buf(),
            message: err.message().to_string(),
        })
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|err| CliError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let config = Self::from_toml_str(&content, path)?;
        tracing::debug!(target: "tscat.cli", path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_toml_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tscat_i18n::{DuplicatePolicy, NumerusRule};

    fn parse(s: &str) -> Result<CliConfig> {
        CliConfig::from_toml_str(s, Path::new("tscat.toml"))
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(parse("").unwrap(), CliConfig::default());
    }

    #[test]
    fn full_config() {
        let config = parse(
            r#"
            [catalog]
            duplicate-policy = "first-wins"
            numerus-rule = "slovenian"

            [check]
            warnings-as-errors = true
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog.duplicate_policy, DuplicatePolicy::FirstWins);
        assert_eq!(config.catalog.numerus_rule, Some(NumerusRule::Slovenian));
        assert!(config.check.warnings_as_errors);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let error = parse("[check]\nstrict = true\n").unwrap_err();
        assert!(matches!(error, CliError::Config { .. }));
        assert_eq!(error.exit_code(), crate::error::EXIT_USAGE);
    }

    #[test]
    fn bad_policy_is_rejected() {
        assert!(parse("[catalog]\nduplicate-policy = \"newest\"\n").is_err());
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let error = CliConfig::load(Some(Path::new("/nonexistent/tscat.toml"))).unwrap_err();
        assert!(matches!(error, CliError::Config { .. }));
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(CliConfig::load(None).unwrap(), CliConfig::default());
    }
}
