//! Runtime configuration for the authorization layer.

use std::path::Path;

use crate::error::BoltError;

/// Policy switches, deserializable from JSON. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Allow requests to controllers with no resolvable resource type.
    pub allow_missing_model: bool,
    /// Allow requests with no current actor (after logging a diagnostic).
    pub allow_anonymous: bool,
    /// Emit a log record for every access denial through the default hook.
    pub audit_denials: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            allow_missing_model: true,
            allow_anonymous: true,
            audit_denials: true,
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self, BoltError> {
        serde_json::from_str(json).map_err(|e| BoltError::Config(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BoltError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| BoltError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json_str(&raw)?;
        tracing::debug!(path = %path.display(), ?config, "loaded authorization config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_permissive() {
        let config = Config::default();
        assert!(config.allow_missing_model);
        assert!(config.allow_anonymous);
        assert!(config.audit_denials);
        assert_eq!(Config::from_json_str("{}").unwrap(), config);
    }

    #[test]
    fn test_partial_json_overrides_defaults() {
        let config = Config::from_json_str(r#"{ "allow_missing_model": false }"#).unwrap();
        assert!(!config.allow_missing_model);
        assert!(config.allow_anonymous);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = Config::from_json_str(r#"{ "allow_everything": true }"#).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "allow_anonymous": false, "audit_denials": false }}"#).unwrap();
        let config = Config::from_path(file.path()).unwrap();
        assert!(!config.allow_anonymous);
        assert!(!config.audit_denials);

        let missing = Config::from_path(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(BoltError::Config(_))));
    }
}
