use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid config at {config_path}: fields[{index}] {reason}")]
    InvalidField {
        config_path: PathBuf,
        index: usize,
        reason: &'static str,
    },

    #[error("Invalid config at {config_path}: sync.timeout_ms must be greater than zero")]
    ZeroTimeout { config_path: PathBuf },
}

/// A (document type, field) pair allowed to receive converted blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub document_type: String,
    pub field_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSettings {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl SyncSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// JSON-lines file receiving sync attempts. `~` and `$VAR` are expanded on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_log: Option<PathBuf>,
    #[serde(default)]
    pub sync: SyncSettings,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.validate(config_path)?;

        // Expand shell variables and tilde in the audit log path
        config.audit_log = config
            .audit_log
            .map(|p| Self::expand_path(&p).unwrap_or(p));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-portable");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// The configured audit log, or `~/.local/state/markdown-portable/audit.jsonl`.
    pub fn audit_log_path(&self) -> PathBuf {
        match &self.audit_log {
            Some(path) => path.clone(),
            None => {
                let state_dir = shellexpand::tilde("~/.local/state/markdown-portable");
                PathBuf::from(state_dir.as_ref()).join("audit.jsonl")
            }
        }
    }

    fn validate(&self, config_path: &Path) -> Result<(), ConfigError> {
        if self.sync.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout {
                config_path: config_path.to_path_buf(),
            });
        }
        for (index, field) in self.fields.iter().enumerate() {
            let reason = if field.document_type.trim().is_empty() {
                "has an empty document_type"
            } else if field.field_name.trim().is_empty() {
                "has an empty field_name"
            } else {
                continue;
            };
            return Err(ConfigError::InvalidField {
                config_path: config_path.to_path_buf(),
                index,
                reason,
            });
        }
        Ok(())
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/markdown-portable/config.toml"));
    }

    #[test]
    fn test_full_config_parses() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            r#"
audit_log = "/var/log/portable/audit.jsonl"

[sync]
timeout_ms = 2500

[[fields]]
document_type = "log"
field_name = "content"

[[fields]]
document_type = "post"
field_name = "body"
"#,
        );

        let config = Config::load_from_path(&path).unwrap().unwrap();

        assert_eq!(
            config.audit_log,
            Some(PathBuf::from("/var/log/portable/audit.jsonl"))
        );
        assert_eq!(config.sync.timeout(), Duration::from_millis(2500));
        assert_eq!(
            config.fields,
            vec![
                FieldConfig {
                    document_type: "log".into(),
                    field_name: "content".into()
                },
                FieldConfig {
                    document_type: "post".into(),
                    field_name: "body".into()
                },
            ]
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "");

        let config = Config::load_from_path(&path).unwrap().unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.sync.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(config.fields.is_empty());
    }

    #[test]
    fn test_sync_table_without_timeout_uses_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "[sync]\n");

        let config = Config::load_from_path(&path).unwrap().unwrap();

        assert_eq!(config.sync.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            audit_log: Some(PathBuf::from("/tmp/audit.jsonl")),
            sync: SyncSettings { timeout_ms: 500 },
            fields: vec![FieldConfig {
                document_type: "log".into(),
                field_name: "content".into(),
            }],
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_audit_log_env_var_is_expanded_on_load() {
        unsafe {
            env::set_var("PORTABLE_STATE_DIR", "/custom/state");
        }

        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "audit_log = \"$PORTABLE_STATE_DIR/audit.jsonl\"\n");
        let config = Config::load_from_path(&path).unwrap().unwrap();

        assert_eq!(
            config.audit_log,
            Some(PathBuf::from("/custom/state/audit.jsonl"))
        );

        unsafe {
            env::remove_var("PORTABLE_STATE_DIR");
        }
    }

    #[test]
    fn test_audit_log_tilde_is_expanded_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "audit_log = \"~/state/audit.jsonl\"\n");
        let config = Config::load_from_path(&path).unwrap().unwrap();

        let audit = config.audit_log.unwrap();
        assert!(!audit.to_string_lossy().starts_with('~'));
        assert!(audit.to_string_lossy().ends_with("state/audit.jsonl"));
    }

    #[test]
    fn test_audit_log_path_falls_back_to_state_dir() {
        let config = Config::default();
        let path = config.audit_log_path();

        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.ends_with(".local/state/markdown-portable/audit.jsonl"));

        let configured = Config {
            audit_log: Some(PathBuf::from("/tmp/a.jsonl")),
            ..Config::default()
        };
        assert_eq!(configured.audit_log_path(), PathBuf::from("/tmp/a.jsonl"));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_malformed_config_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "[[fields]]\ndocument_type = 3\n");

        let err = Config::load_from_path(&path).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_empty_field_name_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            "[[fields]]\ndocument_type = \"log\"\nfield_name = \"content\"\n\n[[fields]]\ndocument_type = \"post\"\nfield_name = \" \"\n",
        );

        let err = Config::load_from_path(&path).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidField {
                index: 1,
                reason: "has an empty field_name",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "[sync]\ntimeout_ms = 0\n");

        let err = Config::load_from_path(&path).unwrap_err();

        assert!(matches!(err, ConfigError::ZeroTimeout { .. }));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            audit_log: None,
            sync: SyncSettings::default(),
            fields: vec![FieldConfig {
                document_type: "log".into(),
                field_name: "content".into(),
            }],
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }
}
