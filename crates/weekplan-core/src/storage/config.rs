//! TOML-based application configuration.
//!
//! Stores planner preferences:
//! - Daily available hours
//! - Default start time for new tasks
//! - Priority ordering and daily-limit accounting
//!
//! Configuration is stored at `~/.config/weekplan/config.toml`.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::allocator::{AllocatorOptions, DailyLimitMode, PriorityOrder, DEFAULT_DAILY_LIMIT};
use crate::error::ConfigError;

const START_TIME_FORMAT: &str = "%H:%M";

/// Planner-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlannerConfig {
    #[serde(default = "default_daily_hours")]
    pub daily_hours: u32,
    /// HH:MM
    #[serde(default = "default_start_time")]
    pub default_start_time: String,
    #[serde(default)]
    pub priority_order: PriorityOrder,
    #[serde(default)]
    pub limit_mode: DailyLimitMode,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/weekplan/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerConfig,
}

fn default_daily_hours() -> u32 {
    DEFAULT_DAILY_LIMIT
}
fn default_start_time() -> String {
    "09:00".into()
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            daily_hours: default_daily_hours(),
            default_start_time: default_start_time(),
            priority_order: PriorityOrder::default(),
            limit_mode: DailyLimitMode::default(),
        }
    }
}

impl PlannerConfig {
    /// Parsed default start time.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value is not `HH:MM`.
    pub fn start_time(&self) -> Result<NaiveTime, ConfigError> {
        NaiveTime::parse_from_str(&self.default_start_time, START_TIME_FORMAT).map_err(|e| {
            ConfigError::InvalidValue {
                key: "planner.default_start_time".into(),
                message: format!("'{}': {e}", self.default_start_time),
            }
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.daily_hours == 0 {
            return Err(ConfigError::InvalidValue {
                key: "planner.daily_hours".into(),
                message: "must be at least 1".into(),
            });
        }
        self.start_time().map(|_| ())
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or create the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing the default there only if the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.planner.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// See [`Config::save`].
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(error = %e, "falling back to default configuration");
                Self::default()
            }
        }
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse or
    /// validate. The config is left unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |e: &dyn std::fmt::Display| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        };
        // Enum keys accept the same spellings as the CLI flags.
        let normalized = match key {
            "planner.priority_order" => value
                .parse::<PriorityOrder>()
                .map_err(|e| invalid(&e))?
                .as_str(),
            "planner.limit_mode" => value
                .parse::<DailyLimitMode>()
                .map_err(|e| invalid(&e))?
                .as_str(),
            _ => value,
        };

        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(&e))?;
        Self::set_json_value_by_path(&mut json, key, normalized)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(&e))?;
        updated.planner.validate()?;
        *self = updated;
        Ok(())
    }

    /// Allocator options derived from the planner section.
    pub fn allocator_options(&self) -> AllocatorOptions {
        AllocatorOptions {
            daily_limit: self.planner.daily_hours,
            priority_order: self.planner.priority_order,
            limit_mode: self.planner.limit_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert!(toml_str.contains("priority_order = \"lexical\""));
        assert!(toml_str.contains("limit_mode = \"per_task\""));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("[planner]\ndaily_hours = 6\n").unwrap();
        assert_eq!(parsed.planner.daily_hours, 6);
        assert_eq!(parsed.planner.default_start_time, "09:00");
        assert_eq!(parsed.planner.limit_mode, DailyLimitMode::PerTask);

        let empty: Config = toml::from_str("").unwrap();
        assert_eq!(empty, Config::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("planner.daily_hours").as_deref(), Some("8"));
        assert_eq!(cfg.get("planner.default_start_time").as_deref(), Some("09:00"));
        assert_eq!(cfg.get("planner.priority_order").as_deref(), Some("lexical"));
        assert!(cfg.get("planner.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_values() {
        let mut cfg = Config::default();
        cfg.set("planner.daily_hours", "6").unwrap();
        cfg.set("planner.limit_mode", "shared").unwrap();
        cfg.set("planner.default_start_time", "07:30").unwrap();
        assert_eq!(cfg.planner.daily_hours, 6);
        assert_eq!(cfg.planner.limit_mode, DailyLimitMode::Shared);
        assert_eq!(
            cfg.planner.start_time().unwrap(),
            NaiveTime::from_hms_opt(7, 30, 0).unwrap()
        );
        assert_eq!(cfg.allocator_options().daily_limit, 6);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.set("planner.nonexistent", "1").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
    }

    #[test]
    fn set_rejects_invalid_values_and_keeps_config() {
        let mut cfg = Config::default();
        assert!(cfg.set("planner.daily_hours", "many").is_err());
        assert!(cfg.set("planner.daily_hours", "0").is_err());
        assert!(cfg.set("planner.limit_mode", "fair").is_err());
        assert!(cfg.set("planner.default_start_time", "9am").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let mut changed = cfg.clone();
        changed.set("planner.priority_order", "severity").unwrap();
        changed.save_to(&path).unwrap();
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.planner.priority_order, PriorityOrder::Severity);
    }

    #[test]
    fn load_from_keeps_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let original: &[u8] = b"[planner]\ndaily_hours = 3\n# caf\xE9\n";
        std::fs::write(&path, original).unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
        assert_eq!(std::fs::read(&path).unwrap(), original);
    }

    #[test]
    fn set_accepts_flag_spellings_for_enum_keys() {
        let mut cfg = Config::default();
        cfg.set("planner.priority_order", "Severity").unwrap();
        cfg.set("planner.limit_mode", "shared").unwrap();
        cfg.set("planner.limit_mode", "per-task").unwrap();
        assert_eq!(cfg.planner.priority_order, PriorityOrder::Severity);
        assert_eq!(cfg.planner.limit_mode, DailyLimitMode::PerTask);
        assert_eq!(cfg.get("planner.limit_mode").as_deref(), Some("per_task"));
    }

    #[test]
    fn load_from_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[planner]\ndaily_hours = \"eight\"\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
