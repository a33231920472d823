//! Table configuration.
//!
//! Configuration is a JSON file; every field is optional and falls back to
//! the defaults of the vehicle dashboard this table was built for.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::store::validate_key;
use crate::table::{RuleSet, SuffixRule, TableError, ThresholdRule};

/// Keys hidden unless the user asks to see hidden rows.
const DEFAULT_BASE_HIDDEN: &[&str] = &[
    "lat",
    "lon",
    "gps_fix",
    "timestamp",
    "_path",
    "millis",
    "time",
    "session_id",
];

/// Pin priority when pin-important is on.
const DEFAULT_IMPORTANT_ORDER: &[&str] = &[
    "RPM",
    "VSS_kmh",
    "Gear",
    "CLT_C",
    "OilTemp_C",
    "EOT_OUT",
    "IAT_C",
    "FuelPressure_bar",
    "OilPressure_bar",
    "Batt_V",
    "TPS_percent",
    "fuelPumpTemp",
    "CEL_Error",
];

const DEFAULT_PERSISTENCE_KEY: &str = "mf25_userHiddenKeys";

/// Error types for configuration loading.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Config file could not be read.
    Io(String),
    /// Config file is not valid JSON for [`TableConfig`].
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "cannot read config: {}", msg),
            ConfigError::Parse(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Live table configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// Keys hidden by default. Never persisted.
    pub base_hidden: Vec<String>,
    /// Ordered key list defining pin priority.
    pub important_order: Vec<String>,
    /// Threshold rules by exact key.
    pub rules: BTreeMap<String, ThresholdRule>,
    /// Threshold rules by key suffix, tried when no exact rule exists.
    pub suffix_rules: Vec<SuffixRule>,
    /// Store key of the user-hidden set.
    pub persistence_key: String,
    /// How long "Copied!" stays on a copy button.
    pub copied_ms: u64,
    /// How long "Copy failed" stays on a copy button.
    pub failed_ms: u64,
    /// Length of the change pulse.
    pub pulse_ms: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            base_hidden: DEFAULT_BASE_HIDDEN.iter().map(|s| s.to_string()).collect(),
            important_order: DEFAULT_IMPORTANT_ORDER
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rules: BTreeMap::new(),
            suffix_rules: vec![SuffixRule {
                suffix: "_C".to_string(),
                rule: ThresholdRule::rising(110.0, 130.0),
            }],
            persistence_key: DEFAULT_PERSISTENCE_KEY.to_string(),
            copied_ms: 900,
            failed_ms: 1200,
            pulse_ms: 600,
        }
    }
}

impl TableConfig {
    /// Reads a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Checks fields that have no rule-level validation.
    pub fn validate(&self) -> Result<(), TableError> {
        validate_key(&self.persistence_key).map_err(|e| {
            TableError::InvalidConfig(format!("persistence_key: {}", e))
        })?;
        if self.pulse_ms == 0 {
            return Err(TableError::InvalidConfig("pulse_ms must be positive".to_string()));
        }
        Ok(())
    }

    /// Adds the configured threshold rules to `rules`.
    pub fn compile_rules(&self, rules: &mut RuleSet) -> Result<(), TableError> {
        for (key, rule) in &self.rules {
            rules.register_threshold(key.clone(), *rule)?;
        }
        for suffix in &self.suffix_rules {
            rules.register_suffix(suffix.clone())?;
        }
        Ok(())
    }

    pub fn copied_duration(&self) -> Duration {
        Duration::from_millis(self.copied_ms)
    }

    pub fn failed_duration(&self) -> Duration {
        Duration::from_millis(self.failed_ms)
    }

    pub fn pulse_duration(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }
}
