//! Severity classification of raw readings.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Value;

use super::TableError;

/// Display severity of a reading. Absence of severity is `None` at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warn,
    Crit,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Warn => "warn",
            Severity::Crit => "crit",
        }
    }
}

/// A per-key classification rule.
pub type Rule = Box<dyn Fn(f64) -> Option<Severity>>;

/// Which side of the thresholds is bad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Higher is worse (temperatures).
    #[default]
    Rising,
    /// Lower is worse (pressures, voltages).
    Falling,
}

/// Declarative threshold rule, as written in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warn: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crit: Option<f64>,
    #[serde(default)]
    pub direction: Direction,
}

impl ThresholdRule {
    pub fn rising(warn: f64, crit: f64) -> Self {
        Self {
            warn: Some(warn),
            crit: Some(crit),
            direction: Direction::Rising,
        }
    }

    pub fn falling(warn: f64, crit: f64) -> Self {
        Self {
            warn: Some(warn),
            crit: Some(crit),
            direction: Direction::Falling,
        }
    }

    /// Checks that thresholds are finite and ordered for the direction.
    pub fn validate(&self) -> Result<(), String> {
        for t in [self.warn, self.crit].into_iter().flatten() {
            if !t.is_finite() {
                return Err(format!("threshold {} is not finite", t));
            }
        }
        if self.warn.is_none() && self.crit.is_none() {
            return Err("rule has neither warn nor crit threshold".to_string());
        }
        if let (Some(warn), Some(crit)) = (self.warn, self.crit) {
            let ordered = match self.direction {
                Direction::Rising => warn <= crit,
                Direction::Falling => warn >= crit,
            };
            if !ordered {
                return Err(format!(
                    "warn {} and crit {} are out of order for a {} rule",
                    warn,
                    crit,
                    self.direction
                ));
            }
        }
        Ok(())
    }

    pub fn evaluate(&self, v: f64) -> Option<Severity> {
        let reached = |t: f64| match self.direction {
            Direction::Rising => v >= t,
            Direction::Falling => v <= t,
        };
        if self.crit.is_some_and(reached) {
            Some(Severity::Crit)
        } else if self.warn.is_some_and(reached) {
            Some(Severity::Warn)
        } else {
            None
        }
    }

    /// Compiles into a [`Rule`] after validation.
    pub fn compile(self) -> Result<Rule, String> {
        self.validate()?;
        Ok(Box::new(move |v| self.evaluate(v)))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Rising => write!(f, "rising"),
            Direction::Falling => write!(f, "falling"),
        }
    }
}

/// Threshold rule applied to every key with the given suffix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuffixRule {
    pub suffix: String,
    #[serde(flatten)]
    pub rule: ThresholdRule,
}

/// Keyed classification rules, validated at registration.
#[derive(Default)]
pub struct RuleSet {
    by_key: HashMap<String, Rule>,
    by_suffix: Vec<(String, ThresholdRule)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule for an exact key.
    pub fn register<F>(&mut self, key: impl Into<String>, rule: F) -> Result<(), TableError>
    where
        F: Fn(f64) -> Option<Severity> + 'static,
    {
        let key = key.into();
        if key.is_empty() {
            return Err(TableError::InvalidRule {
                key,
                reason: "empty key".to_string(),
            });
        }
        if self.by_key.contains_key(&key) {
            return Err(TableError::InvalidRule {
                key,
                reason: "rule already registered".to_string(),
            });
        }
        self.by_key.insert(key, Box::new(rule));
        Ok(())
    }

    /// Registers a declarative threshold rule for an exact key.
    pub fn register_threshold(
        &mut self,
        key: impl Into<String>,
        rule: ThresholdRule,
    ) -> Result<(), TableError> {
        let key = key.into();
        let compiled = rule.compile().map_err(|reason| TableError::InvalidRule {
            key: key.clone(),
            reason,
        })?;
        self.register(key, compiled)
    }

    /// Registers a fallback rule for keys ending in `suffix`.
    /// Suffix rules are tried in registration order.
    pub fn register_suffix(&mut self, suffix: SuffixRule) -> Result<(), TableError> {
        let key = format!("*{}", suffix.suffix);
        if suffix.suffix.is_empty() {
            return Err(TableError::InvalidRule {
                key,
                reason: "empty suffix".to_string(),
            });
        }
        suffix
            .rule
            .validate()
            .map_err(|reason| TableError::InvalidRule { key, reason })?;
        self.by_suffix.push((suffix.suffix, suffix.rule));
        Ok(())
    }

    pub fn has_rule(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Classifies a raw reading. Non-numeric and non-finite readings have
    /// no severity.
    pub fn classify(&self, key: &str, raw: &Value) -> Option<Severity> {
        let v = raw.as_number().filter(|v| v.is_finite())?;
        if let Some(rule) = self.by_key.get(key) {
            return rule(v);
        }
        self.by_suffix
            .iter()
            .find(|(suffix, _)| key.ends_with(suffix.as_str()))
            .and_then(|(_, rule)| rule.evaluate(v))
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.by_key.keys().collect();
        keys.sort();
        f.debug_struct("RuleSet")
            .field("keys", &keys)
            .field("suffixes", &self.by_suffix)
            .finish()
    }
}
