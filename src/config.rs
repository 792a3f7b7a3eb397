//! Fixly configuration.
//!
//! JSON-loaded settings for SLA windows, logging and dashboards.

use crate::core::{Error, Result};
use crate::sla::policy::{default_hours, SlaPolicy, DEFAULT_SLA_HOURS, MAX_SLA_HOURS};
use crate::ticket::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Top-level configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixlyConfig {
    /// SLA windows
    pub sla: SlaConfig,
    /// Logging
    pub logging: LoggingConfig,
    /// Dashboard aggregation
    pub dashboard: DashboardConfig,
}

impl FixlyConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject settings that would make evaluation meaningless.
    pub fn validate(&self) -> Result<()> {
        self.sla.validate()?;
        self.dashboard.validate()
    }
}

/// SLA window settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaConfig {
    /// Hours per severity
    pub severity_hours: HashMap<Severity, u32>,
    /// Hours when severity is absent
    pub fallback_hours: u32,
}

impl SlaConfig {
    /// Build the evaluation policy.
    pub fn policy(&self) -> SlaPolicy {
        SlaPolicy::new(self.severity_hours.clone(), self.fallback_hours)
    }

    fn validate(&self) -> Result<()> {
        check_window("sla.fallback_hours", self.fallback_hours)?;
        for (severity, hours) in &self.severity_hours {
            check_window(&format!("sla.severity_hours.{}", severity), *hours)?;
        }
        Ok(())
    }
}

fn check_window(field: &str, hours: u32) -> Result<()> {
    if hours == 0 || hours > MAX_SLA_HOURS {
        return Err(Error::Config(format!(
            "{} must be between 1 and {} hours, got {}",
            field, MAX_SLA_HOURS, hours
        )));
    }
    Ok(())
}

impl Default for SlaConfig {
    fn default() -> Self {
        Self {
            severity_hours: Severity::ALL
                .into_iter()
                .map(|s| (s, default_hours(s)))
                .collect(),
            fallback_hours: DEFAULT_SLA_HOURS,
        }
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

/// Logging settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `fixly=debug`
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Include event targets
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            with_target: false,
        }
    }
}

/// Dashboard aggregation settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Monthly buckets in the created/resolved chart
    pub chart_months: u32,
    /// Categories shown in the category chart
    pub top_categories: usize,
    /// Contractors shown in the performance chart
    pub top_contractors: usize,
    /// Look-back for the "resolved" counter
    pub resolved_window_days: i64,
}

/// Most monthly buckets a chart may span.
pub const MAX_CHART_MONTHS: u32 = 120;

/// Longest look-back for the "resolved" counter.
pub const MAX_RESOLVED_WINDOW_DAYS: i64 = 3650;

impl DashboardConfig {
    fn validate(&self) -> Result<()> {
        if self.chart_months == 0 || self.chart_months > MAX_CHART_MONTHS {
            return Err(Error::Config(format!(
                "dashboard.chart_months must be between 1 and {}, got {}",
                MAX_CHART_MONTHS, self.chart_months
            )));
        }
        if self.resolved_window_days <= 0 || self.resolved_window_days > MAX_RESOLVED_WINDOW_DAYS {
            return Err(Error::Config(format!(
                "dashboard.resolved_window_days must be between 1 and {}, got {}",
                MAX_RESOLVED_WINDOW_DAYS, self.resolved_window_days
            )));
        }
        Ok(())
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            chart_months: 6,
            top_categories: 8,
            top_contractors: 6,
            resolved_window_days: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FixlyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sla.policy(), SlaPolicy::default());
        assert_eq!(config.dashboard.chart_months, 6);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_partial_json() {
        let config = FixlyConfig::from_json(
            r#"{"sla": {"severity_hours": {"critical": 1, "low": 96}}, "logging": {"format": "json"}}"#,
        )
        .unwrap();

        let policy = config.sla.policy();
        assert_eq!(policy.hours_for_severity(Some(Severity::Critical)), 1);
        assert_eq!(policy.hours_for_severity(Some(Severity::Medium)), 24);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_rejects_zero_hours() {
        let result = FixlyConfig::from_json(r#"{"sla": {"severity_hours": {"high": 0}}}"#);
        assert!(matches!(result, Err(Error::Config(_))));

        let result = FixlyConfig::from_json(r#"{"sla": {"fallback_hours": 0}}"#);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_oversized_windows() {
        let result = FixlyConfig::from_json(r#"{"sla": {"fallback_hours": 4294967295}}"#);
        assert!(matches!(result, Err(Error::Config(_))));

        let result = FixlyConfig::from_json(r#"{"sla": {"severity_hours": {"low": 876001}}}"#);
        assert!(matches!(result, Err(Error::Config(_))));

        let config = FixlyConfig::from_json(r#"{"sla": {"fallback_hours": 876000}}"#).unwrap();
        assert_eq!(config.sla.fallback_hours, MAX_SLA_HOURS);
    }

    #[test]
    fn test_dashboard_limits() {
        let result =
            FixlyConfig::from_json(r#"{"dashboard": {"resolved_window_days": 9000000000000000}}"#);
        assert!(matches!(result, Err(Error::Config(_))));

        let result = FixlyConfig::from_json(r#"{"dashboard": {"chart_months": 4294967295}}"#);
        assert!(matches!(result, Err(Error::Config(_))));

        let result = FixlyConfig::from_json(r#"{"dashboard": {"chart_months": 0}}"#);
        assert!(matches!(result, Err(Error::Config(_))));

        let config = FixlyConfig::from_json(
            r#"{"dashboard": {"chart_months": 120, "resolved_window_days": 3650}}"#,
        )
        .unwrap();
        assert_eq!(config.dashboard.chart_months, MAX_CHART_MONTHS);
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            FixlyConfig::from_json("{not json"),
            Err(Error::SerializationError(_))
        ));
        assert!(matches!(
            FixlyConfig::from_json(r#"{"sla": {"severity_hours": {"urgent": 3}}}"#),
            Err(Error::SerializationError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            FixlyConfig::from_file("/nonexistent/fixly.json"),
            Err(Error::Io(_))
        ));
    }
}
