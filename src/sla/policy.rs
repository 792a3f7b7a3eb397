//! SLA windows.
//!
//! Resolves how many hours a ticket has before it breaches.

use crate::ticket::{Severity, Ticket};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Window used when a ticket has neither a category override nor a severity.
pub const DEFAULT_SLA_HOURS: u32 = 24;

/// Longest window a configuration may set: one hundred years.
pub const MAX_SLA_HOURS: u32 = 100 * 365 * 24;

/// Fraction of the window below which an open ticket is flagged `warning`.
///
/// Fixed for every category.
pub const WARNING_RATIO: f64 = 0.25;

/// Default window for a severity.
pub fn default_hours(severity: Severity) -> u32 {
    match severity {
        Severity::Critical => 2,
        Severity::High => 8,
        Severity::Medium => 24,
        Severity::Low => 72,
    }
}

/// Severity to SLA window table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlaPolicy {
    /// Hours per severity
    pub severity_hours: HashMap<Severity, u32>,
    /// Hours when severity is absent or missing from the table
    pub fallback_hours: u32,
}

impl SlaPolicy {
    /// Create a policy from an explicit table.
    pub fn new(severity_hours: HashMap<Severity, u32>, fallback_hours: u32) -> Self {
        Self {
            severity_hours,
            fallback_hours,
        }
    }

    /// Hours for a severity, ignoring categories.
    pub fn hours_for_severity(&self, severity: Option<Severity>) -> u32 {
        severity
            .and_then(|s| self.severity_hours.get(&s).copied())
            .unwrap_or(self.fallback_hours)
    }

    /// SLA window for a ticket: a positive category override wins over severity.
    pub fn hours_for(&self, ticket: &Ticket) -> u32 {
        ticket
            .category
            .as_ref()
            .and_then(|c| c.sla_override())
            .unwrap_or_else(|| self.hours_for_severity(ticket.severity))
    }
}

impl Default for SlaPolicy {
    fn default() -> Self {
        let severity_hours = Severity::ALL
            .into_iter()
            .map(|s| (s, default_hours(s)))
            .collect();
        Self::new(severity_hours, DEFAULT_SLA_HOURS)
    }
}
