//! SLA status classification.
//!
//! Derives `ok` / `warning` / `breached` for a ticket at a point in time and
//! annotates ticket lists for display. Pure functions of the ticket and `now`.

use crate::core::{hours, hours_between, Timestamp};
use crate::sla::policy::{SlaPolicy, WARNING_RATIO};
use crate::ticket::Ticket;
use serde::{Deserialize, Serialize};

/// SLA classification tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaTag {
    /// Done, or comfortably within the window
    Ok,
    /// Less than a quarter of the window left
    Warning,
    /// Deadline passed
    Breached,
}

impl SlaTag {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SlaTag::Ok => "ok",
            SlaTag::Warning => "warning",
            SlaTag::Breached => "breached",
        }
    }
}

impl std::fmt::Display for SlaTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one ticket.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlaStatus {
    /// Classification
    pub tag: SlaTag,
    /// Hours left (ok/warning) or hours overdue (breached); none for finished tickets
    pub hours: Option<f64>,
}

impl SlaStatus {
    fn done() -> Self {
        Self {
            tag: SlaTag::Ok,
            hours: None,
        }
    }

    /// Magnitude as display text, truncated to whole hours (`"5h"`).
    pub fn remaining_text(&self) -> Option<String> {
        self.hours.map(|h| format!("{}h", h.trunc() as i64))
    }
}

/// Derived SLA fields attached to a ticket for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaAnnotation {
    /// Classification
    pub sla_status: SlaTag,
    /// Formatted remaining/overdue hours
    pub sla_remaining: Option<String>,
}

impl From<SlaStatus> for SlaAnnotation {
    fn from(status: SlaStatus) -> Self {
        Self {
            sla_status: status.tag,
            sla_remaining: status.remaining_text(),
        }
    }
}

/// SLA evaluator over a severity policy.
#[derive(Clone, Debug, Default)]
pub struct SlaEvaluator {
    policy: SlaPolicy,
}

impl SlaEvaluator {
    /// Create an evaluator with a custom policy.
    pub fn new(policy: SlaPolicy) -> Self {
        Self { policy }
    }

    /// The policy in use.
    pub fn policy(&self) -> &SlaPolicy {
        &self.policy
    }

    /// SLA window of a ticket in hours.
    pub fn hours_for(&self, ticket: &Ticket) -> u32 {
        self.policy.hours_for(ticket)
    }

    /// Deadline of a ticket. Saturates at the latest representable time.
    pub fn deadline(&self, ticket: &Ticket) -> Timestamp {
        ticket
            .created_at()
            .checked_add_signed(hours(self.hours_for(ticket)))
            .unwrap_or(Timestamp::MAX_UTC)
    }

    /// Classify a ticket at `now`.
    pub fn status_for(&self, ticket: &Ticket, now: Timestamp) -> SlaStatus {
        if ticket.status.is_done() {
            return SlaStatus::done();
        }

        let window = self.hours_for(ticket);
        let remaining = hours_between(now, self.deadline(ticket));

        if remaining < 0.0 {
            SlaStatus {
                tag: SlaTag::Breached,
                hours: Some(remaining.abs()),
            }
        } else if remaining < f64::from(window) * WARNING_RATIO {
            SlaStatus {
                tag: SlaTag::Warning,
                hours: Some(remaining),
            }
        } else {
            SlaStatus {
                tag: SlaTag::Ok,
                hours: Some(remaining),
            }
        }
    }

    /// Attach SLA fields to every ticket in place. Order is untouched.
    pub fn annotate(&self, tickets: &mut [Ticket], now: Timestamp) {
        for ticket in tickets.iter_mut() {
            ticket.sla = Some(self.status_for(ticket, now).into());
        }
    }
}

/// SLA window of a ticket under the default policy.
pub fn sla_hours_for(ticket: &Ticket) -> u32 {
    SlaPolicy::default().hours_for(ticket)
}

/// Classify a ticket under the default policy.
pub fn sla_status_for(ticket: &Ticket, now: Timestamp) -> SlaStatus {
    SlaEvaluator::default().status_for(ticket, now)
}

/// Annotate tickets under the default policy.
pub fn annotate(tickets: &mut [Ticket], now: Timestamp) {
    SlaEvaluator::default().annotate(tickets, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::now;
    use crate::ticket::{IssueCategory, Severity, TicketStatus};
    use chrono::Duration;
    use std::collections::HashMap;

    fn medium_ticket(age: Duration, at: Timestamp) -> Ticket {
        Ticket::new(1, 1, "Leaking tap", at - age).with_severity(Severity::Medium)
    }

    #[test]
    fn test_done_tickets_are_ok() {
        let at = now();
        for status in [TicketStatus::Resolved, TicketStatus::Closed] {
            let ticket = medium_ticket(Duration::days(30), at).with_status(status);
            let status = sla_status_for(&ticket, at);
            assert_eq!(status.tag, SlaTag::Ok);
            assert_eq!(status.hours, None);
        }
    }

    #[test]
    fn test_fresh_ticket_ok() {
        let at = now();
        let status = sla_status_for(&medium_ticket(Duration::zero(), at), at);
        assert_eq!(status.tag, SlaTag::Ok);
        assert!((status.hours.unwrap() - 24.0).abs() < 1e-6);
    }

    #[test]
    fn test_warning_band() {
        let at = now();
        let status = sla_status_for(&medium_ticket(Duration::hours(20), at), at);
        assert_eq!(status.tag, SlaTag::Warning);
        assert!((status.hours.unwrap() - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_breached() {
        let at = now();
        let status = sla_status_for(&medium_ticket(Duration::hours(30), at), at);
        assert_eq!(status.tag, SlaTag::Breached);
        assert!((status.hours.unwrap() - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_quarter_boundary_is_ok() {
        let at = now();
        // 18h into a 24h window leaves exactly 6h = 25%
        let status = sla_status_for(&medium_ticket(Duration::hours(18), at), at);
        assert_eq!(status.tag, SlaTag::Ok);

        let status = sla_status_for(&medium_ticket(Duration::hours(18) + Duration::seconds(1), at), at);
        assert_eq!(status.tag, SlaTag::Warning);
    }

    #[test]
    fn test_category_window_used() {
        let at = now();
        let ticket = Ticket::new(1, 1, "No heat", at - Duration::minutes(210))
            .with_severity(Severity::Low)
            .with_category(IssueCategory::new(1, "Heating", 4));
        let status = sla_status_for(&ticket, at);
        assert_eq!(status.tag, SlaTag::Warning);
        assert_eq!(sla_hours_for(&ticket), 4);
    }

    #[test]
    fn test_in_progress_still_evaluated() {
        let at = now();
        let ticket = medium_ticket(Duration::hours(30), at).with_status(TicketStatus::InProgress);
        assert_eq!(sla_status_for(&ticket, at).tag, SlaTag::Breached);
    }

    #[test]
    fn test_annotate_truncates_and_keeps_order() {
        let at = now();
        let mut tickets = vec![
            medium_ticket(Duration::minutes(30), at),
            medium_ticket(Duration::minutes(30 * 60 + 45), at),
            medium_ticket(Duration::hours(1), at).with_status(TicketStatus::Closed),
        ];
        tickets[0].id = 10;
        tickets[1].id = 11;
        tickets[2].id = 12;

        annotate(&mut tickets, at);

        let ids: Vec<_> = tickets.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![10, 11, 12]);

        let first = tickets[0].sla.as_ref().unwrap();
        assert_eq!(first.sla_status, SlaTag::Ok);
        assert_eq!(first.sla_remaining.as_deref(), Some("23h"));

        let second = tickets[1].sla.as_ref().unwrap();
        assert_eq!(second.sla_status, SlaTag::Breached);
        assert_eq!(second.sla_remaining.as_deref(), Some("6h"));

        let third = tickets[2].sla.as_ref().unwrap();
        assert_eq!(third.sla_status, SlaTag::Ok);
        assert_eq!(third.sla_remaining, None);
    }

    #[test]
    fn test_annotate_idempotent() {
        let at = now();
        let mut tickets = vec![
            medium_ticket(Duration::hours(2), at),
            medium_ticket(Duration::hours(21), at),
        ];

        annotate(&mut tickets, at);
        let first: Vec<_> = tickets.iter().map(|t| t.sla.clone()).collect();
        annotate(&mut tickets, at);
        let second: Vec<_> = tickets.iter().map(|t| t.sla.clone()).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_huge_window_saturates() {
        let at = now();
        let evaluator = SlaEvaluator::new(SlaPolicy::new(HashMap::new(), u32::MAX));
        let ticket = Ticket::new(1, 1, "Loose tile", at);

        assert_eq!(evaluator.deadline(&ticket), Timestamp::MAX_UTC);
        let status = evaluator.status_for(&ticket, at);
        assert_eq!(status.tag, SlaTag::Ok);
        assert!(status.hours.unwrap() > 0.0);

        let category = IssueCategory::new(1, "Painting", i32::MAX);
        let status = sla_status_for(&ticket.with_category(category), at);
        assert_eq!(status.tag, SlaTag::Ok);
    }

    #[test]
    fn test_custom_policy() {
        let at = now();
        let mut policy = SlaPolicy::default();
        policy.severity_hours.insert(Severity::Medium, 48);
        let evaluator = SlaEvaluator::new(policy);

        let status = evaluator.status_for(&medium_ticket(Duration::hours(30), at), at);
        assert_eq!(status.tag, SlaTag::Ok);
    }
}
