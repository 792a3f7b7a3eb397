//! SLA triage for the admin dashboard.
//!
//! Splits active tickets into breached and urgent lists.

use crate::core::{TicketId, Timestamp};
use crate::sla::evaluator::{SlaEvaluator, SlaTag};
use crate::ticket::{Severity, Ticket};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A ticket past its deadline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BreachedTicket {
    /// Ticket ID
    pub ticket_id: TicketId,
    /// Title
    pub title: String,
    /// Severity
    pub severity: Option<Severity>,
    /// Whole hours overdue
    pub hours_late: u64,
}

/// A ticket in the warning band.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UrgentTicket {
    /// Ticket ID
    pub ticket_id: TicketId,
    /// Title
    pub title: String,
    /// Severity
    pub severity: Option<Severity>,
    /// Whole hours left
    pub hours_remaining: u64,
}

/// Breached and urgent tickets, in input order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SlaTriage {
    /// Past deadline
    pub breached: Vec<BreachedTicket>,
    /// Under a quarter of the window left
    pub urgent: Vec<UrgentTicket>,
}

impl SlaTriage {
    /// Triage the active tickets of `tickets` at `now`.
    pub fn build<'a>(
        evaluator: &SlaEvaluator,
        tickets: impl IntoIterator<Item = &'a Ticket>,
        now: Timestamp,
    ) -> Self {
        let mut triage = Self::default();

        for ticket in tickets.into_iter().filter(|t| t.status.is_active()) {
            let status = evaluator.status_for(ticket, now);
            let whole_hours = status.hours.unwrap_or(0.0).trunc() as u64;

            match status.tag {
                SlaTag::Breached => triage.breached.push(BreachedTicket {
                    ticket_id: ticket.id,
                    title: ticket.title.clone(),
                    severity: ticket.severity,
                    hours_late: whole_hours,
                }),
                SlaTag::Warning => triage.urgent.push(UrgentTicket {
                    ticket_id: ticket.id,
                    title: ticket.title.clone(),
                    severity: ticket.severity,
                    hours_remaining: whole_hours,
                }),
                SlaTag::Ok => {}
            }
        }

        debug!(
            breached = triage.breached.len(),
            urgent = triage.urgent.len(),
            "SLA triage complete"
        );
        triage
    }

    /// Number of breached tickets.
    pub fn breach_count(&self) -> usize {
        self.breached.len()
    }
}
