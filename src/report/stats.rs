//! Dashboard counters.

use crate::config::DashboardConfig;
use crate::core::Timestamp;
use crate::sla::{SlaEvaluator, SlaTag};
use crate::ticket::{Contractor, Ticket, TicketStatus};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Headline numbers for the admin dashboard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Open tickets
    pub open: u64,
    /// Tickets in progress
    pub in_progress: u64,
    /// Active tickets past their SLA deadline
    pub sla_breached: u64,
    /// Resolved or closed within the look-back window
    pub resolved_recent: u64,
    /// All tickets
    pub total: u64,
    /// Open tickets with no contractor
    pub unassigned: u64,
    /// Contractors accepting work
    pub active_contractors: u64,
}

impl DashboardStats {
    /// Compute from the full ticket and contractor lists.
    pub fn compute(
        tickets: &[Ticket],
        contractors: &[Contractor],
        evaluator: &SlaEvaluator,
        config: &DashboardConfig,
        now: Timestamp,
    ) -> Self {
        let since = Duration::try_days(config.resolved_window_days)
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(Timestamp::MIN_UTC);
        let mut stats = Self {
            total: tickets.len() as u64,
            active_contractors: contractors.iter().filter(|c| c.is_active).count() as u64,
            ..Default::default()
        };

        for ticket in tickets {
            match ticket.status {
                TicketStatus::Open => {
                    stats.open += 1;
                    if ticket.assigned_contractor.is_none() {
                        stats.unassigned += 1;
                    }
                }
                TicketStatus::InProgress => stats.in_progress += 1,
                TicketStatus::Resolved | TicketStatus::Closed => {
                    if ticket.resolved_at.is_some_and(|at| at >= since) {
                        stats.resolved_recent += 1;
                    }
                }
            }

            if ticket.status.is_active()
                && evaluator.status_for(ticket, now).tag == SlaTag::Breached
            {
                stats.sla_breached += 1;
            }
        }

        stats
    }
}

/// Counters for a tenant's or contractor's own dashboard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleStats {
    /// All visible tickets
    pub total: u64,
    /// Open
    pub open: u64,
    /// In progress
    pub in_progress: u64,
    /// Resolved or closed
    pub completed: u64,
}

impl RoleStats {
    /// Count tickets by status.
    pub fn compute<'a>(tickets: impl IntoIterator<Item = &'a Ticket>) -> Self {
        tickets.into_iter().fold(Self::default(), |mut stats, ticket| {
            stats.total += 1;
            match ticket.status {
                TicketStatus::Open => stats.open += 1,
                TicketStatus::InProgress => stats.in_progress += 1,
                TicketStatus::Resolved | TicketStatus::Closed => stats.completed += 1,
            }
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::now;
    use crate::ticket::Severity;

    #[test]
    fn test_dashboard_stats() {
        let at = now();
        let mut assigned = Ticket::new(1, 1, "a", at).with_severity(Severity::Low);
        assigned.assigned_contractor = Some(3);

        let mut recent = Ticket::new(1, 1, "b", at - Duration::days(2));
        recent.set_status(TicketStatus::Resolved, at - Duration::days(1));

        let mut old = Ticket::new(1, 1, "c", at - Duration::days(90));
        old.set_status(TicketStatus::Closed, at - Duration::days(60));
        old.resolved_at = Some(at - Duration::days(60));

        let tickets = vec![
            Ticket::new(1, 1, "late", at - Duration::hours(40)),
            assigned,
            Ticket::new(1, 1, "busy", at).with_status(TicketStatus::InProgress),
            recent,
            old,
        ];
        let mut retired = Contractor::new(2, "Retired");
        retired.is_active = false;
        let contractors = vec![Contractor::new(1, "Acme"), retired];

        let stats = DashboardStats::compute(
            &tickets,
            &contractors,
            &SlaEvaluator::default(),
            &DashboardConfig::default(),
            at,
        );

        assert_eq!(
            stats,
            DashboardStats {
                open: 2,
                in_progress: 1,
                sla_breached: 1,
                resolved_recent: 1,
                total: 5,
                unassigned: 1,
                active_contractors: 1,
            }
        );
    }

    #[test]
    fn test_unbounded_window_counts_everything() {
        let at = now();
        let mut ancient = Ticket::new(1, 1, "a", at - Duration::days(4000));
        ancient.set_status(TicketStatus::Resolved, at - Duration::days(3999));

        let config = DashboardConfig {
            resolved_window_days: 9_000_000_000_000_000,
            ..Default::default()
        };
        let stats = DashboardStats::compute(&[ancient], &[], &SlaEvaluator::default(), &config, at);
        assert_eq!(stats.resolved_recent, 1);
    }

    #[test]
    fn test_role_stats() {
        let at = now();
        let tickets = vec![
            Ticket::new(1, 1, "a", at),
            Ticket::new(1, 1, "b", at).with_status(TicketStatus::InProgress),
            Ticket::new(1, 1, "c", at).with_status(TicketStatus::Resolved),
            Ticket::new(1, 1, "d", at).with_status(TicketStatus::Closed),
        ];

        let stats = RoleStats::compute(&tickets);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.open, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.completed, 2);
    }
}
