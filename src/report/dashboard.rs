//! Admin dashboard report.
//!
//! Gathers counters, SLA triage, charts and recent activity in one pass over
//! the repository.

use crate::config::DashboardConfig;
use crate::core::{Result, Timestamp};
use crate::report::charts::{recent_activity, Activity, ChartData};
use crate::report::stats::DashboardStats;
use crate::sla::{SlaEvaluator, SlaTriage};
use crate::store::TicketRepository;
use crate::ticket::{Ticket, TicketStatus};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything shown on the admin dashboard.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Generated timestamp
    pub generated: Timestamp,
    /// Headline counters
    pub stats: DashboardStats,
    /// Breached and urgent tickets
    pub triage: SlaTriage,
    /// Open tickets waiting for a contractor, oldest first
    pub unassigned: Vec<Ticket>,
    /// Chart series
    pub charts: ChartData,
    /// Recent activity feed
    pub activity: Vec<Activity>,
}

/// Maximum unassigned tickets listed on the dashboard.
const UNASSIGNED_LIMIT: usize = 10;

impl DashboardReport {
    /// Build the report from repository contents.
    pub async fn load<R: TicketRepository + ?Sized>(
        repo: &R,
        evaluator: &SlaEvaluator,
        config: &DashboardConfig,
        now: Timestamp,
    ) -> Result<Self> {
        let tickets = repo.list_tickets().await?;
        let categories = repo.list_categories().await?;
        let contractors = repo.list_contractors().await?;

        let stats = DashboardStats::compute(&tickets, &contractors, evaluator, config, now);
        let triage = SlaTriage::build(evaluator, &tickets, now);
        let charts = ChartData::build(&tickets, &categories, &contractors, config, now);
        let activity = recent_activity(&tickets, now);

        let mut unassigned: Vec<Ticket> = tickets
            .into_iter()
            .filter(|t| t.status == TicketStatus::Open && t.assigned_contractor.is_none())
            .collect();
        unassigned.sort_by_key(|t| t.created_at());
        unassigned.truncate(UNASSIGNED_LIMIT);
        evaluator.annotate(&mut unassigned, now);

        info!(
            total = stats.total,
            breached = stats.sla_breached,
            urgent = triage.urgent.len(),
            "Dashboard report generated"
        );

        Ok(Self {
            generated: now,
            stats,
            triage,
            unassigned,
            charts,
            activity,
        })
    }

    /// Render as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render as plain text.
    pub fn to_text(&self) -> String {
        let mut output = String::new();
        let stats = &self.stats;

        output.push_str(&format!("Dashboard ({})\n", self.generated.format("%Y-%m-%d %H:%M")));
        output.push_str(&format!(
            "Open: {}  In progress: {}  Unassigned: {}  Total: {}\n",
            stats.open, stats.in_progress, stats.unassigned, stats.total
        ));
        output.push_str(&format!(
            "SLA breached: {}  Resolved (recent): {}  Active contractors: {}\n",
            stats.sla_breached, stats.resolved_recent, stats.active_contractors
        ));

        if !self.triage.breached.is_empty() {
            output.push_str("\nBreached:\n");
            for entry in &self.triage.breached {
                output.push_str(&format!(
                    "  #{} {} ({}h late)\n",
                    entry.ticket_id, entry.title, entry.hours_late
                ));
            }
        }

        if !self.triage.urgent.is_empty() {
            output.push_str("\nUrgent:\n");
            for entry in &self.triage.urgent {
                output.push_str(&format!(
                    "  #{} {} ({}h left)\n",
                    entry.ticket_id, entry.title, entry.hours_remaining
                ));
            }
        }

        if !self.activity.is_empty() {
            output.push_str("\nRecent activity:\n");
            for item in &self.activity {
                output.push_str(&format!("  {} - {}\n", item.title, item.time));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::now;
    use crate::store::InMemoryTicketStore;
    use crate::ticket::{Contractor, Severity};
    use chrono::Duration;

    #[tokio::test]
    async fn test_dashboard_report() {
        let store = InMemoryTicketStore::new();
        let at = now();
        let flood = Ticket::new(1, 1, "Flooded basement", at - Duration::hours(5))
            .with_severity(Severity::Critical);
        let radiator = Ticket::new(1, 1, "Cold radiator", at - Duration::hours(7))
            .with_severity(Severity::High);
        store.insert_ticket(flood).await.unwrap();
        store.insert_ticket(radiator).await.unwrap();
        store.upsert_contractor(Contractor::new(1, "Acme")).await.unwrap();

        let report = DashboardReport::load(
            &store,
            &SlaEvaluator::default(),
            &DashboardConfig::default(),
            at,
        )
        .await
        .unwrap();

        assert_eq!(report.stats.total, 2);
        assert_eq!(report.stats.sla_breached, 1);
        assert_eq!(report.triage.urgent.len(), 1);
        assert_eq!(report.unassigned.len(), 2);
        assert_eq!(report.unassigned[0].title, "Cold radiator");
        assert!(report.unassigned[0].sla.is_some());

        let text = report.to_text();
        assert!(text.contains("#1 Flooded basement (3h late)"));
        assert!(text.contains("#2 Cold radiator (1h left)"));

        let json = report.to_json().unwrap();
        assert!(json.contains("\"sla_breached\": 1"));
    }
}
