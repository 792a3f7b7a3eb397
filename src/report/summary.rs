//! Admin contractor roster and report tables.

use crate::core::{ContractorId, Result};
use crate::report::charts::CategoryCount;
use crate::store::TicketRepository;
use crate::ticket::{Contractor, IssueCategory, Ticket, TicketStatus};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rows kept in each report table.
pub const REPORT_LIMIT: usize = 10;

/// Workload of one contractor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractorOverview {
    /// Contractor ID
    pub contractor_id: ContractorId,
    /// Company name
    pub company_name: String,
    /// Accepting new work
    pub is_active: bool,
    /// Assigned tickets still open or in progress
    pub active_tickets: u64,
    /// Assigned tickets resolved or closed
    pub completed_tickets: u64,
}

impl ContractorOverview {
    /// Count the tickets assigned to `contractor`.
    pub fn compute(contractor: &Contractor, tickets: &[Ticket]) -> Self {
        let mut overview = Self {
            contractor_id: contractor.id,
            company_name: contractor.company_name.clone(),
            is_active: contractor.is_active,
            active_tickets: 0,
            completed_tickets: 0,
        };

        for ticket in tickets.iter().filter(|t| t.is_assigned_to(contractor.id)) {
            match ticket.status {
                TicketStatus::Open | TicketStatus::InProgress => overview.active_tickets += 1,
                TicketStatus::Resolved | TicketStatus::Closed => overview.completed_tickets += 1,
            }
        }
        overview
    }
}

/// Every contractor, inactive ones included, by company name.
pub fn contractor_roster(tickets: &[Ticket], contractors: &[Contractor]) -> Vec<ContractorOverview> {
    let mut roster: Vec<ContractorOverview> = contractors
        .iter()
        .map(|c| ContractorOverview::compute(c, tickets))
        .collect();
    roster.sort_by(|a, b| {
        a.company_name
            .cmp(&b.company_name)
            .then_with(|| a.contractor_id.cmp(&b.contractor_id))
    });
    roster
}

/// Admin report tables.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Categories by ticket count, unused ones included
    pub categories: Vec<CategoryCount>,
    /// Contractors by completed tickets, inactive ones included
    pub contractors: Vec<ContractorOverview>,
}

impl ReportSummary {
    /// Build both tables, each capped at `REPORT_LIMIT` rows.
    pub fn build(tickets: &[Ticket], categories: &[IssueCategory], contractors: &[Contractor]) -> Self {
        let mut category_rows: Vec<CategoryCount> = categories
            .iter()
            .map(|c| CategoryCount {
                category_id: c.id,
                name: c.name.clone(),
                count: tickets
                    .iter()
                    .filter(|t| t.category.as_ref().is_some_and(|tc| tc.id == c.id))
                    .count() as u64,
            })
            .collect();
        category_rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        category_rows.truncate(REPORT_LIMIT);

        let mut contractor_rows = contractor_roster(tickets, contractors);
        contractor_rows.sort_by(|a, b| {
            b.completed_tickets
                .cmp(&a.completed_tickets)
                .then_with(|| a.company_name.cmp(&b.company_name))
        });
        contractor_rows.truncate(REPORT_LIMIT);

        Self {
            categories: category_rows,
            contractors: contractor_rows,
        }
    }

    /// Build from repository contents.
    pub async fn load<R: TicketRepository + ?Sized>(repo: &R) -> Result<Self> {
        let tickets = repo.list_tickets().await?;
        let categories = repo.list_categories().await?;
        let contractors = repo.list_contractors().await?;

        let summary = Self::build(&tickets, &categories, &contractors);
        debug!(
            categories = summary.categories.len(),
            contractors = summary.contractors.len(),
            "Report summary built"
        );
        Ok(summary)
    }

    /// Render as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::now;
    use crate::store::InMemoryTicketStore;

    fn assigned(contractor_id: ContractorId, status: TicketStatus) -> Ticket {
        let mut ticket = Ticket::new(1, 1, "job", now()).with_status(status);
        ticket.assigned_contractor = Some(contractor_id);
        ticket
    }

    #[test]
    fn test_roster_includes_inactive_sorted_by_name() {
        let mut dormant = Contractor::new(3, "Zenith Roofing");
        dormant.is_active = false;
        let contractors = vec![dormant, Contractor::new(1, "Acme"), Contractor::new(2, "Bolt")];
        let tickets = vec![
            assigned(1, TicketStatus::Open),
            assigned(1, TicketStatus::InProgress),
            assigned(1, TicketStatus::Closed),
            assigned(3, TicketStatus::Resolved),
        ];

        let roster = contractor_roster(&tickets, &contractors);
        let names: Vec<_> = roster.iter().map(|r| r.company_name.as_str()).collect();
        assert_eq!(names, vec!["Acme", "Bolt", "Zenith Roofing"]);

        assert_eq!((roster[0].active_tickets, roster[0].completed_tickets), (2, 1));
        assert_eq!((roster[1].active_tickets, roster[1].completed_tickets), (0, 0));
        assert!(!roster[2].is_active);
        assert_eq!(roster[2].completed_tickets, 1);
    }

    #[test]
    fn test_report_keeps_zero_counts_and_caps_rows() {
        let categories: Vec<IssueCategory> = (1..=12)
            .map(|id| IssueCategory::new(id, &format!("Category {:02}", id), 0))
            .collect();
        let tickets = vec![
            Ticket::new(1, 1, "a", now()).with_category(categories[11].clone()),
            Ticket::new(1, 1, "b", now()).with_category(categories[11].clone()),
            Ticket::new(1, 1, "c", now()).with_category(categories[4].clone()),
            assigned(7, TicketStatus::Resolved),
            assigned(7, TicketStatus::Closed),
            assigned(8, TicketStatus::Closed),
        ];
        let mut retired = Contractor::new(8, "Retired Co");
        retired.is_active = false;
        let contractors = vec![Contractor::new(6, "Idle"), Contractor::new(7, "Busy"), retired];

        let summary = ReportSummary::build(&tickets, &categories, &contractors);

        assert_eq!(summary.categories.len(), REPORT_LIMIT);
        assert_eq!(summary.categories[0].name, "Category 12");
        assert_eq!(summary.categories[0].count, 2);
        assert_eq!(summary.categories[1].name, "Category 05");
        assert_eq!(summary.categories[2].count, 0);

        let order: Vec<_> = summary.contractors.iter().map(|c| c.contractor_id).collect();
        assert_eq!(order, vec![7, 8, 6]);
    }

    #[tokio::test]
    async fn test_load_from_store() {
        let store = InMemoryTicketStore::new();
        store.upsert_category(IssueCategory::new(1, "Heating", 12)).await.unwrap();
        store.upsert_contractor(Contractor::new(1, "Acme")).await.unwrap();
        store.insert_ticket(assigned(1, TicketStatus::Resolved)).await.unwrap();

        let summary = ReportSummary::load(&store).await.unwrap();
        assert_eq!(summary.categories[0].count, 0);
        assert_eq!(summary.contractors[0].completed_tickets, 1);
        assert!(summary.to_json().unwrap().contains("\"completed_tickets\": 1"));
    }
}
