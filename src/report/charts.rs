//! Chart series and the recent activity feed.

use crate::config::{DashboardConfig, MAX_CHART_MONTHS};
use crate::core::{CategoryId, ContractorId, TicketId, Timestamp};
use crate::ticket::{Contractor, IssueCategory, Ticket, TicketStatus};
use chrono::{Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Longest contractor label shown on charts.
const CONTRACTOR_LABEL_CHARS: usize = 15;

/// Ticket count for one status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    /// Status
    pub status: TicketStatus,
    /// Tickets in that status
    pub count: u64,
}

/// Ticket count for one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// Category ID
    pub category_id: CategoryId,
    /// Category name
    pub name: String,
    /// Tickets filed under it
    pub count: u64,
}

/// Completed and pending work for one contractor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractorPerformance {
    /// Contractor ID
    pub contractor_id: ContractorId,
    /// Company name, shortened for chart labels
    pub label: String,
    /// Resolved or closed
    pub completed: u64,
    /// Open or in progress
    pub pending: u64,
}

/// All series drawn on the admin dashboard.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChartData {
    /// Month labels, oldest first (`Jan`, `Feb`, ...)
    pub months: Vec<String>,
    /// Tickets created per month
    pub created: Vec<u64>,
    /// Tickets resolved per month
    pub resolved: Vec<u64>,
    /// Breakdown by status
    pub status: Vec<StatusCount>,
    /// Busiest categories
    pub categories: Vec<CategoryCount>,
    /// Contractors by completed work
    pub contractors: Vec<ContractorPerformance>,
}

impl ChartData {
    /// Build every series.
    pub fn build(
        tickets: &[Ticket],
        categories: &[IssueCategory],
        contractors: &[Contractor],
        config: &DashboardConfig,
        now: Timestamp,
    ) -> Self {
        let mut charts = Self::default();

        for (start, end) in month_buckets(now, config.chart_months) {
            charts.months.push(start.format("%b").to_string());
            charts.created.push(
                tickets
                    .iter()
                    .filter(|t| t.created_at() >= start && t.created_at() < end)
                    .count() as u64,
            );
            charts.resolved.push(
                tickets
                    .iter()
                    .filter(|t| t.resolved_at.is_some_and(|at| at >= start && at < end))
                    .count() as u64,
            );
        }

        charts.status = TicketStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: tickets.iter().filter(|t| t.status == status).count() as u64,
            })
            .collect();

        charts.categories = top_categories(tickets, categories, config.top_categories);
        charts.contractors = top_contractors(tickets, contractors, config.top_contractors);
        charts
    }
}

/// `(start, end)` of the last `count` calendar months, oldest first.
/// The current month ends at `now`. At most `MAX_CHART_MONTHS` buckets.
pub fn month_buckets(now: Timestamp, count: u32) -> Vec<(Timestamp, Timestamp)> {
    let count = count.min(MAX_CHART_MONTHS) as i32;
    let current = now.year() * 12 + now.month0() as i32;

    (0..count)
        .rev()
        .filter_map(|back| {
            let index = current - back;
            let start = month_start(index)?;
            let end = if back == 0 { now } else { month_start(index + 1)? };
            Some((start, end))
        })
        .collect()
}

/// Midnight on the first day of a month, counted as `year * 12 + month0`.
/// None only before the earliest date chrono represents.
fn month_start(index: i32) -> Option<Timestamp> {
    let (year, month0) = (index.div_euclid(12), index.rem_euclid(12));
    Utc.with_ymd_and_hms(year, month0 as u32 + 1, 1, 0, 0, 0)
        .single()
}

fn top_categories(tickets: &[Ticket], categories: &[IssueCategory], limit: usize) -> Vec<CategoryCount> {
    let mut counts: HashMap<CategoryId, u64> = HashMap::new();
    for category in tickets.iter().filter_map(|t| t.category.as_ref()) {
        *counts.entry(category.id).or_default() += 1;
    }

    let mut rows: Vec<CategoryCount> = categories
        .iter()
        .filter_map(|c| {
            counts.get(&c.id).map(|count| CategoryCount {
                category_id: c.id,
                name: c.name.clone(),
                count: *count,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    rows.truncate(limit);
    rows
}

fn top_contractors(
    tickets: &[Ticket],
    contractors: &[Contractor],
    limit: usize,
) -> Vec<ContractorPerformance> {
    let mut rows: Vec<ContractorPerformance> = contractors
        .iter()
        .filter(|c| c.is_active)
        .map(|c| {
            let (completed, pending) = tickets
                .iter()
                .filter(|t| t.is_assigned_to(c.id))
                .fold((0, 0), |(done, open), t| {
                    if t.status.is_done() {
                        (done + 1, open)
                    } else {
                        (done, open + 1)
                    }
                });
            ContractorPerformance {
                contractor_id: c.id,
                label: c.company_name.chars().take(CONTRACTOR_LABEL_CHARS).collect(),
                completed,
                pending,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.completed
            .cmp(&a.completed)
            .then_with(|| a.label.cmp(&b.label))
    });
    rows.truncate(limit);
    rows
}

/// What happened to a ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Ticket reported
    Created,
    /// Ticket resolved
    Resolved,
}

/// One line of the recent activity feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Kind of event
    pub kind: ActivityKind,
    /// Ticket ID
    pub ticket_id: TicketId,
    /// e.g. `#12 created`
    pub title: String,
    /// e.g. `5h ago`
    pub time: String,
}

/// Latest three created and latest two resolved tickets.
pub fn recent_activity(tickets: &[Ticket], now: Timestamp) -> Vec<Activity> {
    let mut created: Vec<&Ticket> = tickets.iter().collect();
    created.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

    let mut resolved: Vec<(&Ticket, Timestamp)> = tickets
        .iter()
        .filter_map(|t| t.resolved_at.map(|at| (t, at)))
        .collect();
    resolved.sort_by(|a, b| b.1.cmp(&a.1));

    let created = created.into_iter().take(3).map(|t| Activity {
        kind: ActivityKind::Created,
        ticket_id: t.id,
        title: format!("#{} created", t.id),
        time: relative_time(t.created_at(), now),
    });
    let resolved = resolved.into_iter().take(2).map(|(t, at)| Activity {
        kind: ActivityKind::Resolved,
        ticket_id: t.id,
        title: format!("#{} resolved", t.id),
        time: relative_time(at, now),
    });

    created.chain(resolved).collect()
}

/// Short "time ago" text: days, else hours past the first hour, else minutes.
pub fn relative_time(at: Timestamp, now: Timestamp) -> String {
    let elapsed = now - at;
    let days = elapsed.num_days();
    let seconds = elapsed.num_seconds() - days * 86_400;

    if days > 0 {
        format!("{}d ago", days)
    } else if seconds > 3600 {
        format!("{}h ago", seconds / 3600)
    } else {
        format!("{}min ago", seconds.max(0) / 60)
    }
}
