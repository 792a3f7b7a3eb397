//! Ticket domain model.
//!
//! Tickets, their status and severity, issue categories and contractors.

use crate::core::{CategoryId, ContractorId, Error, TenantId, TicketId, Timestamp, UnitId};
use crate::sla::SlaAnnotation;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a ticket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Reported, not yet worked on
    #[default]
    Open,
    /// Assigned or accepted by a contractor
    InProgress,
    /// Work finished
    Resolved,
    /// Archived
    Closed,
}

impl TicketStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [TicketStatus; 4] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
        TicketStatus::Closed,
    ];

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }

    /// Open or in progress.
    pub fn is_active(&self) -> bool {
        matches!(self, TicketStatus::Open | TicketStatus::InProgress)
    }

    /// Resolved or closed.
    pub fn is_done(&self) -> bool {
        !self.is_active()
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TicketStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| Error::invalid("status", s))
    }
}

/// Default urgency of a ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Cosmetic, can wait days
    Low,
    /// Ordinary repair
    Medium,
    /// Affects daily use of the unit
    High,
    /// Safety risk or major damage
    Critical,
}

impl Severity {
    /// All severities, most urgent first.
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_str() == s)
            .ok_or_else(|| Error::invalid("severity", s))
    }
}

/// Issue category, optionally overriding the severity SLA window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IssueCategory {
    /// Category ID
    pub id: CategoryId,
    /// Unique name
    pub name: String,
    /// SLA window in hours; only positive values override
    pub sla_hours: i32,
    /// Description
    pub description: Option<String>,
}

impl IssueCategory {
    /// Create a new category.
    pub fn new(id: CategoryId, name: &str, sla_hours: i32) -> Self {
        Self {
            id,
            name: name.to_string(),
            sla_hours,
            description: None,
        }
    }

    /// The SLA override, if this category carries a positive one.
    pub fn sla_override(&self) -> Option<u32> {
        u32::try_from(self.sla_hours).ok().filter(|h| *h > 0)
    }
}

/// A contractor company that can be assigned tickets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contractor {
    /// Contractor ID
    pub id: ContractorId,
    /// Company name
    pub company_name: String,
    /// Whether new work may be assigned
    pub is_active: bool,
}

impl Contractor {
    /// Create an active contractor.
    pub fn new(id: ContractorId, company_name: &str) -> Self {
        Self {
            id,
            company_name: company_name.to_string(),
            is_active: true,
        }
    }
}

/// A maintenance ticket.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ticket {
    /// Ticket ID (assigned by the repository)
    pub id: TicketId,
    /// Reporting tenant
    pub tenant_id: TenantId,
    /// Affected unit
    pub unit_id: UnitId,
    /// Short title
    pub title: String,
    /// Full description
    pub description: String,
    /// Lifecycle status
    pub status: TicketStatus,
    /// Severity, if the reporter gave one
    pub severity: Option<Severity>,
    /// Category, if classified
    pub category: Option<IssueCategory>,
    /// Currently assigned contractor
    pub assigned_contractor: Option<ContractorId>,
    /// When the current contractor was assigned
    pub assigned_at: Option<Timestamp>,
    /// When the tenant can give access
    pub access_windows: Option<String>,
    /// Creation time, fixed for the ticket's lifetime
    created_at: Timestamp,
    /// Last modification
    pub updated_at: Timestamp,
    /// Resolution time
    pub resolved_at: Option<Timestamp>,
    /// Closing time
    pub closed_at: Option<Timestamp>,
    /// Derived SLA fields, never persisted
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub sla: Option<SlaAnnotation>,
}

impl Ticket {
    /// Create a new open ticket.
    pub fn new(tenant_id: TenantId, unit_id: UnitId, title: &str, created_at: Timestamp) -> Self {
        Self {
            id: 0,
            tenant_id,
            unit_id,
            title: title.to_string(),
            description: String::new(),
            status: TicketStatus::Open,
            severity: None,
            category: None,
            assigned_contractor: None,
            assigned_at: None,
            access_windows: None,
            created_at,
            updated_at: created_at,
            resolved_at: None,
            closed_at: None,
            sla: None,
        }
    }

    /// Set description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Set severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Set category.
    pub fn with_category(mut self, category: IssueCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Set status.
    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = status;
        self
    }

    /// Creation time.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Whether the given contractor currently holds this ticket.
    pub fn is_assigned_to(&self, contractor_id: ContractorId) -> bool {
        self.assigned_contractor == Some(contractor_id)
    }

    /// Move to a new status, stamping resolution/closing times.
    pub fn set_status(&mut self, status: TicketStatus, at: Timestamp) {
        self.status = status;
        match status {
            TicketStatus::Resolved => self.resolved_at = Some(at),
            TicketStatus::Closed => self.closed_at = Some(at),
            _ => {}
        }
        self.updated_at = at;
    }

    /// Case-insensitive match on title, description or id.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.id.to_string().contains(&needle)
    }
}
