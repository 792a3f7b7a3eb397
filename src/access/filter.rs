//! Query filters for ticket lists.

use crate::sla::SlaTag;
use crate::ticket::{Ticket, TicketStatus};
use serde::{Deserialize, Serialize};

/// Filter for listing tickets.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TicketFilter {
    /// Only this status
    pub status: Option<TicketStatus>,
    /// Case-insensitive text match on title, description or ID
    pub search: Option<String>,
    /// Only tickets whose SLA is breached
    pub breached_only: bool,
    /// Maximum results
    pub limit: Option<usize>,
}

impl TicketFilter {
    /// Create a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by status.
    pub fn by_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filter by search text. Blank text is ignored.
    pub fn search(mut self, text: &str) -> Self {
        let text = text.trim();
        self.search = if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        };
        self
    }

    /// Keep breached tickets only.
    pub fn breached_only(mut self) -> Self {
        self.breached_only = true;
        self
    }

    /// Set limit.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check the fields known before SLA annotation.
    pub fn matches(&self, ticket: &Ticket) -> bool {
        if let Some(status) = self.status {
            if ticket.status != status {
                return false;
            }
        }

        if let Some(ref needle) = self.search {
            if !ticket.matches_search(needle) {
                return false;
            }
        }

        true
    }

    /// Check the SLA condition on an annotated ticket.
    pub fn matches_sla(&self, ticket: &Ticket) -> bool {
        !self.breached_only
            || ticket
                .sla
                .as_ref()
                .is_some_and(|a| a.sla_status == SlaTag::Breached)
    }
}
