//! Ticket history: contractor assignments, status changes and messages.

use crate::access::Role;
use crate::core::{ContractorId, Error, TicketId, Timestamp};
use crate::ticket::TicketStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Progress of a contractor assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// Waiting for the contractor to answer
    Pending,
    /// Contractor took the job
    Accepted,
    /// Contractor refused the job
    Declined,
    /// Job done
    Completed,
}

impl AssignmentStatus {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::Accepted => "accepted",
            AssignmentStatus::Declined => "declined",
            AssignmentStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssignmentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AssignmentStatus::Pending),
            "accepted" => Ok(AssignmentStatus::Accepted),
            "declined" => Ok(AssignmentStatus::Declined),
            "completed" => Ok(AssignmentStatus::Completed),
            other => Err(Error::invalid("assignment status", other)),
        }
    }
}

/// A ticket offered to a contractor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Assignment {
    /// Assignment ID
    pub id: Uuid,
    /// Ticket
    pub ticket_id: TicketId,
    /// Contractor
    pub contractor_id: ContractorId,
    /// Status
    pub status: AssignmentStatus,
    /// Offered at
    pub created_at: Timestamp,
    /// Declined at
    pub declined_at: Option<Timestamp>,
    /// Reason given when declining
    pub decline_reason: Option<String>,
}

impl Assignment {
    /// Create a pending assignment.
    pub fn pending(ticket_id: TicketId, contractor_id: ContractorId, at: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            ticket_id,
            contractor_id,
            status: AssignmentStatus::Pending,
            created_at: at,
            declined_at: None,
            decline_reason: None,
        }
    }

    /// Still waiting for an answer.
    pub fn is_pending(&self) -> bool {
        self.status == AssignmentStatus::Pending
    }

    /// Accept the job.
    pub fn accept(&mut self) {
        self.status = AssignmentStatus::Accepted;
    }

    /// Decline the job.
    pub fn decline(&mut self, reason: &str, at: Timestamp) {
        self.status = AssignmentStatus::Declined;
        self.declined_at = Some(at);
        self.decline_reason = Some(reason.to_string()).filter(|r| !r.is_empty());
    }
}

/// One row of a ticket's status history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusChange {
    /// Entry ID
    pub id: Uuid,
    /// Ticket
    pub ticket_id: TicketId,
    /// Previous status
    pub old_status: TicketStatus,
    /// New status
    pub new_status: TicketStatus,
    /// Role of whoever made the change
    pub changed_by: Role,
    /// Optional reason
    pub reason: Option<String>,
    /// When
    pub created_at: Timestamp,
}

/// A message in a ticket's thread.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    /// Message ID
    pub id: Uuid,
    /// Ticket
    pub ticket_id: TicketId,
    /// Sender role
    pub sender_role: Role,
    /// Sender ID within that role
    pub sender_id: u64,
    /// Text
    pub text: String,
    /// Hidden from tenants
    pub is_internal: bool,
    /// When
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::now;

    #[test]
    fn test_assignment_lifecycle() {
        let mut assignment = Assignment::pending(1, 9, now());
        assert!(assignment.is_pending());

        assignment.decline("", now());
        assert_eq!(assignment.status, AssignmentStatus::Declined);
        assert!(assignment.declined_at.is_some());
        assert!(assignment.decline_reason.is_none());
    }

    #[test]
    fn test_assignment_status_parse() {
        assert_eq!(
            "accepted".parse::<AssignmentStatus>().unwrap(),
            AssignmentStatus::Accepted
        );
        assert!("maybe".parse::<AssignmentStatus>().is_err());
    }
}
