//! TicketRepository trait definition.
//!
//! The data-access seam used by the ticket desk.

use crate::core::{CategoryId, ContractorId, Result, TicketId};
use crate::ticket::{Assignment, Contractor, IssueCategory, Message, StatusChange, Ticket};
use async_trait::async_trait;

/// Storage for tickets and everything hanging off them.
///
/// Implementations must never change a stored ticket's creation time.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Store a new ticket and return its assigned ID.
    async fn insert_ticket(&self, ticket: Ticket) -> Result<TicketId>;

    /// Read a ticket by ID.
    ///
    /// Returns None if the ticket doesn't exist.
    async fn get_ticket(&self, id: TicketId) -> Result<Option<Ticket>>;

    /// Replace a stored ticket.
    ///
    /// Fails with `TicketNotFound` for unknown IDs.
    async fn update_ticket(&self, ticket: Ticket) -> Result<()>;

    /// All tickets, in ID order.
    async fn list_tickets(&self) -> Result<Vec<Ticket>>;

    /// Store or replace a category.
    async fn upsert_category(&self, category: IssueCategory) -> Result<()>;

    /// Read a category by ID.
    async fn get_category(&self, id: CategoryId) -> Result<Option<IssueCategory>>;

    /// All categories.
    async fn list_categories(&self) -> Result<Vec<IssueCategory>>;

    /// Store or replace a contractor.
    async fn upsert_contractor(&self, contractor: Contractor) -> Result<()>;

    /// Read a contractor by ID.
    async fn get_contractor(&self, id: ContractorId) -> Result<Option<Contractor>>;

    /// All contractors.
    async fn list_contractors(&self) -> Result<Vec<Contractor>>;

    /// Store or replace an assignment.
    async fn save_assignment(&self, assignment: Assignment) -> Result<()>;

    /// Assignments of a ticket, oldest first.
    async fn assignments_for(&self, ticket_id: TicketId) -> Result<Vec<Assignment>>;

    /// Append a status history row.
    async fn record_status_change(&self, change: StatusChange) -> Result<()>;

    /// Status history of a ticket, oldest first.
    async fn status_history(&self, ticket_id: TicketId) -> Result<Vec<StatusChange>>;

    /// Append a message.
    async fn add_message(&self, message: Message) -> Result<()>;

    /// Messages of a ticket, oldest first.
    async fn messages_for(&self, ticket_id: TicketId) -> Result<Vec<Message>>;

    /// Number of stored tickets.
    async fn count(&self) -> Result<u64> {
        Ok(self.list_tickets().await?.len() as u64)
    }

    /// Health check for the backend.
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}
