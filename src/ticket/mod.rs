//! Ticket Module
//!
//! Domain model for maintenance tickets:
//! - Tickets, status and severity
//! - Issue categories and contractors
//! - Assignments, status history and messages

pub mod history;
pub mod model;

pub use history::{Assignment, AssignmentStatus, Message, StatusChange};
pub use model::{Contractor, IssueCategory, Severity, Ticket, TicketStatus};
