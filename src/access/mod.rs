//! Ticket access
//!
//! One ticket capability for every role:
//! - Actors and permission predicates
//! - List filters
//! - The ticket desk (create, list, assign, update, message)

pub mod actor;
pub mod desk;
pub mod filter;

pub use actor::{Actor, Role};
pub use desk::{AccessWindows, NewTicket, TicketDesk, TicketDetail};
pub use filter::TicketFilter;
