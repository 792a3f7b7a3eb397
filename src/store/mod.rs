//! Ticket storage
//!
//! Trait-based repository with an in-memory implementation.

pub mod memory;
pub mod repository;

pub use memory::InMemoryTicketStore;
pub use repository::TicketRepository;
