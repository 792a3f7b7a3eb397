//! # Fixly - property-maintenance ticketing core
//!
//! Tenants report issues, admins triage and assign them to contractors, and
//! contractors update progress. This crate provides:
//! - **SLA**: deadline computation and `ok` / `warning` / `breached` classification
//! - **Access**: one role-gated ticket desk for admins, tenants and contractors
//! - **Reports**: dashboard counters, charts and activity feed
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fixly::access::{Actor, NewTicket, TicketDesk, TicketFilter};
//! use fixly::store::InMemoryTicketStore;
//!
//! #[tokio::main]
//! async fn main() -> fixly::Result<()> {
//!     let desk = TicketDesk::new(Arc::new(InMemoryTicketStore::new()));
//!     let tenant = Actor::Tenant(1);
//!
//!     let report = NewTicket {
//!         unit_id: 12,
//!         title: "Kitchen tap leaking".to_string(),
//!         ..Default::default()
//!     };
//!     desk.create_ticket(&tenant, report, fixly::core::now()).await?;
//!
//!     for ticket in desk.list_tickets(&tenant, &TicketFilter::new(), fixly::core::now()).await? {
//!         println!("#{} {:?}", ticket.id, ticket.sla);
//!     }
//!     Ok(())
//! }
//! ```

pub mod access;
pub mod config;
pub mod core;
pub mod monitoring;
pub mod report;
pub mod sla;
pub mod store;
pub mod ticket;

pub use crate::core::error::{Error, Result};
