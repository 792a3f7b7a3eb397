//! SLA Module
//!
//! Provides ticket SLA evaluation:
//! - SLA windows per severity and category
//! - Status classification and list annotation
//! - Breach triage for dashboards

pub mod evaluator;
pub mod policy;
pub mod triage;

pub use evaluator::{
    annotate, sla_hours_for, sla_status_for, SlaAnnotation, SlaEvaluator, SlaStatus, SlaTag,
};
pub use policy::{SlaPolicy, DEFAULT_SLA_HOURS, MAX_SLA_HOURS, WARNING_RATIO};
pub use triage::{BreachedTicket, SlaTriage, UrgentTicket};
