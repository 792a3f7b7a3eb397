//! Common types used across Fixly modules.

use chrono::Duration;

/// Timestamp wrapper for consistent serialization.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Ticket identifier.
pub type TicketId = u64;
/// Tenant identifier.
pub type TenantId = u64;
/// Contractor identifier.
pub type ContractorId = u64;
/// Back-office user identifier.
pub type UserId = u64;
/// Rental unit identifier.
pub type UnitId = u64;
/// Issue category identifier.
pub type CategoryId = u64;

/// Get current UTC timestamp.
pub fn now() -> Timestamp {
    chrono::Utc::now()
}

/// Whole hours as a `Duration`.
pub fn hours(h: u32) -> Duration {
    Duration::hours(i64::from(h))
}

/// Fractional hours from `from` until `to`; negative when `to` is earlier.
pub fn hours_between(from: Timestamp, to: Timestamp) -> f64 {
    let delta = to - from;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 3_600_000_000.0,
        None => delta.num_seconds() as f64 / 3600.0,
    }
}
