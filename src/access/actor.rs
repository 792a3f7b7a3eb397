//! Authenticated actors and their permissions.
//!
//! Every desk operation receives the actor explicitly; nothing is looked up
//! from ambient session state.

use crate::core::{ContractorId, Error, TenantId, UserId};
use crate::ticket::{Message, Ticket, TicketStatus};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Property manager back office
    Admin,
    /// Resident reporting issues
    Tenant,
    /// Company doing the repairs
    Contractor,
}

impl Role {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Tenant => "tenant",
            Role::Contractor => "contractor",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "tenant" => Ok(Role::Tenant),
            "contractor" => Ok(Role::Contractor),
            other => Err(Error::invalid("role", other)),
        }
    }
}

/// An authenticated user acting on tickets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "id", rename_all = "snake_case")]
pub enum Actor {
    /// Back-office staff member
    Admin(UserId),
    /// Tenant reporting issues for their units
    Tenant(TenantId),
    /// Contractor working assigned jobs
    Contractor(ContractorId),
}

impl Actor {
    /// Role of this actor.
    pub fn role(&self) -> Role {
        match self {
            Actor::Admin(_) => Role::Admin,
            Actor::Tenant(_) => Role::Tenant,
            Actor::Contractor(_) => Role::Contractor,
        }
    }

    /// ID within the role.
    pub fn id(&self) -> u64 {
        match *self {
            Actor::Admin(id) | Actor::Tenant(id) | Actor::Contractor(id) => id,
        }
    }

    /// Whether the ticket is visible to this actor.
    pub fn can_view(&self, ticket: &Ticket) -> bool {
        match *self {
            Actor::Admin(_) => true,
            Actor::Tenant(id) => ticket.tenant_id == id,
            Actor::Contractor(id) => ticket.is_assigned_to(id),
        }
    }

    /// Statuses this actor may move a visible ticket to.
    pub fn allowed_statuses(&self) -> &'static [TicketStatus] {
        match self {
            Actor::Admin(_) => &TicketStatus::ALL,
            Actor::Contractor(_) => &[TicketStatus::InProgress, TicketStatus::Resolved],
            Actor::Tenant(_) => &[],
        }
    }

    /// Whether this actor may set `status`.
    pub fn can_set_status(&self, status: TicketStatus) -> bool {
        self.allowed_statuses().contains(&status)
    }

    /// Whether the message is visible to this actor.
    pub fn can_read(&self, message: &Message) -> bool {
        !(message.is_internal && self.role() == Role::Tenant)
    }

    /// Whether this actor may post internal notes.
    pub fn can_post_internal(&self) -> bool {
        self.role() == Role::Admin
    }

    /// Fail unless this actor has `role`.
    pub fn require(&self, role: Role, action: &str) -> crate::core::Result<()> {
        if self.role() == role {
            Ok(())
        } else {
            Err(Error::PermissionDenied(format!(
                "{} cannot {}",
                self.role(),
                action
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::now;
    use uuid::Uuid;

    fn ticket_for(tenant: TenantId, contractor: Option<ContractorId>) -> Ticket {
        let mut ticket = Ticket::new(tenant, 1, "Leak", now());
        ticket.assigned_contractor = contractor;
        ticket
    }

    #[test]
    fn test_visibility() {
        let ticket = ticket_for(7, Some(3));

        assert!(Actor::Admin(1).can_view(&ticket));
        assert!(Actor::Tenant(7).can_view(&ticket));
        assert!(!Actor::Tenant(8).can_view(&ticket));
        assert!(Actor::Contractor(3).can_view(&ticket));
        assert!(!Actor::Contractor(4).can_view(&ticket));
        assert!(!Actor::Contractor(3).can_view(&ticket_for(7, None)));
    }

    #[test]
    fn test_status_permissions() {
        assert!(Actor::Admin(1).can_set_status(TicketStatus::Closed));
        assert!(Actor::Contractor(1).can_set_status(TicketStatus::Resolved));
        assert!(!Actor::Contractor(1).can_set_status(TicketStatus::Closed));
        assert!(!Actor::Tenant(1).can_set_status(TicketStatus::Open));
    }

    #[test]
    fn test_internal_messages_hidden_from_tenants() {
        let message = Message {
            id: Uuid::new_v4(),
            ticket_id: 1,
            sender_role: Role::Admin,
            sender_id: 1,
            text: "check invoice".to_string(),
            is_internal: true,
            created_at: now(),
        };

        assert!(Actor::Admin(1).can_read(&message));
        assert!(Actor::Contractor(2).can_read(&message));
        assert!(!Actor::Tenant(3).can_read(&message));
    }

    #[test]
    fn test_require() {
        assert!(Actor::Admin(1).require(Role::Admin, "assign").is_ok());
        let err = Actor::Tenant(1).require(Role::Admin, "assign").unwrap_err();
        assert_eq!(err.to_string(), "Permission denied: tenant cannot assign");
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("contractor".parse::<Role>().unwrap(), Role::Contractor);
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_actor_serde() {
        let json = serde_json::to_string(&Actor::Tenant(4)).unwrap();
        assert_eq!(json, r#"{"role":"tenant","id":4}"#);
    }
}
