//! Role-parameterised ticket operations.
//!
//! One desk serves admins, tenants and contractors; what each may see or do
//! is decided by the `Actor` passed into every call.

use crate::access::actor::{Actor, Role};
use crate::access::filter::TicketFilter;
use crate::core::{CategoryId, ContractorId, Error, Result, TicketId, Timestamp, UnitId};
use crate::report::{contractor_roster, ContractorOverview, ReportSummary, RoleStats};
use crate::sla::SlaEvaluator;
use crate::store::TicketRepository;
use crate::ticket::{Assignment, Message, Severity, StatusChange, Ticket, TicketStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// When a tenant can let a contractor in.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AccessWindows {
    /// Days of the week
    pub days: Vec<String>,
    /// Time slots
    pub slots: Vec<String>,
    /// Free-form notes
    pub notes: String,
}

impl AccessWindows {
    /// One-line description, or None if nothing was given.
    pub fn describe(&self) -> Option<String> {
        let mut parts = Vec::new();

        if !self.days.is_empty() {
            parts.push(format!("Days: {}", self.days.join(", ")));
        }
        if !self.slots.is_empty() {
            parts.push(format!("Slots: {}", self.slots.join(", ")));
        }
        let notes = self.notes.trim();
        if !notes.is_empty() {
            parts.push(format!("Notes: {}", notes));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }
}

/// A ticket as reported by a tenant.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewTicket {
    /// Affected unit
    pub unit_id: UnitId,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Category, if chosen
    pub category_id: Option<CategoryId>,
    /// Severity; medium when omitted
    pub severity: Option<Severity>,
    /// Access availability
    pub access: AccessWindows,
}

/// Everything shown on a ticket's detail page.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TicketDetail {
    /// SLA-annotated ticket
    pub ticket: Ticket,
    /// Messages visible to the caller
    pub messages: Vec<Message>,
    /// Status history
    pub history: Vec<StatusChange>,
    /// Assignments visible to the caller
    pub assignments: Vec<Assignment>,
}

/// Decline reason stamped on pending jobs replaced by a new assignment.
const REASSIGNED: &str = "reassigned";

/// Ticket operations over a repository.
pub struct TicketDesk<R: TicketRepository> {
    repo: Arc<R>,
    evaluator: SlaEvaluator,
}

impl<R: TicketRepository> TicketDesk<R> {
    /// Create a desk with the default SLA policy.
    pub fn new(repo: Arc<R>) -> Self {
        Self::with_evaluator(repo, SlaEvaluator::default())
    }

    /// Create a desk with a custom evaluator.
    pub fn with_evaluator(repo: Arc<R>, evaluator: SlaEvaluator) -> Self {
        Self { repo, evaluator }
    }

    /// Underlying repository.
    pub fn repository(&self) -> &Arc<R> {
        &self.repo
    }

    /// SLA evaluator in use.
    pub fn evaluator(&self) -> &SlaEvaluator {
        &self.evaluator
    }

    /// Tickets visible to `actor`, newest first, SLA-annotated.
    ///
    /// Contractors get their jobs ordered by assignment time instead.
    pub async fn list_tickets(
        &self,
        actor: &Actor,
        filter: &TicketFilter,
        now: Timestamp,
    ) -> Result<Vec<Ticket>> {
        let mut tickets: Vec<Ticket> = self
            .repo
            .list_tickets()
            .await?
            .into_iter()
            .filter(|t| actor.can_view(t) && filter.matches(t))
            .collect();

        match actor {
            Actor::Contractor(_) => tickets.sort_by(|a, b| {
                b.assigned_at
                    .cmp(&a.assigned_at)
                    .then_with(|| b.id.cmp(&a.id))
            }),
            _ => tickets.sort_by(|a, b| {
                b.created_at()
                    .cmp(&a.created_at())
                    .then_with(|| b.id.cmp(&a.id))
            }),
        }

        self.evaluator.annotate(&mut tickets, now);
        tickets.retain(|t| filter.matches_sla(t));

        if let Some(limit) = filter.limit {
            tickets.truncate(limit);
        }

        debug!(role = %actor.role(), count = tickets.len(), "Listed tickets");
        Ok(tickets)
    }

    /// Status counters over the tickets visible to `actor`.
    pub async fn role_stats(&self, actor: &Actor) -> Result<RoleStats> {
        let tickets = self.repo.list_tickets().await?;
        Ok(RoleStats::compute(tickets.iter().filter(|t| actor.can_view(t))))
    }

    /// Every contractor with their workload. Admins only.
    pub async fn contractor_roster(&self, actor: &Actor) -> Result<Vec<ContractorOverview>> {
        actor.require(Role::Admin, "view the contractor roster")?;
        let tickets = self.repo.list_tickets().await?;
        let contractors = self.repo.list_contractors().await?;
        Ok(contractor_roster(&tickets, &contractors))
    }

    /// Category and contractor report tables. Admins only.
    pub async fn report_summary(&self, actor: &Actor) -> Result<ReportSummary> {
        actor.require(Role::Admin, "view reports")?;
        ReportSummary::load(&*self.repo).await
    }

    /// Detail view of one ticket.
    pub async fn ticket_detail(
        &self,
        actor: &Actor,
        id: TicketId,
        now: Timestamp,
    ) -> Result<TicketDetail> {
        let mut ticket = self.visible_ticket(actor, id).await?;
        ticket.sla = Some(self.evaluator.status_for(&ticket, now).into());

        let messages = self
            .repo
            .messages_for(id)
            .await?
            .into_iter()
            .filter(|m| actor.can_read(m))
            .collect();

        let assignments = self
            .repo
            .assignments_for(id)
            .await?
            .into_iter()
            .filter(|a| match *actor {
                Actor::Admin(_) => true,
                Actor::Contractor(cid) => a.contractor_id == cid,
                Actor::Tenant(_) => false,
            })
            .collect();

        Ok(TicketDetail {
            ticket,
            messages,
            history: self.repo.status_history(id).await?,
            assignments,
        })
    }

    /// Report a new ticket. Tenants only.
    pub async fn create_ticket(
        &self,
        actor: &Actor,
        new_ticket: NewTicket,
        now: Timestamp,
    ) -> Result<Ticket> {
        actor.require(Role::Tenant, "create tickets")?;

        let title = new_ticket.title.trim();
        if title.is_empty() {
            return Err(Error::Validation("title must not be empty".to_string()));
        }

        let mut ticket = Ticket::new(actor.id(), new_ticket.unit_id, title, now)
            .with_description(&new_ticket.description)
            .with_severity(new_ticket.severity.unwrap_or(Severity::Medium));

        if let Some(category_id) = new_ticket.category_id {
            let category = self
                .repo
                .get_category(category_id)
                .await?
                .ok_or(Error::CategoryNotFound(category_id))?;
            ticket = ticket.with_category(category);
        }
        ticket.access_windows = new_ticket.access.describe();

        let id = self.repo.insert_ticket(ticket).await?;
        info!(ticket_id = id, tenant_id = actor.id(), "Ticket created");

        self.repo
            .get_ticket(id)
            .await?
            .ok_or(Error::TicketNotFound(id))
    }

    /// Move a ticket to a new status.
    ///
    /// Admins may set any status; contractors only `in_progress` or
    /// `resolved` on their own, not yet closed, jobs. Setting the current
    /// status again is a no-op.
    pub async fn change_status(
        &self,
        actor: &Actor,
        id: TicketId,
        new_status: TicketStatus,
        reason: Option<&str>,
        now: Timestamp,
    ) -> Result<Ticket> {
        if !actor.can_set_status(new_status) {
            warn!(ticket_id = id, role = %actor.role(), status = %new_status, "Status change refused");
            return Err(Error::PermissionDenied(format!(
                "{} cannot set status {}",
                actor.role(),
                new_status
            )));
        }

        let mut ticket = self.visible_ticket(actor, id).await?;
        let old_status = ticket.status;

        if old_status == new_status {
            return Ok(ticket);
        }
        if actor.role() == Role::Contractor && old_status == TicketStatus::Closed {
            return Err(Error::InvalidTransition(format!(
                "ticket {} is closed",
                id
            )));
        }

        ticket.set_status(new_status, now);
        self.repo.update_ticket(ticket.clone()).await?;
        self.record_change(id, old_status, new_status, actor.role(), reason, now)
            .await?;

        info!(
            ticket_id = id,
            role = %actor.role(),
            from = %old_status,
            to = %new_status,
            "Ticket status changed"
        );
        Ok(ticket)
    }

    /// Hand a ticket to a contractor. Admins only.
    pub async fn assign_contractor(
        &self,
        actor: &Actor,
        id: TicketId,
        contractor_id: ContractorId,
        now: Timestamp,
    ) -> Result<Ticket> {
        actor.require(Role::Admin, "assign contractors")?;

        let mut ticket = self.visible_ticket(actor, id).await?;
        let contractor = self
            .repo
            .get_contractor(contractor_id)
            .await?
            .ok_or(Error::ContractorNotFound(contractor_id))?;
        if !contractor.is_active {
            return Err(Error::ContractorInactive(contractor_id));
        }

        ticket.assigned_contractor = Some(contractor_id);
        ticket.assigned_at = Some(now);
        ticket.updated_at = now;

        let old_status = ticket.status;
        if old_status == TicketStatus::Open {
            ticket.set_status(TicketStatus::InProgress, now);
        }

        self.repo.update_ticket(ticket.clone()).await?;
        for mut stale in self
            .repo
            .assignments_for(id)
            .await?
            .into_iter()
            .filter(Assignment::is_pending)
        {
            stale.decline(REASSIGNED, now);
            self.repo.save_assignment(stale).await?;
        }
        self.repo
            .save_assignment(Assignment::pending(id, contractor_id, now))
            .await?;
        if old_status != ticket.status {
            self.record_change(id, old_status, ticket.status, Role::Admin, None, now)
                .await?;
        }

        info!(
            ticket_id = id,
            contractor_id,
            company = %contractor.company_name,
            "Contractor assigned"
        );
        Ok(ticket)
    }

    /// Accept a pending job. Contractors only.
    pub async fn accept_assignment(
        &self,
        actor: &Actor,
        id: TicketId,
        now: Timestamp,
    ) -> Result<Assignment> {
        actor.require(Role::Contractor, "accept jobs")?;

        let (mut ticket, mut assignment) = self.pending_assignment(actor, id).await?;
        assignment.accept();
        self.repo.save_assignment(assignment.clone()).await?;

        if ticket.status == TicketStatus::Open {
            ticket.set_status(TicketStatus::InProgress, now);
            self.repo.update_ticket(ticket).await?;
            self.record_change(
                id,
                TicketStatus::Open,
                TicketStatus::InProgress,
                Role::Contractor,
                None,
                now,
            )
            .await?;
        }

        info!(ticket_id = id, contractor_id = actor.id(), "Job accepted");
        Ok(assignment)
    }

    /// Decline a pending job and release the ticket. Contractors only.
    pub async fn decline_assignment(
        &self,
        actor: &Actor,
        id: TicketId,
        reason: &str,
        now: Timestamp,
    ) -> Result<Assignment> {
        actor.require(Role::Contractor, "decline jobs")?;

        let (mut ticket, mut assignment) = self.pending_assignment(actor, id).await?;
        assignment.decline(reason.trim(), now);
        self.repo.save_assignment(assignment.clone()).await?;

        ticket.assigned_contractor = None;
        ticket.assigned_at = None;
        ticket.updated_at = now;
        self.repo.update_ticket(ticket).await?;

        warn!(ticket_id = id, contractor_id = actor.id(), "Job declined");
        Ok(assignment)
    }

    /// Post a message on a ticket's thread.
    pub async fn add_message(
        &self,
        actor: &Actor,
        id: TicketId,
        text: &str,
        internal: bool,
        now: Timestamp,
    ) -> Result<Message> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Validation("message must not be empty".to_string()));
        }
        if internal && !actor.can_post_internal() {
            return Err(Error::PermissionDenied(format!(
                "{} cannot post internal notes",
                actor.role()
            )));
        }

        self.visible_ticket(actor, id).await?;

        let message = Message {
            id: Uuid::new_v4(),
            ticket_id: id,
            sender_role: actor.role(),
            sender_id: actor.id(),
            text: text.to_string(),
            is_internal: internal,
            created_at: now,
        };
        self.repo.add_message(message.clone()).await?;

        debug!(ticket_id = id, role = %actor.role(), internal, "Message added");
        Ok(message)
    }

    /// Load a ticket, hiding tickets the actor may not see.
    async fn visible_ticket(&self, actor: &Actor, id: TicketId) -> Result<Ticket> {
        match self.repo.get_ticket(id).await? {
            Some(ticket) if actor.can_view(&ticket) => Ok(ticket),
            _ => Err(Error::TicketNotFound(id)),
        }
    }

    /// The caller's pending job on a ticket still assigned to them.
    async fn pending_assignment(
        &self,
        actor: &Actor,
        id: TicketId,
    ) -> Result<(Ticket, Assignment)> {
        let ticket = self.visible_ticket(actor, id).await?;
        let assignment = self
            .repo
            .assignments_for(id)
            .await?
            .into_iter()
            .rev()
            .find(|a| a.contractor_id == actor.id() && a.is_pending())
            .ok_or(Error::AssignmentNotFound(id))?;
        Ok((ticket, assignment))
    }

    async fn record_change(
        &self,
        ticket_id: TicketId,
        old_status: TicketStatus,
        new_status: TicketStatus,
        changed_by: Role,
        reason: Option<&str>,
        at: Timestamp,
    ) -> Result<()> {
        self.repo
            .record_status_change(StatusChange {
                id: Uuid::new_v4(),
                ticket_id,
                old_status,
                new_status,
                changed_by,
                reason: reason.map(str::to_string),
                created_at: at,
            })
            .await
    }
}
