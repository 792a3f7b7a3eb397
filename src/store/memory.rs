//! In-memory repository.
//!
//! Backs tests, demos and single-process deployments.

use crate::core::{CategoryId, ContractorId, Error, Result, TicketId};
use crate::store::repository::TicketRepository;
use crate::ticket::{Assignment, Contractor, IssueCategory, Message, StatusChange, Ticket};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    next_ticket_id: TicketId,
    tickets: BTreeMap<TicketId, Ticket>,
    categories: BTreeMap<CategoryId, IssueCategory>,
    contractors: BTreeMap<ContractorId, Contractor>,
    assignments: HashMap<TicketId, Vec<Assignment>>,
    history: HashMap<TicketId, Vec<StatusChange>>,
    messages: HashMap<TicketId, Vec<Message>>,
}

/// Repository holding everything in `RwLock`-guarded maps.
#[derive(Default)]
pub struct InMemoryTicketStore {
    tables: RwLock<Tables>,
}

impl InMemoryTicketStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| Error::Internal("ticket store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| Error::Internal("ticket store lock poisoned".to_string()))
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketStore {
    async fn insert_ticket(&self, mut ticket: Ticket) -> Result<TicketId> {
        let mut tables = self.write()?;
        tables.next_ticket_id += 1;
        let id = tables.next_ticket_id;
        ticket.id = id;
        ticket.sla = None;
        tables.tickets.insert(id, ticket);
        Ok(id)
    }

    async fn get_ticket(&self, id: TicketId) -> Result<Option<Ticket>> {
        Ok(self.read()?.tickets.get(&id).cloned())
    }

    async fn update_ticket(&self, mut ticket: Ticket) -> Result<()> {
        let mut tables = self.write()?;
        let stored = tables
            .tickets
            .get_mut(&ticket.id)
            .ok_or(Error::TicketNotFound(ticket.id))?;

        if stored.created_at() != ticket.created_at() {
            return Err(Error::Validation(format!(
                "created_at of ticket {} cannot change",
                ticket.id
            )));
        }

        ticket.sla = None;
        *stored = ticket;
        Ok(())
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        Ok(self.read()?.tickets.values().cloned().collect())
    }

    async fn upsert_category(&self, category: IssueCategory) -> Result<()> {
        self.write()?.categories.insert(category.id, category);
        Ok(())
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<IssueCategory>> {
        Ok(self.read()?.categories.get(&id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<IssueCategory>> {
        Ok(self.read()?.categories.values().cloned().collect())
    }

    async fn upsert_contractor(&self, contractor: Contractor) -> Result<()> {
        self.write()?.contractors.insert(contractor.id, contractor);
        Ok(())
    }

    async fn get_contractor(&self, id: ContractorId) -> Result<Option<Contractor>> {
        Ok(self.read()?.contractors.get(&id).cloned())
    }

    async fn list_contractors(&self) -> Result<Vec<Contractor>> {
        Ok(self.read()?.contractors.values().cloned().collect())
    }

    async fn save_assignment(&self, assignment: Assignment) -> Result<()> {
        let mut tables = self.write()?;
        let rows = tables.assignments.entry(assignment.ticket_id).or_default();
        match rows.iter().position(|a| a.id == assignment.id) {
            Some(index) => rows[index] = assignment,
            None => rows.push(assignment),
        }
        Ok(())
    }

    async fn assignments_for(&self, ticket_id: TicketId) -> Result<Vec<Assignment>> {
        Ok(self
            .read()?
            .assignments
            .get(&ticket_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn record_status_change(&self, change: StatusChange) -> Result<()> {
        self.write()?
            .history
            .entry(change.ticket_id)
            .or_default()
            .push(change);
        Ok(())
    }

    async fn status_history(&self, ticket_id: TicketId) -> Result<Vec<StatusChange>> {
        Ok(self
            .read()?
            .history
            .get(&ticket_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_message(&self, message: Message) -> Result<()> {
        self.write()?
            .messages
            .entry(message.ticket_id)
            .or_default()
            .push(message);
        Ok(())
    }

    async fn messages_for(&self, ticket_id: TicketId) -> Result<Vec<Message>> {
        Ok(self
            .read()?
            .messages
            .get(&ticket_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.read()?.tickets.len() as u64)
    }
}
