//! Equipment directory: the loaded equipment list and the loan workflow
//!
//! A status change on a row goes through:
//!
//! * no user logged in: the selector reverts, a login is requested, no call
//!   is made;
//! * otherwise a loan request is sent and the row is pending until the
//!   answer arrives. Success replaces the status locally, failure reverts the
//!   selector and records an error message.
//!
//! A second change on a row that is still pending is rejected.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::broadcast;

use super::filter::{self, Facets};
use crate::{
    error::{AppError, AppResult},
    models::{status, Equipment, LoanRequest, LoanResponse, SearchQuery, User},
    repository::Backend,
};

const EVENT_CAPACITY: usize = 64;

/// Notifications for whoever renders the directory
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryEvent {
    Loaded { count: usize },
    StatusChanged { record: Equipment, new_status: String },
    LoginRequired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowState {
    Idle,
    Pending { target: String },
}

/// Result of a status-change intent
#[derive(Debug, Clone, PartialEq)]
pub enum StatusChange {
    /// Nobody is logged in; the selector goes back to `revert_to`
    LoginRequired { revert_to: String },
    /// A request for this row is still in flight
    AlreadyPending,
    Applied { record: Equipment, loan: LoanResponse },
    Failed { revert_to: String, message: String },
}

/// In-flight loan request for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanTicket {
    request: LoanRequest,
    revert_to: String,
}

impl LoanTicket {
    pub fn request(&self) -> &LoanRequest {
        &self.request
    }

    pub fn equipment_id(&self) -> i64 {
        self.request.equipment_id
    }
}

/// First half of a status change
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Send `ticket.request()` and pass the answer to `finish_status_change`
    Send(LoanTicket),
    Done(StatusChange),
}

pub struct Directory {
    backend: Arc<dyn Backend>,
    records: Vec<Equipment>,
    pending: HashMap<i64, String>,
    error: Option<String>,
    events: broadcast::Sender<DirectoryEvent>,
}

impl Directory {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            backend,
            records: Vec::new(),
            pending: HashMap::new(),
            error: None,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DirectoryEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: DirectoryEvent) {
        // No subscriber is fine
        let _ = self.events.send(event);
    }

    /// Fetch the equipment list, replacing the current one.
    ///
    /// On failure the previous list is kept and the message recorded.
    pub async fn load(&mut self) -> AppResult<usize> {
        self.error = None;

        match self.backend.list_equipment().await {
            Ok(records) => {
                let count = records.len();
                tracing::info!("Loaded {} equipment records", count);
                self.records = records;
                self.emit(DirectoryEvent::Loaded { count });
                Ok(count)
            }
            Err(e) => {
                tracing::error!("Failed to load equipment: {}", e);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    pub fn records(&self) -> &[Equipment] {
        &self.records
    }

    pub fn find(&self, id: i64) -> Option<&Equipment> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Filtered view of the list
    pub fn view(&self, query: &SearchQuery) -> Vec<Equipment> {
        filter::apply(&self.records, query)
    }

    pub fn facets(&self) -> Facets {
        filter::available_facets(&self.records)
    }

    /// Loan records known to the backend
    pub async fn loans(&self) -> AppResult<Vec<LoanResponse>> {
        self.backend.list_loans().await
    }

    pub fn row_state(&self, id: i64) -> RowState {
        match self.pending.get(&id) {
            Some(target) => RowState::Pending {
                target: target.clone(),
            },
            None => RowState::Idle,
        }
    }

    /// Validate a status-change intent and, if a request is needed, mark the
    /// row pending.
    pub fn begin_status_change(
        &mut self,
        user: Option<&User>,
        equipment_id: i64,
        target: &str,
    ) -> AppResult<Transition> {
        let record = self
            .find(equipment_id)
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", equipment_id)))?;
        let revert_to = status::select_value(&record.status);

        let Some(user) = user else {
            tracing::info!("Status change on equipment {} needs a login", equipment_id);
            self.emit(DirectoryEvent::LoginRequired);
            return Ok(Transition::Done(StatusChange::LoginRequired { revert_to }));
        };

        if self.pending.contains_key(&equipment_id) {
            tracing::warn!("Equipment {} already has a pending loan request", equipment_id);
            return Ok(Transition::Done(StatusChange::AlreadyPending));
        }

        let request = LoanRequest {
            user_id: user.id,
            equipment_id,
            equipment_status: status::to_backend_token(target),
        };
        self.pending
            .insert(equipment_id, request.equipment_status.clone());

        Ok(Transition::Send(LoanTicket { request, revert_to }))
    }

    /// Apply the backend answer to a pending row
    pub fn finish_status_change(
        &mut self,
        ticket: LoanTicket,
        result: AppResult<LoanResponse>,
    ) -> StatusChange {
        let LoanTicket { request, revert_to } = ticket;
        self.pending.remove(&request.equipment_id);

        match result {
            Ok(loan) => {
                let new_status = request.equipment_status;
                tracing::info!(
                    "Loan granted for equipment {} (status {})",
                    request.equipment_id,
                    new_status
                );

                let updated = match self
                    .records
                    .iter_mut()
                    .find(|r| r.id == request.equipment_id)
                {
                    Some(record) => {
                        record.status = new_status.clone();
                        record.clone()
                    }
                    // The list was reloaded without this row meanwhile
                    None => {
                        return StatusChange::Failed {
                            revert_to,
                            message: format!("Equipment {} not found", request.equipment_id),
                        }
                    }
                };

                self.emit(DirectoryEvent::StatusChanged {
                    record: updated.clone(),
                    new_status,
                });
                StatusChange::Applied {
                    record: updated,
                    loan,
                }
            }
            Err(e) => {
                tracing::error!(
                    "Loan request for equipment {} failed: {}",
                    request.equipment_id,
                    e
                );
                let message = format!("Error al cambiar estado: {}", e.user_message());
                self.error = Some(message.clone());
                StatusChange::Failed { revert_to, message }
            }
        }
    }

    /// Run the whole status-change workflow for one row
    pub async fn request_status_change(
        &mut self,
        user: Option<&User>,
        equipment_id: i64,
        target: &str,
    ) -> AppResult<StatusChange> {
        let ticket = match self.begin_status_change(user, equipment_id, target)? {
            Transition::Send(ticket) => ticket,
            Transition::Done(outcome) => return Ok(outcome),
        };

        let result = self.backend.request_loan(ticket.request()).await;
        Ok(self.finish_status_change(ticket, result))
    }
}
