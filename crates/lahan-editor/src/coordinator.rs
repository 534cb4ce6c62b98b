//! Persistence coordinator: save and delete against the store.
//!
//! Store calls are split into a synchronous preparation step, a `'static`
//! future that talks to the store, and a synchronous apply step that consumes
//! the response exactly once. The session and catalog are never borrowed
//! across an await, so the operator can keep drawing while a call is in
//! flight.

use lahan_core::error::{LahanError, Result};
use lahan_core::models::{
    EditingMode, NewParcel, NewRecord, NewWarehouse, ParcelId, PolygonStatus, Record,
    RecordKind, WarehouseId,
};
use lahan_core::ports::{ConfirmationPrompt, Confirmer, NoticeKind, Notifier};
use lahan_store::ports::ParcelStore;
use std::future::Future;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::session::DrawingSession;

/// A validated save, ready for submission
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub record: NewRecord,
    /// Session revision at preparation time
    pub revision: u64,
}

/// Settled result of a submitted save
#[derive(Debug)]
pub struct SaveResponse {
    pub kind: RecordKind,
    pub name: String,
    pub revision: u64,
    pub result: Result<Record>,
}

/// A delete awaiting operator confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub kind: RecordKind,
    pub id: String,
    pub name: String,
}

/// Settled result of a confirmed delete
#[derive(Debug)]
pub struct DeleteResponse {
    pub request: DeleteRequest,
    pub result: Result<()>,
}

/// Orchestrates store calls and reports outcomes to the operator
pub struct PersistenceCoordinator {
    store: Arc<dyn ParcelStore>,
    notifier: Arc<dyn Notifier>,
    pending_delete: Option<DeleteRequest>,
}

impl PersistenceCoordinator {
    pub fn new(store: Arc<dyn ParcelStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier, pending_delete: None }
    }

    /// Validate the session for saving. Never touches the store.
    pub fn prepare_save(&self, session: &DrawingSession, catalog: &Catalog) -> Result<SaveRequest> {
        let name = session.draft_name().trim();
        if name.is_empty() {
            return Err(LahanError::validation("Name must not be empty"));
        }

        let record = match session.mode() {
            EditingMode::DrawParcel => {
                let status = session.status(catalog);
                if status != PolygonStatus::Complete {
                    return Err(LahanError::validation(format!(
                        "Boundary is {}; close a valid ring before saving",
                        status
                    )));
                }
                let ring = session
                    .closed_ring(catalog)
                    .ok_or_else(|| LahanError::validation("Boundary is not complete"))?;
                NewRecord::Parcel(NewParcel { name: name.to_string(), ring })
            }
            EditingMode::PlaceWarehouse => {
                let location = session
                    .pending_warehouse()
                    .ok_or_else(|| LahanError::validation("No warehouse location staged"))?;
                NewRecord::Warehouse(NewWarehouse { name: name.to_string(), location })
            }
            EditingMode::DeletePoint => {
                return Err(LahanError::validation("Saving is not available in delete mode"));
            }
        };

        Ok(SaveRequest { record, revision: session.revision() })
    }

    /// Send a prepared save to the store
    pub fn submit(&self, request: SaveRequest) -> impl Future<Output = SaveResponse> + Send + 'static {
        let store = Arc::clone(&self.store);
        async move {
            let kind = request.record.kind();
            let name = request.record.name().to_string();
            tracing::info!(kind = %kind, name = %name, "Submitting save");

            let result = store.create(&request.record).await;
            SaveResponse { kind, name, revision: request.revision, result }
        }
    }

    /// Consume a settled save: update the catalog and reset the session on success
    pub fn apply_save(
        &self,
        session: &mut DrawingSession,
        catalog: &mut Catalog,
        response: SaveResponse,
    ) -> Result<Record> {
        match response.result {
            Ok(record) => {
                let message = match &record {
                    Record::Parcel(parcel) => format!(
                        "Parcel '{}' saved ({:.2} ha)",
                        parcel.name, parcel.area_hectares
                    ),
                    Record::Warehouse(warehouse) => {
                        format!("Warehouse '{}' saved", warehouse.name)
                    }
                };
                catalog.add(record.clone());
                self.notifier.notify(NoticeKind::Success, &message);

                if session.revision() == response.revision {
                    session.reset();
                } else {
                    tracing::info!(
                        submitted = response.revision,
                        current = session.revision(),
                        "Session edited during save; keeping newer drawing"
                    );
                }
                Ok(record)
            }
            Err(e) => {
                tracing::error!(kind = %response.kind, name = %response.name, error = %e, "Save failed");
                let error = LahanError::OperationFailed {
                    operation: format!("Save {}", response.kind),
                    reason: e.to_string(),
                };
                self.notifier.notify(NoticeKind::Error, &error.to_string());
                Err(error)
            }
        }
    }

    /// Validate, submit and apply a save in one step
    pub async fn save(&self, session: &mut DrawingSession, catalog: &mut Catalog) -> Result<Record> {
        let request = match self.prepare_save(session, catalog) {
            Ok(request) => request,
            Err(e) => {
                self.notifier.notify(NoticeKind::Warning, &e.to_string());
                return Err(e);
            }
        };

        let response = self.submit(request).await;
        self.apply_save(session, catalog, response)
    }

    /// Set the draft name, then save
    pub async fn save_as(
        &self,
        session: &mut DrawingSession,
        catalog: &mut Catalog,
        name: &str,
    ) -> Result<Record> {
        session.set_draft_name(name);
        self.save(session, catalog).await
    }

    /// Stage a delete and return the prompt to show. Does not touch the store.
    pub fn request_delete(
        &mut self,
        kind: RecordKind,
        id: &str,
        catalog: &Catalog,
    ) -> Result<ConfirmationPrompt> {
        let name = match kind {
            RecordKind::Parcel => {
                catalog.parcel(&ParcelId(id.to_string())).map(|p| p.name.clone())
            }
            RecordKind::Warehouse => {
                catalog.warehouse(&WarehouseId(id.to_string())).map(|w| w.name.clone())
            }
        }
        .ok_or_else(|| LahanError::NotFound { kind: kind.to_string(), id: id.to_string() })?;

        let prompt = ConfirmationPrompt {
            title: format!("Delete {}", kind),
            message: format!("Delete {} '{}'? This cannot be undone.", kind, name),
        };
        self.pending_delete = Some(DeleteRequest { kind, id: id.to_string(), name });
        Ok(prompt)
    }

    pub fn pending_delete(&self) -> Option<&DeleteRequest> {
        self.pending_delete.as_ref()
    }

    /// Discard the staged delete. Returns whether one was pending.
    pub fn cancel_delete(&mut self) -> bool {
        self.pending_delete.take().is_some()
    }

    /// Issue the staged delete; `None` when nothing is pending
    pub fn confirm_delete(
        &mut self,
    ) -> Option<impl Future<Output = DeleteResponse> + Send + 'static> {
        let request = self.pending_delete.take()?;
        let store = Arc::clone(&self.store);

        Some(async move {
            tracing::info!(kind = %request.kind, id = %request.id, "Deleting record");
            let result = store.delete(request.kind, &request.id).await;
            DeleteResponse { request, result }
        })
    }

    /// Consume a settled delete: update the catalog on success
    pub fn apply_delete(&self, catalog: &mut Catalog, response: DeleteResponse) -> Result<()> {
        let DeleteResponse { request, result } = response;
        match result {
            Ok(()) => {
                catalog.remove(request.kind, &request.id);
                self.notifier
                    .notify(NoticeKind::Success, &format!("Deleted {} '{}'", request.kind, request.name));
                Ok(())
            }
            Err(e) => {
                tracing::error!(kind = %request.kind, id = %request.id, error = %e, "Delete failed");
                let error = LahanError::OperationFailed {
                    operation: format!("Delete {}", request.kind),
                    reason: e.to_string(),
                };
                self.notifier.notify(NoticeKind::Error, &error.to_string());
                Err(error)
            }
        }
    }

    /// Request, confirm through `confirmer`, then delete.
    ///
    /// Returns `Ok(false)` when the operator declines.
    pub async fn delete_interactive(
        &mut self,
        kind: RecordKind,
        id: &str,
        confirmer: &dyn Confirmer,
        catalog: &mut Catalog,
    ) -> Result<bool> {
        let prompt = self.request_delete(kind, id, catalog)?;
        if !confirmer.confirm(&prompt) {
            self.cancel_delete();
            return Ok(false);
        }

        match self.confirm_delete() {
            Some(pending) => {
                let response = pending.await;
                self.apply_delete(catalog, response).map(|_| true)
            }
            None => Ok(false),
        }
    }
}
