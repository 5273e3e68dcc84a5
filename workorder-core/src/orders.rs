use crate::error::EngineError;
use crate::session::SessionGate;
use crate::store::Persistence;
use crate::types::{Draft, Phase1Form, WorkOrder, WorkOrderId, WorkOrderStatus};
use crate::validate::FieldError;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// The collection of committed work orders, backed by the persistence
/// collaborator. Ids are assigned here (`WO-NNN`, 1 + current count;
/// deletion is out of scope so the counter never collides), `created_date`
/// and the initial `Pending` status likewise.
///
/// Whether a draft becomes an `insert` or an `update` is the caller's
/// choice; the store does not detect intent.
pub struct WorkOrderStore {
    backend: Arc<dyn Persistence>,
    session: Arc<dyn SessionGate>,
}

impl WorkOrderStore {
    pub fn new(backend: Arc<dyn Persistence>, session: Arc<dyn SessionGate>) -> Self {
        Self { backend, session }
    }

    fn ensure_authorized(&self) -> Result<(), EngineError> {
        if self.session.is_authorized() {
            Ok(())
        } else {
            Err(EngineError::Unauthorized)
        }
    }

    /// Completeness guard: a work order only ever reaches the backend
    /// fully formed. Schema-level validation is the wizard's job; this
    /// blocks partial commits that bypass it.
    fn completeness_errors(draft: &Draft) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if draft.phase1.retailer_id.is_empty() {
            errors.push(FieldError {
                field: "retailerId".to_string(),
                message: "Please select a retailer".to_string(),
            });
        }
        if draft.phase1.requested_delivery_date.is_none() {
            errors.push(FieldError {
                field: "requestedDeliveryDate".to_string(),
                message: "Please select a date".to_string(),
            });
        }
        if draft.products.is_empty() {
            errors.push(FieldError {
                field: "products".to_string(),
                message: "At least one product is required".to_string(),
            });
        }
        errors
    }

    fn build_order(
        draft: &Draft,
        id: WorkOrderId,
        created_date: chrono::DateTime<Utc>,
        status: WorkOrderStatus,
    ) -> Result<WorkOrder, EngineError> {
        let errors = Self::completeness_errors(draft);
        if !errors.is_empty() {
            return Err(EngineError::Validation(errors));
        }
        let Phase1Form {
            retailer_id,
            retailer_name,
            shipping_address,
            on_site_contact_name,
            on_site_contact_number,
            requester_name,
            requester_email,
            requested_delivery_date,
        } = draft.phase1.clone();
        let requested_delivery_date = requested_delivery_date.ok_or_else(|| {
            EngineError::Validation(vec![FieldError {
                field: "requestedDeliveryDate".to_string(),
                message: "Please select a date".to_string(),
            }])
        })?;
        Ok(WorkOrder {
            id,
            requester_name,
            requester_email,
            retailer_id,
            retailer_name,
            shipping_address,
            on_site_contact_name,
            on_site_contact_number,
            requested_delivery_date,
            created_date,
            products: draft.products.clone(),
            status,
        })
    }

    /// Commit a completed draft as a new work order.
    pub async fn insert(&self, draft: &Draft) -> Result<WorkOrder, EngineError> {
        self.ensure_authorized()?;
        let existing = self.backend.list_work_orders().await?;
        let id = WorkOrderId::from_sequence(existing.len() + 1);
        let order = Self::build_order(draft, id, Utc::now(), WorkOrderStatus::Pending)?;
        let stored = self.backend.save_work_order(&order).await?;
        info!(id = %stored.id, retailer = %stored.retailer_name, "work order created");
        Ok(stored)
    }

    /// Replace every field of an existing order except `id` and
    /// `created_date`, preserving its `status` (an edit does not reset
    /// fulfillment progress).
    pub async fn update(&self, id: &WorkOrderId, draft: &Draft) -> Result<WorkOrder, EngineError> {
        self.ensure_authorized()?;
        let existing = self
            .backend
            .list_work_orders()
            .await?
            .into_iter()
            .find(|o| &o.id == id)
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;
        let order = Self::build_order(draft, existing.id, existing.created_date, existing.status)?;
        let stored = self.backend.save_work_order(&order).await?;
        info!(id = %stored.id, "work order updated");
        Ok(stored)
    }

    /// All committed orders, newest first.
    pub async fn list(&self) -> Result<Vec<WorkOrder>, EngineError> {
        self.ensure_authorized()?;
        let mut orders = self.backend.list_work_orders().await?;
        orders.reverse();
        Ok(orders)
    }

    /// Move an order's status one step forward. Driven by the external
    /// fulfillment process, never by the intake wizard.
    pub async fn advance_status(
        &self,
        id: &WorkOrderId,
        to: WorkOrderStatus,
    ) -> Result<WorkOrder, EngineError> {
        self.ensure_authorized()?;
        let mut order = self
            .backend
            .list_work_orders()
            .await?
            .into_iter()
            .find(|o| &o.id == id)
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;
        if !order.status.can_advance_to(to) {
            return Err(EngineError::StatusTransition {
                from: order.status,
                to,
            });
        }
        order.status = to;
        let stored = self.backend.save_work_order(&order).await?;
        info!(id = %stored.id, status = %stored.status, "work order status advanced");
        Ok(stored)
    }
}
