use crate::catalog::ProductCatalog;
use crate::error::EngineError;
use crate::orders::WorkOrderStore;
use crate::registry::RetailerRegistry;
use crate::session::SessionGate;
use crate::types::{Draft, LineItemInput, NewRetailerForm, Phase1Form, Retailer, WorkOrder};
use crate::validate::{validate_phase1, validate_products};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Where the intake wizard currently is.
///
/// `Idle` means no wizard is active and no draft exists. There is no
/// backward edge from `Phase2` to `Phase1`: the product step's back
/// action is a full cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardState {
    #[default]
    Idle,
    Phase1,
    Phase2,
}

/// The two-phase intake wizard.
///
/// Collects requester/retailer/shipping data (phase 1), then product line
/// items (phase 2), and commits the completed draft to the store —
/// inserting in create mode, updating in edit mode. Validation runs
/// authoritatively at each submit; the presentation layer re-runs the
/// same pure validators per keystroke for responsiveness.
///
/// The draft survives a failed commit so the user can retry without
/// re-entering anything.
pub struct Wizard {
    store: Arc<WorkOrderStore>,
    registry: Arc<RetailerRegistry>,
    catalog: ProductCatalog,
    session: Arc<dyn SessionGate>,
    state: WizardState,
    draft: Option<Draft>,
}

impl Wizard {
    pub fn new(
        store: Arc<WorkOrderStore>,
        registry: Arc<RetailerRegistry>,
        catalog: ProductCatalog,
        session: Arc<dyn SessionGate>,
    ) -> Self {
        Self {
            store,
            registry,
            catalog,
            session,
            state: WizardState::Idle,
            draft: None,
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    /// The in-progress draft, if a wizard is active.
    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    fn ensure_state(&self, expected: WizardState, action: &'static str) -> Result<(), EngineError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(EngineError::State {
                state: self.state,
                action,
            })
        }
    }

    fn draft_mut(&mut self, action: &'static str) -> Result<&mut Draft, EngineError> {
        let state = self.state;
        self.draft
            .as_mut()
            .ok_or(EngineError::State { state, action })
    }

    fn reset(&mut self) {
        self.draft = None;
        self.state = WizardState::Idle;
    }

    /// Open the wizard. With `existing`, the draft is pre-populated from
    /// that order (edit mode); otherwise it starts empty (create mode).
    pub fn start(&mut self, existing: Option<&WorkOrder>) -> Result<(), EngineError> {
        if !self.session.is_authorized() {
            return Err(EngineError::Unauthorized);
        }
        self.ensure_state(WizardState::Idle, "start")?;
        self.draft = Some(match existing {
            Some(order) => Draft::from_order(order),
            None => Draft::new(),
        });
        self.state = WizardState::Phase1;
        Ok(())
    }

    /// Select a retailer into the draft: id, name snapshot, and the
    /// synthesized default shipping address.
    pub fn select_retailer(&mut self, retailer: &Retailer) -> Result<(), EngineError> {
        self.ensure_state(WizardState::Phase1, "select_retailer")?;
        let draft = self.draft_mut("select_retailer")?;
        draft.phase1.retailer_id = retailer.id.clone();
        draft.phase1.retailer_name = retailer.name.clone();
        draft.phase1.shipping_address = retailer.shipping_address();
        Ok(())
    }

    /// The inline "new retailer" subflow: admit the retailer through the
    /// registry, then auto-select it.
    pub async fn create_retailer(
        &mut self,
        form: NewRetailerForm,
    ) -> Result<Retailer, EngineError> {
        self.ensure_state(WizardState::Phase1, "create_retailer")?;
        let retailer = self.registry.create(form).await?;
        self.select_retailer(&retailer)?;
        Ok(retailer)
    }

    /// Submit phase 1. Advances to phase 2 only when the schema passes;
    /// on validation failure the wizard stays in `Phase1` with the draft
    /// untouched.
    pub fn submit_phase1(&mut self, form: Phase1Form) -> Result<(), EngineError> {
        self.ensure_state(WizardState::Phase1, "submit_phase1")?;
        let errors = validate_phase1(&form, Utc::now().date_naive());
        if !errors.is_empty() {
            return Err(EngineError::Validation(errors));
        }
        let draft = self.draft_mut("submit_phase1")?;
        draft.phase1 = form;
        self.state = WizardState::Phase2;
        Ok(())
    }

    /// Submit phase 2 and commit.
    ///
    /// Validates and coerces the product rows, merges them into the
    /// draft, then hands the completed draft to the store — `update` when
    /// the draft was seeded from an existing order, `insert` otherwise.
    /// On success the draft is discarded and the wizard returns to idle.
    ///
    /// Failure handling per error kind: validation and persistence
    /// failures keep the draft and the `Phase2` state for a retry; a
    /// vanished edit target (`NotFound`) abandons the draft.
    pub async fn submit_phase2(
        &mut self,
        items: Vec<LineItemInput>,
    ) -> Result<WorkOrder, EngineError> {
        self.ensure_state(WizardState::Phase2, "submit_phase2")?;
        let products = validate_products(&items, &self.catalog).map_err(EngineError::Validation)?;
        let draft = self.draft_mut("submit_phase2")?;
        draft.products = products;
        let snapshot = draft.clone();

        let result = match &snapshot.editing {
            Some(id) => self.store.update(id, &snapshot).await,
            None => self.store.insert(&snapshot).await,
        };

        match result {
            Ok(order) => {
                info!(id = %order.id, edit = snapshot.is_edit(), "work order committed");
                self.reset();
                Ok(order)
            }
            Err(err @ EngineError::NotFound(_)) => {
                warn!(%err, "edit target vanished, abandoning draft");
                self.reset();
                Err(err)
            }
            Err(err) => {
                warn!(%err, "commit failed, draft preserved for retry");
                Err(err)
            }
        }
    }

    /// Discard the draft from either phase. No store mutation.
    pub fn cancel(&mut self) {
        self.reset();
    }
}
