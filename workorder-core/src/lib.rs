//! Work-order intake and lifecycle engine.
//!
//! This crate is the library core behind a retailer-facing shipping
//! request dashboard:
//! - a two-phase intake wizard (requester/retailer/shipping, then product
//!   line items) with an inline new-retailer subflow,
//! - declarative field validation for both phases,
//! - the committed work-order collection with `WO-NNN` ids and a
//!   forward-only status lifecycle,
//! - a pure listing/filter query over that collection.
//!
//! Presentation, credentials, and storage technology stay outside: the
//! core talks to them through the [`store::Persistence`] and
//! [`session::SessionGate`] traits and ships in-memory stand-ins for
//! both.

pub mod catalog;
pub mod error;
pub mod filter;
pub mod orders;
pub mod registry;
pub mod session;
pub mod store;
pub mod types;
pub mod validate;
pub mod wizard;

pub use catalog::ProductCatalog;
pub use error::{EngineError, PersistenceError};
pub use filter::{filter_orders, StatusFilter};
pub use orders::WorkOrderStore;
pub use registry::RetailerRegistry;
pub use session::{MemorySession, SessionGate};
pub use store::{MemoryBackend, Persistence};
pub use types::{
    Draft, LineItem, LineItemInput, NewRetailerForm, Phase1Form, Quantity, Retailer, WorkOrder,
    WorkOrderId, WorkOrderStatus,
};
pub use validate::{validate_new_retailer, validate_phase1, validate_products, FieldError};
pub use wizard::{Wizard, WizardState};
