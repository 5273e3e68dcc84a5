use crate::types::WorkOrderStatus;
use crate::validate::FieldError;
use crate::wizard::WizardState;

/// Failure of a backing-store round trip. Backends stay free to wrap any
/// technology behind this one message-bearing type.
#[derive(Debug, Clone, thiserror::Error)]
#[error("persistence failure: {message}")]
pub struct PersistenceError {
    message: String,
}

impl PersistenceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Every way an intake operation can fail.
///
/// None of these are fatal: `Validation` and `Persistence` leave the
/// caller's draft intact for a retry, `NotFound` sends the wizard back to
/// idle, and the rest reject the call without touching any state.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    /// One or more fields failed their schema; nothing was committed.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// The referenced work order is no longer in the store.
    #[error("work order {0} not found")]
    NotFound(String),

    /// The backing store round trip failed; retryable.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// The session gate is down; wizard and store are unreachable.
    #[error("session is not authorized")]
    Unauthorized,

    /// The wizard is not in a state where this operation is allowed.
    #[error("{action} is not allowed while the wizard is {state:?}")]
    State {
        state: WizardState,
        action: &'static str,
    },

    /// Status moves are forward adjacent steps only.
    #[error("invalid status transition {from} → {to}")]
    StatusTransition {
        from: WorkOrderStatus,
        to: WorkOrderStatus,
    },
}

impl EngineError {
    /// The field errors carried by a `Validation` failure, if any.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            EngineError::Validation(errors) => errors,
            _ => &[],
        }
    }
}
