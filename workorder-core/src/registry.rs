use crate::error::EngineError;
use crate::store::Persistence;
use crate::types::{NewRetailerForm, Retailer};
use crate::validate::validate_new_retailer;
use std::sync::Arc;
use tracing::info;

/// The set of known retailers. Retailer ids come from the external
/// system of record; this registry only admits and looks them up.
pub struct RetailerRegistry {
    backend: Arc<dyn Persistence>,
}

impl RetailerRegistry {
    pub fn new(backend: Arc<dyn Persistence>) -> Self {
        Self { backend }
    }

    /// All known retailers, in registry order.
    pub async fn list(&self) -> Result<Vec<Retailer>, EngineError> {
        Ok(self.backend.list_retailers().await?)
    }

    /// Case-insensitive substring search over retailer names — the query
    /// behind the search popover.
    pub async fn find_by_name_substring(&self, q: &str) -> Result<Vec<Retailer>, EngineError> {
        let q = q.to_lowercase();
        let retailers = self.backend.list_retailers().await?;
        Ok(retailers
            .into_iter()
            .filter(|r| r.name.to_lowercase().contains(&q))
            .collect())
    }

    /// Admit a new retailer. Fails with a `Validation` error (and no side
    /// effect) if any field is missing or malformed; otherwise persists
    /// and returns the new retailer, ready for the caller to select.
    pub async fn create(&self, form: NewRetailerForm) -> Result<Retailer, EngineError> {
        let errors = validate_new_retailer(&form);
        if !errors.is_empty() {
            return Err(EngineError::Validation(errors));
        }
        let retailer = Retailer {
            id: form.retailer_id,
            name: form.name,
            street: form.street,
            city: form.city,
            state: form.state,
            zip_code: form.zip_code,
        };
        let stored = self.backend.save_retailer(&retailer).await?;
        info!(id = %stored.id, name = %stored.name, "retailer created");
        Ok(stored)
    }
}
