use crate::error::PersistenceError;
use crate::types::{Retailer, WorkOrder};
use async_trait::async_trait;
use std::sync::RwLock;

/// Persistence seam for all committed state.
///
/// The intake engine operates exclusively through this trait, enabling
/// pluggable backends (`MemoryBackend` for tests and the no-backend mode,
/// a real database/API adapter in production). Both `save_*` methods are
/// upserts keyed by id; list order is insertion order, oldest first.
#[async_trait]
pub trait Persistence: Send + Sync {
    async fn list_work_orders(&self) -> Result<Vec<WorkOrder>, PersistenceError>;
    async fn save_work_order(&self, order: &WorkOrder) -> Result<WorkOrder, PersistenceError>;
    async fn list_retailers(&self) -> Result<Vec<Retailer>, PersistenceError>;
    async fn save_retailer(&self, retailer: &Retailer) -> Result<Retailer, PersistenceError>;
}

/// In-memory backend. Insertion-ordered; upsert replaces in place so an
/// edited record keeps its position.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    orders: RwLock<Vec<WorkOrder>>,
    retailers: RwLock<Vec<Retailer>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend pre-seeded with the demo retailers, so a fresh
    /// deployment has something to select.
    pub fn with_sample_data() -> Self {
        let backend = Self::new();
        {
            let mut retailers = backend
                .retailers
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            retailers.push(Retailer {
                id: "1".to_string(),
                name: "1871 Florida".to_string(),
                street: "1871 Florida Street".to_string(),
                city: "Memphis".to_string(),
                state: "TN".to_string(),
                zip_code: "38106".to_string(),
            });
            retailers.push(Retailer {
                id: "2".to_string(),
                name: "Helena Ag".to_string(),
                street: "123 Main St".to_string(),
                city: "Helena".to_string(),
                state: "AR".to_string(),
                zip_code: "72342".to_string(),
            });
        }
        backend
    }
}

fn lock_err<E: std::fmt::Display>(e: E) -> PersistenceError {
    PersistenceError::new(format!("lock: {e}"))
}

#[async_trait]
impl Persistence for MemoryBackend {
    async fn list_work_orders(&self) -> Result<Vec<WorkOrder>, PersistenceError> {
        let orders = self.orders.read().map_err(lock_err)?;
        Ok(orders.clone())
    }

    async fn save_work_order(&self, order: &WorkOrder) -> Result<WorkOrder, PersistenceError> {
        let mut orders = self.orders.write().map_err(lock_err)?;
        match orders.iter_mut().find(|o| o.id == order.id) {
            Some(existing) => *existing = order.clone(),
            None => orders.push(order.clone()),
        }
        Ok(order.clone())
    }

    async fn list_retailers(&self) -> Result<Vec<Retailer>, PersistenceError> {
        let retailers = self.retailers.read().map_err(lock_err)?;
        Ok(retailers.clone())
    }

    async fn save_retailer(&self, retailer: &Retailer) -> Result<Retailer, PersistenceError> {
        let mut retailers = self.retailers.write().map_err(lock_err)?;
        match retailers.iter_mut().find(|r| r.id == retailer.id) {
            Some(existing) => *existing = retailer.clone(),
            None => retailers.push(retailer.clone()),
        }
        Ok(retailer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LineItem, WorkOrderId, WorkOrderStatus};
    use chrono::{NaiveDate, Utc};

    fn sample_order(id: &str, retailer_name: &str) -> WorkOrder {
        WorkOrder {
            id: WorkOrderId::from(id),
            requester_name: "John Doe".to_string(),
            requester_email: "john@example.com".to_string(),
            retailer_id: "1".to_string(),
            retailer_name: retailer_name.to_string(),
            shipping_address: "1871 Florida Street\nMemphis, TN 38106".to_string(),
            on_site_contact_name: "Jane Smith".to_string(),
            on_site_contact_number: "+1234567890".to_string(),
            requested_delivery_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            created_date: Utc::now(),
            products: vec![LineItem {
                name: "Veltyma - 2x1 gal".to_string(),
                quantity: 1,
            }],
            status: WorkOrderStatus::Pending,
        }
    }

    #[tokio::test]
    async fn save_and_list_round_trip() {
        let backend = MemoryBackend::new();
        backend
            .save_work_order(&sample_order("WO-001", "ACME Corp"))
            .await
            .unwrap();
        backend
            .save_work_order(&sample_order("WO-002", "XYZ Inc"))
            .await
            .unwrap();

        let orders = backend.list_work_orders().await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id.as_str(), "WO-001");
        assert_eq!(orders[1].id.as_str(), "WO-002");
    }

    #[tokio::test]
    async fn upsert_replaces_in_place() {
        let backend = MemoryBackend::new();
        backend
            .save_work_order(&sample_order("WO-001", "ACME Corp"))
            .await
            .unwrap();
        backend
            .save_work_order(&sample_order("WO-002", "XYZ Inc"))
            .await
            .unwrap();

        let mut edited = sample_order("WO-001", "ACME Corporation");
        edited.status = WorkOrderStatus::Processing;
        backend.save_work_order(&edited).await.unwrap();

        let orders = backend.list_work_orders().await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id.as_str(), "WO-001");
        assert_eq!(orders[0].retailer_name, "ACME Corporation");
        assert_eq!(orders[0].status, WorkOrderStatus::Processing);
    }

    #[tokio::test]
    async fn sample_data_seeds_retailers() {
        let backend = MemoryBackend::with_sample_data();
        let retailers = backend.list_retailers().await.unwrap();
        assert_eq!(retailers.len(), 2);
        assert_eq!(retailers[0].name, "1871 Florida");
        assert_eq!(retailers[1].name, "Helena Ag");
        assert!(backend.list_work_orders().await.unwrap().is_empty());
    }
}
