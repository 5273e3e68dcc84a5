use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Retailer ─────────────────────────────────────────────────

/// A shipping destination. Immutable once admitted to the registry;
/// work orders reference it by id and snapshot its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Retailer {
    /// Assigned by the external system of record, not generated here.
    pub id: String,
    pub name: String,
    pub street: String,
    pub city: String,
    /// Two-letter state code.
    pub state: String,
    /// 5 digits, optionally `-` + 4 more.
    pub zip_code: String,
}

impl Retailer {
    /// Default shipping address block for this retailer.
    pub fn shipping_address(&self) -> String {
        format!(
            "{}\n{}, {} {}",
            self.street, self.city, self.state, self.zip_code
        )
    }
}

/// Input record for the inline "new retailer" subflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRetailerForm {
    pub retailer_id: String,
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

// ─── Work order id ────────────────────────────────────────────

/// Human-readable work order id, `WO-NNN` zero-padded to width 3.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkOrderId(String);

impl WorkOrderId {
    /// Build the id for the `seq`-th order (1-based).
    pub fn from_sequence(seq: usize) -> Self {
        Self(format!("WO-{seq:03}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for WorkOrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ─── Status ───────────────────────────────────────────────────

/// Lifecycle status of a committed work order.
///
/// Starts at `Pending`; only an external fulfillment process moves it
/// forward. The intake wizard never writes `Processing` or `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WorkOrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
}

impl WorkOrderStatus {
    /// Forward adjacent steps only; everything else is rejected.
    pub fn can_advance_to(self, next: WorkOrderStatus) -> bool {
        matches!(
            (self, next),
            (WorkOrderStatus::Pending, WorkOrderStatus::Processing)
                | (WorkOrderStatus::Processing, WorkOrderStatus::Completed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, WorkOrderStatus::Completed)
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkOrderStatus::Pending => write!(f, "Pending"),
            WorkOrderStatus::Processing => write!(f, "Processing"),
            WorkOrderStatus::Completed => write!(f, "Completed"),
        }
    }
}

impl std::str::FromStr for WorkOrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Processing" => Ok(Self::Processing),
            "Completed" => Ok(Self::Completed),
            _ => Err(format!("invalid work order status: {s}")),
        }
    }
}

// ─── Line items ───────────────────────────────────────────────

/// One product-name/quantity pair, owned exclusively by its work order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: i64,
}

/// Raw quantity as it arrives from the product form — either already a
/// number or a string to be coerced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Int(i64),
    Text(String),
}

impl Quantity {
    /// Coerce to an integer. `None` means the input is not a number.
    pub fn coerce(&self) -> Option<i64> {
        match self {
            Quantity::Int(n) => Some(*n),
            Quantity::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<i64> for Quantity {
    fn from(n: i64) -> Self {
        Quantity::Int(n)
    }
}

impl From<&str> for Quantity {
    fn from(s: &str) -> Self {
        Quantity::Text(s.to_string())
    }
}

/// One un-validated row of the phase-2 product table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemInput {
    pub name: String,
    pub quantity: Quantity,
}

// ─── Work order ───────────────────────────────────────────────

/// A committed shipping request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: WorkOrderId,
    pub requester_name: String,
    pub requester_email: String,
    pub retailer_id: String,
    /// Snapshot of the retailer name at creation time.
    pub retailer_name: String,
    /// Multi-line free text.
    pub shipping_address: String,
    pub on_site_contact_name: String,
    pub on_site_contact_number: String,
    pub requested_delivery_date: NaiveDate,
    /// Set once at insert, never mutated afterwards.
    pub created_date: DateTime<Utc>,
    pub products: Vec<LineItem>,
    pub status: WorkOrderStatus,
}

// ─── Wizard input records ─────────────────────────────────────

/// Raw phase-1 input (requester + retailer + shipping).
///
/// `requested_delivery_date` stays optional here so an untouched form can
/// round-trip through per-field validation; the schema requires it before
/// the wizard advances.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase1Form {
    pub retailer_id: String,
    pub retailer_name: String,
    pub shipping_address: String,
    pub on_site_contact_name: String,
    pub on_site_contact_number: String,
    pub requester_name: String,
    pub requester_email: String,
    pub requested_delivery_date: Option<NaiveDate>,
}

impl Phase1Form {
    fn from_order(order: &WorkOrder) -> Self {
        Self {
            retailer_id: order.retailer_id.clone(),
            retailer_name: order.retailer_name.clone(),
            shipping_address: order.shipping_address.clone(),
            on_site_contact_name: order.on_site_contact_name.clone(),
            on_site_contact_number: order.on_site_contact_number.clone(),
            requester_name: order.requester_name.clone(),
            requester_email: order.requester_email.clone(),
            requested_delivery_date: Some(order.requested_delivery_date),
        }
    }
}

/// Transient wizard working state. Never persisted; destroyed on commit
/// or cancel.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    /// Set when the draft was seeded from an existing order (edit mode).
    pub editing: Option<WorkOrderId>,
    pub phase1: Phase1Form,
    pub products: Vec<LineItem>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a draft from an existing order, products included, so both
    /// wizard phases reopen pre-filled.
    pub fn from_order(order: &WorkOrder) -> Self {
        Self {
            editing: Some(order.id.clone()),
            phase1: Phase1Form::from_order(order),
            products: order.products.clone(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipping_address_block() {
        let retailer = Retailer {
            id: "1".to_string(),
            name: "1871 Florida".to_string(),
            street: "1871 Florida Street".to_string(),
            city: "Memphis".to_string(),
            state: "TN".to_string(),
            zip_code: "38106".to_string(),
        };
        assert_eq!(
            retailer.shipping_address(),
            "1871 Florida Street\nMemphis, TN 38106"
        );
    }

    #[test]
    fn work_order_id_is_zero_padded() {
        assert_eq!(WorkOrderId::from_sequence(1).as_str(), "WO-001");
        assert_eq!(WorkOrderId::from_sequence(42).as_str(), "WO-042");
        assert_eq!(WorkOrderId::from_sequence(1000).as_str(), "WO-1000");
    }

    #[test]
    fn status_advances_forward_only() {
        use WorkOrderStatus::*;
        assert!(Pending.can_advance_to(Processing));
        assert!(Processing.can_advance_to(Completed));
        assert!(!Pending.can_advance_to(Completed));
        assert!(!Processing.can_advance_to(Pending));
        assert!(!Completed.can_advance_to(Pending));
        assert!(!Pending.can_advance_to(Pending));
        assert!(Completed.is_terminal());
        assert!(!Pending.is_terminal());
    }

    #[test]
    fn status_round_trips_through_str() {
        for s in ["Pending", "Processing", "Completed"] {
            let status: WorkOrderStatus = s.parse().unwrap();
            assert_eq!(status.to_string(), s);
        }
        assert!("pending".parse::<WorkOrderStatus>().is_err());
    }

    #[test]
    fn quantity_coercion() {
        assert_eq!(Quantity::Int(3).coerce(), Some(3));
        assert_eq!(Quantity::from("7").coerce(), Some(7));
        assert_eq!(Quantity::from(" 2 ").coerce(), Some(2));
        assert_eq!(Quantity::from("two").coerce(), None);
        assert_eq!(Quantity::from("").coerce(), None);
    }

    #[test]
    fn quantity_deserializes_from_both_shapes() {
        let n: Quantity = serde_json::from_str("4").unwrap();
        assert_eq!(n.coerce(), Some(4));
        let s: Quantity = serde_json::from_str("\"4\"").unwrap();
        assert_eq!(s.coerce(), Some(4));
    }

    #[test]
    fn work_order_serializes_camel_case() {
        let order = WorkOrder {
            id: WorkOrderId::from_sequence(1),
            requester_name: "John Doe".to_string(),
            requester_email: "john@example.com".to_string(),
            retailer_id: "1".to_string(),
            retailer_name: "ACME Corp".to_string(),
            shipping_address: "123 Main St\nTown, TN 38106".to_string(),
            on_site_contact_name: "Jane Smith".to_string(),
            on_site_contact_number: "+1234567890".to_string(),
            requested_delivery_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            created_date: Utc::now(),
            products: vec![LineItem {
                name: "Veltyma - 2x1 gal".to_string(),
                quantity: 2,
            }],
            status: WorkOrderStatus::Pending,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["id"], "WO-001");
        assert_eq!(json["retailerName"], "ACME Corp");
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["products"][0]["quantity"], 2);
    }

    #[test]
    fn draft_seeded_from_order_carries_products() {
        let order = WorkOrder {
            id: WorkOrderId::from_sequence(3),
            requester_name: "Alice Johnson".to_string(),
            requester_email: "alice@example.com".to_string(),
            retailer_id: "2".to_string(),
            retailer_name: "Helena Ag".to_string(),
            shipping_address: "123 Main St\nHelena, AR 72342".to_string(),
            on_site_contact_name: "Bob".to_string(),
            on_site_contact_number: "+1987654321".to_string(),
            requested_delivery_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            created_date: Utc::now(),
            products: vec![LineItem {
                name: "Priaxor - 2x2.5 gal".to_string(),
                quantity: 5,
            }],
            status: WorkOrderStatus::Processing,
        };
        let draft = Draft::from_order(&order);
        assert!(draft.is_edit());
        assert_eq!(draft.editing.as_ref().unwrap().as_str(), "WO-003");
        assert_eq!(draft.phase1.retailer_name, "Helena Ag");
        assert_eq!(
            draft.phase1.requested_delivery_date,
            Some(order.requested_delivery_date)
        );
        assert_eq!(draft.products.len(), 1);
    }
}
