use crate::catalog::ProductCatalog;
use crate::types::{LineItem, LineItemInput, NewRetailerForm, Phase1Form};
use chrono::{Months, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

/// International phone number, E.164-like.
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").expect("phone pattern compiles"));

/// 5-digit zip, optional `-` + 4-digit suffix.
static ZIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("zip pattern compiles"));

/// A field-level validation failure, addressed by the same field paths the
/// form layer uses (`products.0.quantity`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn shorter_than(s: &str, min: usize) -> bool {
    s.chars().count() < min
}

/// Structural email check: one `@` with non-empty local and domain parts,
/// at most 254 characters.
fn is_well_formed_email(s: &str) -> bool {
    if s.is_empty() || s.len() > 254 {
        return false;
    }
    match s.find('@') {
        Some(at) => at > 0 && at < s.len() - 1 && !s[at + 1..].contains('@'),
        None => false,
    }
}

/// Validate the phase-1 record (requester + retailer + shipping).
/// Returns every error found; empty means the record passes.
///
/// `today` anchors the delivery-date window so the check stays a pure
/// function of its inputs.
pub fn validate_phase1(form: &Phase1Form, today: NaiveDate) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if form.retailer_id.is_empty() {
        errors.push(FieldError::new("retailerId", "Please select a retailer"));
    }
    if shorter_than(&form.retailer_name, 2) {
        errors.push(FieldError::new("retailerName", "Retailer name is required"));
    }
    if shorter_than(&form.shipping_address, 10) {
        errors.push(FieldError::new(
            "shippingAddress",
            "Shipping address is required",
        ));
    }
    if shorter_than(&form.on_site_contact_name, 2) {
        errors.push(FieldError::new(
            "onSiteContactName",
            "On-site contact name is required",
        ));
    }
    if !PHONE.is_match(&form.on_site_contact_number) {
        errors.push(FieldError::new("onSiteContactNumber", "Invalid phone number"));
    }
    if shorter_than(&form.requester_name, 2) {
        errors.push(FieldError::new("requesterName", "Requester name is required"));
    }
    if !is_well_formed_email(&form.requester_email) {
        errors.push(FieldError::new("requesterEmail", "Invalid email address"));
    }

    match form.requested_delivery_date {
        None => {
            errors.push(FieldError::new("requestedDeliveryDate", "Please select a date"));
        }
        Some(date) => {
            let horizon = today
                .checked_add_months(Months::new(12))
                .unwrap_or(NaiveDate::MAX);
            if date < today {
                errors.push(FieldError::new(
                    "requestedDeliveryDate",
                    "Delivery date cannot be in the past",
                ));
            } else if date > horizon {
                errors.push(FieldError::new(
                    "requestedDeliveryDate",
                    "Select a delivery date within the next year",
                ));
            }
        }
    }

    errors
}

/// Validate and coerce the phase-2 product rows against the catalog.
/// On success returns the coerced line items, preserving input order.
pub fn validate_products(
    items: &[LineItemInput],
    catalog: &ProductCatalog,
) -> Result<Vec<LineItem>, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut products = Vec::with_capacity(items.len());

    if items.is_empty() {
        errors.push(FieldError::new("products", "At least one product is required"));
    }

    for (index, item) in items.iter().enumerate() {
        if item.name.is_empty() {
            errors.push(FieldError::new(
                format!("products.{index}.name"),
                "Product name is required",
            ));
        } else if !catalog.contains(&item.name) {
            errors.push(FieldError::new(
                format!("products.{index}.name"),
                format!("Unknown product: {}", item.name),
            ));
        }

        match item.quantity.coerce() {
            None => {
                errors.push(FieldError::new(
                    format!("products.{index}.quantity"),
                    "Quantity must be a number",
                ));
            }
            Some(quantity) if quantity < 1 => {
                errors.push(FieldError::new(
                    format!("products.{index}.quantity"),
                    "Quantity must be at least 1",
                ));
            }
            Some(quantity) => {
                products.push(LineItem {
                    name: item.name.clone(),
                    quantity,
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(products)
    } else {
        Err(errors)
    }
}

/// Validate the inline new-retailer record.
pub fn validate_new_retailer(form: &NewRetailerForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if form.retailer_id.is_empty() {
        errors.push(FieldError::new("retailerId", "Retailer ID is required"));
    }
    if shorter_than(&form.name, 2) {
        errors.push(FieldError::new(
            "name",
            "Retailer name must be at least 2 characters",
        ));
    }
    if shorter_than(&form.street, 5) {
        errors.push(FieldError::new("street", "Street address is required"));
    }
    if shorter_than(&form.city, 2) {
        errors.push(FieldError::new("city", "City is required"));
    }
    if form.state.chars().count() != 2 {
        errors.push(FieldError::new("state", "State must be 2 characters"));
    }
    if !ZIP.is_match(&form.zip_code) {
        errors.push(FieldError::new("zipCode", "Invalid zip code format"));
    }

    errors
}
