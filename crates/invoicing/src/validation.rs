//! Form validation run before a draft may be submitted.
//!
//! The calculator never rejects input; these checks are the upstream gate that
//! keeps out-of-range values away from the service.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use einvoice_core::TaxId;
use einvoice_core::tax_id::TAX_ID_FORMAT_HINT;

use crate::invoice::InvoiceDraft;
use crate::line_item::{LineItemInput, MAX_QUANTITY};

/// One failed rule, addressed by form field path (e.g. `items[0].quantity`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
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

impl core::fmt::Display for FieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All rule violations found in a draft, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
#[error("invoice has {} invalid field(s)", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message reported for a field, if any.
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }
}

/// Check a draft against the form rules.
pub fn validate(draft: &InvoiceDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    check_tax_id(&mut errors, "sellerId", &draft.seller_id, "Seller tax ID is required");
    required(&mut errors, "buyer.name", &draft.buyer.name, "Buyer name is required");
    check_tax_id(&mut errors, "buyer.crId", &draft.buyer.cr_id, "Buyer tax ID is required");
    required(
        &mut errors,
        "buyer.address",
        &draft.buyer.address,
        "Buyer address is required",
    );

    if draft.items.is_empty() {
        errors.push("items", "At least one line item is required");
    }
    for (index, item) in draft.items.iter().enumerate() {
        check_item(&mut errors, index, item);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(count = errors.errors.len(), "draft failed validation");
        Err(errors)
    }
}

fn required(errors: &mut ValidationErrors, field: &str, value: &str, message: &str) -> bool {
    if value.trim().is_empty() {
        errors.push(field, message);
        false
    } else {
        true
    }
}

fn check_tax_id(errors: &mut ValidationErrors, field: &str, value: &str, message: &str) {
    if required(errors, field, value, message) && !TaxId::is_valid(value) {
        errors.push(field, TAX_ID_FORMAT_HINT);
    }
}

/// Strict numeric parse for validation (the calculator is lenient, this is not).
fn number(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim()).ok()
}

fn check_item(errors: &mut ValidationErrors, index: usize, item: &LineItemInput) {
    let field = |name: &str| format!("items[{index}].{name}");

    required(errors, &field("description"), &item.description, "Description is required");

    if required(errors, &field("unitPrice"), &item.unit_price, "Unit price is required") {
        match number(&item.unit_price) {
            None => errors.push(field("unitPrice"), "Unit price must be a number"),
            Some(price) if price < Decimal::new(1, 2) => {
                errors.push(field("unitPrice"), "Unit price must be at least 0.01")
            }
            Some(_) => {}
        }
    }

    if required(errors, &field("quantity"), &item.quantity, "Quantity is required") {
        match number(&item.quantity) {
            None => errors.push(field("quantity"), "Quantity must be a number"),
            Some(qty) if !qty.fract().is_zero() => {
                errors.push(field("quantity"), "Quantity must be a whole number")
            }
            Some(qty) if qty < Decimal::ONE => {
                errors.push(field("quantity"), "Quantity must be at least 1")
            }
            Some(qty) if qty > Decimal::from(MAX_QUANTITY) => {
                errors.push(field("quantity"), "Quantity cannot exceed 10,000")
            }
            Some(_) => {}
        }
    }

    if required(
        errors,
        &field("taxPercentage"),
        &item.tax_percentage,
        "Tax percentage is required",
    ) {
        match number(&item.tax_percentage) {
            None => errors.push(field("taxPercentage"), "Tax percentage must be a number"),
            Some(tax) if tax < Decimal::ZERO => {
                errors.push(field("taxPercentage"), "Tax percentage must be at least 0%")
            }
            Some(tax) if tax > Decimal::ONE_HUNDRED => {
                errors.push(field("taxPercentage"), "Tax percentage cannot exceed 100%")
            }
            Some(_) => {}
        }
    }
}
