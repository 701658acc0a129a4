//! Response shapes of the invoice service.
//!
//! Records are read-only projections owned by the service; the client never
//! mutates them.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use einvoice_core::{InvoiceId, format_money};
use einvoice_invoicing::Buyer;

/// Processing status of a stored invoice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InvoiceStatus {
    #[default]
    Valid,
    Invalid,
    Processing,
    Completed,
    Error,
    /// Any status this client does not know about, kept verbatim.
    Other(String),
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            InvoiceStatus::Valid => "valid",
            InvoiceStatus::Invalid => "invalid",
            InvoiceStatus::Processing => "processing",
            InvoiceStatus::Completed => "completed",
            InvoiceStatus::Error => "error",
            InvoiceStatus::Other(s) => s,
        }
    }

    /// Whether the status indicates a problem with the invoice.
    pub fn is_failure(&self) -> bool {
        matches!(self, InvoiceStatus::Invalid | InvoiceStatus::Error)
    }
}

impl From<String> for InvoiceStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "valid" => InvoiceStatus::Valid,
            "invalid" => InvoiceStatus::Invalid,
            "processing" => InvoiceStatus::Processing,
            "completed" => InvoiceStatus::Completed,
            "error" => InvoiceStatus::Error,
            _ => InvoiceStatus::Other(value),
        }
    }
}

impl From<InvoiceStatus> for String {
    fn from(value: InvoiceStatus) -> Self {
        value.as_str().to_string()
    }
}

impl core::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SellerInfo {
    #[serde(default, rename = "crId")]
    pub cr_id: Option<String>,
}

/// One stored invoice as returned by `/invoice_list` and `/invoice/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub invoice_id: InvoiceId,
    /// Free-form on the service side (`standard`, `proforma`, legacy labels).
    #[serde(default)]
    pub invoice_type: Option<String>,
    #[serde(default)]
    pub buyer_info: Buyer,
    #[serde(default)]
    pub seller_info: SellerInfo,
    #[serde(default)]
    pub seller_cr: String,
    #[serde(default)]
    pub buyer_id: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_amount_without_tax: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_tax: Option<Decimal>,
    #[serde(default)]
    pub invoice_status: InvoiceStatus,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl InvoiceRecord {
    /// Subtotal for display; missing values show as `0.00`.
    pub fn subtotal_display(&self) -> String {
        format_money(self.total_amount_without_tax.unwrap_or_default())
    }

    pub fn tax_display(&self) -> String {
        format_money(self.total_tax.unwrap_or_default())
    }

    pub fn total_display(&self) -> String {
        format_money(self.total_amount.unwrap_or_default())
    }

    /// Creation date (`YYYY-MM-DD`), or empty when the service omitted it.
    pub fn created_on(&self) -> String {
        self.created_at
            .map(|ts| ts.date().format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

/// Success body of `POST /submit_invoice`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubmitReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub invoice_id: Option<InvoiceId>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_amount: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InvoiceListBody {
    #[serde(default)]
    pub invoices: Vec<InvoiceRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InvoiceBody {
    pub invoice: InvoiceRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn record_from_service_json() {
        let record: InvoiceRecord = serde_json::from_value(serde_json::json!({
            "invoice_id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "invoice_type": "standard",
            "buyer_info": {"name": "Acme", "address": "1 Main St", "crId": "3-101-654321"},
            "seller_info": {"crId": "1-234-567890"},
            "seller_cr": "1-234-567890",
            "buyer_id": "3-101-654321",
            "total_amount": 460.0,
            "total_amount_without_tax": 400.0,
            "total_tax": 60.0,
            "invoice_status": "completed",
            "created_at": "2024-03-09T10:15:30.123456",
            "updated_at": null
        }))
        .unwrap();

        assert_eq!(record.buyer_info.cr_id, "3-101-654321");
        assert_eq!(record.seller_info.cr_id.as_deref(), Some("1-234-567890"));
        assert_eq!(record.invoice_status, InvoiceStatus::Completed);
        assert_eq!(record.total_amount, Some(Decimal::from_str("460").unwrap()));
        assert_eq!(record.total_display(), "460.00");
        assert_eq!(record.created_on(), "2024-03-09");
        assert!(record.updated_at.is_none());
    }

    #[test]
    fn missing_totals_display_as_zero() {
        let record: InvoiceRecord = serde_json::from_value(serde_json::json!({
            "invoice_id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "invoice_status": "waiting-for-authority"
        }))
        .unwrap();

        assert_eq!(record.subtotal_display(), "0.00");
        assert_eq!(record.tax_display(), "0.00");
        assert_eq!(record.total_display(), "0.00");
        assert_eq!(
            record.invoice_status,
            InvoiceStatus::Other("waiting-for-authority".to_string())
        );
        assert_eq!(record.created_on(), "");
    }

    #[test]
    fn failure_statuses() {
        assert!(InvoiceStatus::from("invalid".to_string()).is_failure());
        assert!(InvoiceStatus::from("error".to_string()).is_failure());
        assert!(!InvoiceStatus::Completed.is_failure());
    }
}
