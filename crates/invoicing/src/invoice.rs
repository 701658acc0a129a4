//! Invoice draft, invoice-level totals and the submission body.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use einvoice_core::{DomainError, DomainResult};

use crate::line_item::{ItemTotals, LineItem, LineItemInput, overflow};
use crate::number::InvoiceNumber;

/// Kind of invoice, from a fixed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceType {
    #[default]
    Standard,
    Proforma,
}

impl InvoiceType {
    /// Wire value, as used in the document and the submission body.
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceType::Standard => "standard",
            InvoiceType::Proforma => "proforma",
        }
    }

    /// Label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceType::Standard => "Tax Invoice",
            InvoiceType::Proforma => "General Invoice",
        }
    }
}

impl core::fmt::Display for InvoiceType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for InvoiceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(InvoiceType::Standard),
            "proforma" => Ok(InvoiceType::Proforma),
            other => Err(DomainError::validation(format!(
                "unknown invoice type {other:?} (expected standard or proforma)"
            ))),
        }
    }
}

/// Buyer block of the invoice header.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Buyer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    /// Buyer tax identifier (CR).
    #[serde(default, rename = "crId")]
    pub cr_id: String,
}

/// Invoice-level rollup of line totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub grand_total: Decimal,
}

impl InvoiceTotals {
    /// Fold line totals with addition, in the order given.
    ///
    /// Line totals are already rounded to cents, so sums are exact and
    /// `grand_total == subtotal + total_tax`. A sum that overflows degrades to
    /// zero, like the line calculator.
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a ItemTotals>,
    {
        items.into_iter().fold(Self::default(), |acc, item| Self {
            subtotal: sum(acc.subtotal, item.total_without_tax, "subtotal"),
            total_tax: sum(acc.total_tax, item.tax_amount, "total tax"),
            grand_total: sum(acc.grand_total, item.total_with_tax, "grand total"),
        })
    }
}

fn sum(acc: Decimal, value: Decimal, what: &str) -> Decimal {
    acc.checked_add(value).unwrap_or_else(|| overflow(what))
}

fn default_items() -> Vec<LineItemInput> {
    vec![LineItemInput::blank()]
}

/// Invoice as it is being edited: header fields plus raw line inputs.
///
/// The draft lives only in client memory; it is recalculated on every edit and
/// handed to the remote service once on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    #[serde(default = "InvoiceNumber::generate")]
    pub invoice_number: InvoiceNumber,
    #[serde(default)]
    pub invoice_type: InvoiceType,
    /// Seller tax identifier (CR).
    #[serde(default)]
    pub seller_id: String,
    #[serde(default)]
    pub buyer: Buyer,
    #[serde(default = "default_items")]
    pub items: Vec<LineItemInput>,
}

impl InvoiceDraft {
    /// Blank draft with the given number and a single blank line.
    pub fn new(invoice_number: InvoiceNumber) -> Self {
        Self {
            invoice_number,
            invoice_type: InvoiceType::default(),
            seller_id: String::new(),
            buyer: Buyer::default(),
            items: default_items(),
        }
    }

    /// Start over with a new number and one blank line, keeping type, seller and buyer.
    pub fn restart(&self, invoice_number: InvoiceNumber) -> Self {
        Self {
            invoice_number,
            items: default_items(),
            ..self.clone()
        }
    }

    pub fn add_item(&mut self, item: LineItemInput) {
        self.items.push(item);
    }

    /// Remove a line. The last remaining line cannot be removed.
    pub fn remove_item(&mut self, index: usize) -> DomainResult<LineItemInput> {
        if index >= self.items.len() {
            return Err(DomainError::not_found());
        }
        if self.items.len() == 1 {
            return Err(DomainError::invariant("an invoice needs at least one line"));
        }
        Ok(self.items.remove(index))
    }

    pub fn update_item(&mut self, index: usize, item: LineItemInput) -> DomainResult<()> {
        let slot = self.items.get_mut(index).ok_or_else(DomainError::not_found)?;
        *slot = item;
        Ok(())
    }

    /// Live totals for the summary panel.
    pub fn totals(&self) -> InvoiceTotals {
        let lines: Vec<ItemTotals> = self.items.iter().map(LineItemInput::totals).collect();
        InvoiceTotals::from_items(&lines)
    }

    /// Calculate every line and freeze the draft for rendering and submission.
    pub fn process(&self) -> ProcessedInvoice {
        let items: Vec<LineItem> = self
            .items
            .iter()
            .zip(1u32..)
            .map(|(input, id)| LineItem::from_input(id, input))
            .collect();
        let totals = InvoiceTotals::from_items(items.iter().map(|item| &item.totals));

        ProcessedInvoice {
            invoice_number: self.invoice_number.clone(),
            invoice_type: self.invoice_type,
            seller_id: self.seller_id.clone(),
            buyer: self.buyer.clone(),
            items,
            totals,
        }
    }
}

/// Invoice with calculated lines and totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedInvoice {
    pub invoice_number: InvoiceNumber,
    pub invoice_type: InvoiceType,
    pub seller_id: String,
    pub buyer: Buyer,
    pub items: Vec<LineItem>,
    pub totals: InvoiceTotals,
}

impl ProcessedInvoice {
    /// JSON body for `POST /submit_invoice`.
    pub fn payload(&self, status: SubmissionStatus) -> SubmissionPayload<'_> {
        SubmissionPayload {
            invoice_number: &self.invoice_number,
            invoice_type: self.invoice_type,
            seller_id: &self.seller_id,
            buyer: &self.buyer,
            items: &self.items,
            legacy_invoice_type: self.invoice_type,
            invoice_status: status,
        }
    }
}

/// Status the client attaches to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Passed local validation.
    Valid,
    Invalid,
}

/// Wire shape of a submission: camelCase header plus the snake_case
/// `invoice_type` and `invoice_status` keys the service reads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload<'a> {
    pub invoice_number: &'a InvoiceNumber,
    pub invoice_type: InvoiceType,
    pub seller_id: &'a str,
    pub buyer: &'a Buyer,
    pub items: &'a [LineItem],
    #[serde(rename = "invoice_type")]
    pub legacy_invoice_type: InvoiceType,
    #[serde(rename = "invoice_status")]
    pub invoice_status: SubmissionStatus,
}
