//! Invoicing domain module.
//!
//! Business rules for building an invoice in the client: line-item and invoice
//! totals, invoice numbering, form validation, the XML document and the JSON
//! submission body. Everything here is deterministic (no IO, no HTTP); clock and
//! randomness are injectable.

pub mod document;
pub mod invoice;
pub mod line_item;
pub mod number;
pub mod validation;

pub use document::{render_document, render_document_today};
pub use invoice::{
    Buyer, InvoiceDraft, InvoiceTotals, InvoiceType, ProcessedInvoice, SubmissionPayload,
    SubmissionStatus,
};
pub use line_item::{ItemTotals, LineItem, LineItemInput, calculate_item_totals};
pub use number::InvoiceNumber;
pub use validation::{FieldError, ValidationErrors, validate};
