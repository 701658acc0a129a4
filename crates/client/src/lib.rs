//! `einvoice-client`
//!
//! **Responsibility:** talk to the remote invoice service over HTTP/JSON.
//!
//! - `GET /invoice_list`, `GET /invoice/{id}`, `POST /submit_invoice`
//! - one uniform error type for transport, HTTP and service-reported failures
//! - no retries; callers decide whether to resubmit

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{InvoiceService, InvoiceServiceClient};
pub use config::ClientConfig;
pub use error::{ClientError, ErrorDetails, ServiceError};
pub use types::{InvoiceRecord, InvoiceStatus, SellerInfo, SubmitReceipt};
