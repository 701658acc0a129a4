//! HTTP client for the remote invoice service.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;

use einvoice_core::InvoiceId;
use einvoice_invoicing::{ProcessedInvoice, SubmissionStatus};

use crate::config::ClientConfig;
use crate::error::{ClientError, ErrorDetails, ServiceError};
use crate::types::{InvoiceBody, InvoiceListBody, InvoiceRecord, SubmitReceipt};

/// Operations the front end needs from the invoice service.
///
/// Implemented by [`InvoiceServiceClient`]; tests substitute in-memory fakes.
#[async_trait::async_trait]
pub trait InvoiceService: Send + Sync {
    async fn list_invoices(&self) -> Result<Vec<InvoiceRecord>, ClientError>;

    async fn get_invoice(&self, id: InvoiceId) -> Result<InvoiceRecord, ClientError>;

    async fn submit_invoice(&self, invoice: &ProcessedInvoice) -> Result<SubmitReceipt, ClientError>;
}

/// `reqwest`-backed client. Cheap to clone (shares the connection pool).
#[derive(Debug, Clone)]
pub struct InvoiceServiceClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl InvoiceServiceClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::transport)?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    /// Check that the service answers at all (any HTTP response counts).
    pub async fn ping(&self) -> bool {
        self.http.get(self.url("/")).send().await.is_ok()
    }
}

#[async_trait::async_trait]
impl InvoiceService for InvoiceServiceClient {
    #[instrument(skip(self), err)]
    async fn list_invoices(&self) -> Result<Vec<InvoiceRecord>, ClientError> {
        let resp = self
            .http
            .get(self.url("/invoice_list"))
            .send()
            .await
            .map_err(ClientError::transport)?;

        let body: InvoiceListBody = read_body(resp).await?;
        tracing::debug!(count = body.invoices.len(), "fetched invoice list");
        Ok(body.invoices)
    }

    #[instrument(skip(self), fields(invoice_id = %id), err)]
    async fn get_invoice(&self, id: InvoiceId) -> Result<InvoiceRecord, ClientError> {
        let resp = self
            .http
            .get(self.url(&format!("/invoice/{id}")))
            .send()
            .await
            .map_err(ClientError::transport)?;

        let body: InvoiceBody = read_body(resp).await?;
        Ok(body.invoice)
    }

    #[instrument(
        skip(self, invoice),
        fields(invoice_number = %invoice.invoice_number, items = invoice.items.len()),
        err
    )]
    async fn submit_invoice(&self, invoice: &ProcessedInvoice) -> Result<SubmitReceipt, ClientError> {
        let payload = invoice.payload(SubmissionStatus::Valid);
        let resp = self
            .http
            .post(self.url("/submit_invoice"))
            .json(&payload)
            .send()
            .await
            .map_err(ClientError::transport)?;

        let receipt: SubmitReceipt = read_body(resp).await?;
        tracing::info!(invoice_id = ?receipt.invoice_id, "invoice accepted by service");
        Ok(receipt)
    }
}

/// Turn a response into `T`, or into the matching [`ClientError`].
///
/// A `status: "error"` body wins over the HTTP status so that the service's
/// message and details reach the user whenever they exist.
async fn read_body<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    let bytes = resp.bytes().await.map_err(ClientError::transport)?;
    let body: Option<serde_json::Value> = serde_json::from_slice(&bytes).ok();

    if let Some(err) = body.as_ref().and_then(|b| service_error(status, b)) {
        return Err(ClientError::Service(err));
    }

    if !status.is_success() {
        let message = body
            .as_ref()
            .and_then(|b| b.get("message"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| reason(status));
        return Err(ClientError::Http {
            status: status.as_u16(),
            message,
        });
    }

    let body = body.ok_or_else(|| ClientError::Decode("response body is not JSON".to_string()))?;
    serde_json::from_value(body).map_err(|e| ClientError::Decode(e.to_string()))
}

fn service_error(status: StatusCode, body: &serde_json::Value) -> Option<ServiceError> {
    if body.get("status").and_then(|s| s.as_str()) != Some("error") {
        return None;
    }

    let text = |key: &str| body.get(key).and_then(|v| v.as_str()).map(str::to_string);
    Some(ServiceError {
        http_status: status.as_u16(),
        code: text("code"),
        message: text("message").unwrap_or_else(|| reason(status)),
        details: body.get("details").cloned().and_then(ErrorDetails::from_value),
    })
}

fn reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
