//! Submission session: runs the effects around the pure reducer.
//!
//! The session is the only place that talks to the network. It validates the
//! draft, renders the document, and feeds the service's answer back into the
//! state as an action. Failures never escape as errors; they become
//! `Phase::Failed` and the user decides whether to resubmit.

use einvoice_client::InvoiceService;
use einvoice_core::Reducer;
use einvoice_invoicing::{InvoiceDraft, InvoiceNumber, render_document_today, validate};

use crate::state::{Action, AppState, Failure};

pub struct InvoiceSession<S> {
    service: S,
    state: AppState,
}

impl<S: InvoiceService> InvoiceSession<S> {
    pub fn new(service: S, draft: InvoiceDraft) -> Self {
        Self {
            service,
            state: AppState::with_draft(draft),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Apply one action to the current state.
    pub fn dispatch(&mut self, action: Action) -> &AppState {
        self.state = self.state.reduce(&action);
        &self.state
    }

    /// Validate, render and submit the current draft.
    ///
    /// Taking `&mut self` keeps at most one submission outstanding per session.
    pub async fn submit(&mut self) -> &AppState {
        if !self.state.is_editable() {
            tracing::warn!(phase = self.state.phase().name(), "submit ignored");
            return &self.state;
        }

        if let Err(errors) = validate(self.state.draft()) {
            tracing::info!(invalid_fields = errors.errors().len(), "draft rejected by validation");
            return self.dispatch(Action::ValidationFailed(errors));
        }

        let processed = self.state.draft().process();
        let document = render_document_today(&processed);
        self.dispatch(Action::SubmitStarted { document });

        tracing::info!(
            invoice_number = %processed.invoice_number,
            grand_total = %processed.totals.grand_total,
            "submitting invoice"
        );

        match self.service.submit_invoice(&processed).await {
            Ok(receipt) => self.dispatch(Action::SubmitSucceeded(receipt)),
            Err(err) => {
                tracing::warn!(error = %err, "invoice submission failed");
                self.dispatch(Action::SubmitFailed(Failure::from(&err)))
            }
        }
    }

    /// Start a blank invoice with a freshly generated number.
    pub fn start_new_invoice(&mut self) -> &AppState {
        self.dispatch(Action::NewInvoice {
            number: InvoiceNumber::generate(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use einvoice_client::{ClientError, ErrorDetails, InvoiceRecord, ServiceError, SubmitReceipt};
    use einvoice_core::InvoiceId;
    use einvoice_invoicing::{Buyer, LineItemInput, ProcessedInvoice};

    use crate::state::Phase;

    /// In-memory service returning a canned submission result.
    struct FakeService {
        result: Result<SubmitReceipt, ClientError>,
        submitted: Mutex<Vec<ProcessedInvoice>>,
    }

    impl FakeService {
        fn answering(result: Result<SubmitReceipt, ClientError>) -> Self {
            Self {
                result,
                submitted: Mutex::new(Vec::new()),
            }
        }

        fn submissions(&self) -> usize {
            self.submitted.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl InvoiceService for FakeService {
        async fn list_invoices(&self) -> Result<Vec<InvoiceRecord>, ClientError> {
            Ok(Vec::new())
        }

        async fn get_invoice(&self, _id: InvoiceId) -> Result<InvoiceRecord, ClientError> {
            Err(ClientError::Http {
                status: 404,
                message: "Not Found".to_string(),
            })
        }

        async fn submit_invoice(
            &self,
            invoice: &ProcessedInvoice,
        ) -> Result<SubmitReceipt, ClientError> {
            self.submitted.lock().unwrap().push(invoice.clone());
            self.result.clone()
        }
    }

    fn valid_draft() -> InvoiceDraft {
        let mut draft = InvoiceDraft::new("INV-2403-4321".parse().unwrap());
        draft.seller_id = "1-234-567890".to_string();
        draft.buyer = Buyer {
            name: "Acme Ltd".to_string(),
            address: "1 Main St".to_string(),
            cr_id: "3-101-654321".to_string(),
        };
        draft.items = vec![LineItemInput::new("Widget", "100", "2", "15")];
        draft
    }

    fn receipt() -> SubmitReceipt {
        SubmitReceipt {
            message: Some("Invoice processed successfully".to_string()),
            invoice_id: Some(InvoiceId::new()),
            total_amount: None,
        }
    }

    #[tokio::test]
    async fn successful_submission() {
        let mut session = InvoiceSession::new(FakeService::answering(Ok(receipt())), valid_draft());
        let state = session.submit().await;

        assert!(matches!(state.phase(), Phase::Succeeded(r) if r.message.is_some()));
        let document = state.document().unwrap();
        assert!(document.contains("<InvoiceNumber>INV-2403-4321</InvoiceNumber>"));
        assert!(document.contains("<GrandTotal>230.00</GrandTotal>"));
        assert_eq!(session.service().submissions(), 1);
    }

    #[tokio::test]
    async fn transport_failure_keeps_number_and_data() {
        let failing = FakeService::answering(Err(ClientError::Transport(
            "connection refused".to_string(),
        )));
        let mut session = InvoiceSession::new(failing, valid_draft());
        let state = session.submit().await;

        match state.phase() {
            Phase::Failed(f) => assert!(f.message.contains("connection refused")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(state.draft(), &valid_draft());
        assert_eq!(state.draft().invoice_number.as_str(), "INV-2403-4321");
    }

    #[tokio::test]
    async fn service_error_details_reach_the_state() {
        let rejected = FakeService::answering(Err(ClientError::Service(ServiceError {
            http_status: 200,
            code: Some("TAX_MISMATCH".to_string()),
            message: "Tax calculation mismatch".to_string(),
            details: Some(ErrorDetails {
                field: Some("items[0].taxAmount".to_string()),
                error: Some("Calculated tax does not match provided value".to_string()),
            }),
        })));
        let mut session = InvoiceSession::new(rejected, valid_draft());

        match session.submit().await.phase() {
            Phase::Failed(f) => {
                assert_eq!(f.code.as_deref(), Some("TAX_MISMATCH"));
                assert_eq!(
                    f.details.as_ref().and_then(|d| d.field.as_deref()),
                    Some("items[0].taxAmount")
                );
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_draft_is_not_sent() {
        let mut draft = valid_draft();
        draft.buyer.cr_id = "nope".to_string();
        let mut session = InvoiceSession::new(FakeService::answering(Ok(receipt())), draft);

        let state = session.submit().await;
        assert_eq!(state.phase(), &Phase::Editing);
        assert!(state.validation().unwrap().for_field("buyer.crId").is_some());
        assert_eq!(session.service().submissions(), 0);
    }

    #[tokio::test]
    async fn resubmitting_after_success_requires_new_invoice() {
        let mut session = InvoiceSession::new(FakeService::answering(Ok(receipt())), valid_draft());
        session.submit().await;
        session.submit().await;
        assert_eq!(session.service().submissions(), 1);

        let state = session.start_new_invoice();
        assert_eq!(state.phase(), &Phase::Editing);
        assert_ne!(state.draft().invoice_number.as_str(), "");
        assert_eq!(state.draft().seller_id, "1-234-567890");
        assert_eq!(state.draft().items, vec![LineItemInput::blank()]);
    }

    #[tokio::test]
    async fn user_can_resubmit_after_failure() {
        let failing = FakeService::answering(Err(ClientError::Transport("down".to_string())));
        let mut session = InvoiceSession::new(failing, valid_draft());
        session.submit().await;
        session.submit().await;
        assert_eq!(session.service().submissions(), 2);
    }
}
