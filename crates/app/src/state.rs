//! Front-end state as one explicit value plus a pure reducer.
//!
//! Submission lifecycle: `Editing -> Submitting -> (Succeeded | Failed)`.
//! `Failed` drops back to `Editing` on the next edit; `NewInvoice` starts over
//! from either terminal phase.

use einvoice_client::{ClientError, ErrorDetails, SubmitReceipt};
use einvoice_core::Reducer;
use einvoice_invoicing::{
    Buyer, InvoiceDraft, InvoiceNumber, InvoiceTotals, InvoiceType, LineItemInput,
    ValidationErrors,
};

/// Uniform failure shown to the user, whatever went wrong underneath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
    pub code: Option<String>,
    pub details: Option<ErrorDetails>,
}

impl From<&ClientError> for Failure {
    fn from(err: &ClientError) -> Self {
        Self {
            message: err.user_message(),
            code: err.code().map(str::to_string),
            details: err.details().cloned(),
        }
    }
}

impl core::fmt::Display for Failure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} ({code})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Submitting,
    Succeeded(SubmitReceipt),
    Failed(Failure),
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Editing => "editing",
            Phase::Submitting => "submitting",
            Phase::Succeeded(_) => "succeeded",
            Phase::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetInvoiceType(InvoiceType),
    SetSellerId(String),
    SetBuyer(Buyer),
    AddItem,
    RemoveItem(usize),
    UpdateItem { index: usize, item: LineItemInput },
    ValidationFailed(ValidationErrors),
    /// The draft passed validation and its document was rendered.
    SubmitStarted { document: String },
    SubmitSucceeded(SubmitReceipt),
    SubmitFailed(Failure),
    /// Explicit user request for a fresh invoice.
    NewInvoice { number: InvoiceNumber },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    draft: InvoiceDraft,
    phase: Phase,
    validation: Option<ValidationErrors>,
    /// Document generated for the most recent submission attempt.
    document: Option<String>,
}

impl AppState {
    pub fn new(number: InvoiceNumber) -> Self {
        Self::with_draft(InvoiceDraft::new(number))
    }

    pub fn with_draft(draft: InvoiceDraft) -> Self {
        Self {
            draft,
            phase: Phase::Editing,
            validation: None,
            document: None,
        }
    }

    pub fn draft(&self) -> &InvoiceDraft {
        &self.draft
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn validation(&self) -> Option<&ValidationErrors> {
        self.validation.as_ref()
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    pub fn totals(&self) -> InvoiceTotals {
        self.draft.totals()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Form fields accept input (the submit button is enabled too).
    pub fn is_editable(&self) -> bool {
        matches!(self.phase, Phase::Editing | Phase::Failed(_))
    }

    fn edit(&self, apply: impl FnOnce(&mut InvoiceDraft) -> bool) -> Self {
        if !self.is_editable() {
            tracing::debug!(phase = self.phase.name(), "edit ignored");
            return self.clone();
        }
        let mut next = self.clone();
        if apply(&mut next.draft) {
            next.phase = Phase::Editing;
        }
        next
    }
}

impl Reducer for AppState {
    type Action = Action;

    fn reduce(&self, action: &Action) -> Self {
        match action {
            Action::SetInvoiceType(kind) => self.edit(|d| {
                d.invoice_type = *kind;
                true
            }),
            Action::SetSellerId(id) => self.edit(|d| {
                d.seller_id = id.clone();
                true
            }),
            Action::SetBuyer(buyer) => self.edit(|d| {
                d.buyer = buyer.clone();
                true
            }),
            Action::AddItem => self.edit(|d| {
                d.add_item(LineItemInput::blank());
                true
            }),
            Action::RemoveItem(index) => self.edit(|d| d.remove_item(*index).is_ok()),
            Action::UpdateItem { index, item } => {
                self.edit(|d| d.update_item(*index, item.clone()).is_ok())
            }
            Action::ValidationFailed(errors) if self.is_editable() => Self {
                phase: Phase::Editing,
                validation: Some(errors.clone()),
                ..self.clone()
            },
            Action::SubmitStarted { document } if self.is_editable() => Self {
                phase: Phase::Submitting,
                validation: None,
                document: Some(document.clone()),
                ..self.clone()
            },
            Action::SubmitSucceeded(receipt) if self.is_submitting() => Self {
                phase: Phase::Succeeded(receipt.clone()),
                ..self.clone()
            },
            Action::SubmitFailed(failure) if self.is_submitting() => Self {
                phase: Phase::Failed(failure.clone()),
                ..self.clone()
            },
            Action::NewInvoice { number } if !self.is_submitting() => Self {
                draft: self.draft.restart(number.clone()),
                phase: Phase::Editing,
                validation: None,
                document: None,
            },
            other => {
                tracing::debug!(phase = self.phase.name(), action = ?other, "action ignored");
                self.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn number(raw: &str) -> InvoiceNumber {
        raw.parse().unwrap()
    }

    fn editing() -> AppState {
        AppState::new(number("INV-2403-4321"))
    }

    fn submitting() -> AppState {
        editing().reduce(&Action::SubmitStarted {
            document: "<Invoice/>".to_string(),
        })
    }

    fn failure() -> Failure {
        Failure {
            message: "Could not reach the invoice service".to_string(),
            code: None,
            details: None,
        }
    }

    fn widget() -> LineItemInput {
        LineItemInput::new("Widget", "100", "2", "15")
    }

    #[test]
    fn edits_recalculate_totals() {
        let state = editing().reduce_all(&[
            Action::UpdateItem {
                index: 0,
                item: widget(),
            },
            Action::AddItem,
            Action::UpdateItem {
                index: 1,
                item: widget(),
            },
        ]);
        assert_eq!(state.totals().grand_total, Decimal::from(460));
        assert_eq!(state.phase(), &Phase::Editing);
    }

    #[test]
    fn submit_lifecycle_success() {
        let state = submitting();
        assert!(state.is_submitting());
        assert_eq!(state.document(), Some("<Invoice/>"));

        let done = state.reduce(&Action::SubmitSucceeded(SubmitReceipt::default()));
        assert!(matches!(done.phase(), Phase::Succeeded(_)));
    }

    #[test]
    fn second_submit_while_outstanding_is_ignored() {
        let state = submitting();
        let again = state.reduce(&Action::SubmitStarted {
            document: "<Other/>".to_string(),
        });
        assert_eq!(again, state);
    }

    #[test]
    fn edits_are_ignored_while_submitting_and_after_success() {
        let state = submitting();
        assert_eq!(state.reduce(&Action::AddItem), state);

        let done = state.reduce(&Action::SubmitSucceeded(SubmitReceipt::default()));
        assert_eq!(done.reduce(&Action::SetSellerId("1-234-567890".into())), done);
    }

    #[test]
    fn failure_keeps_draft_and_number() {
        let before = editing().reduce(&Action::UpdateItem {
            index: 0,
            item: widget(),
        });
        let failed = before
            .reduce(&Action::SubmitStarted {
                document: "<Invoice/>".to_string(),
            })
            .reduce(&Action::SubmitFailed(failure()));

        assert!(matches!(failed.phase(), Phase::Failed(_)));
        assert_eq!(failed.draft(), before.draft());
        assert_eq!(failed.draft().invoice_number, number("INV-2403-4321"));
    }

    #[test]
    fn editing_after_failure_returns_to_editing() {
        let failed = submitting().reduce(&Action::SubmitFailed(failure()));
        let edited = failed.reduce(&Action::SetSellerId("1-234-567890".into()));
        assert_eq!(edited.phase(), &Phase::Editing);
        assert_eq!(edited.draft().seller_id, "1-234-567890");
    }

    #[test]
    fn retry_is_allowed_from_failed() {
        let failed = submitting().reduce(&Action::SubmitFailed(failure()));
        let retry = failed.reduce(&Action::SubmitStarted {
            document: "<Invoice/>".to_string(),
        });
        assert!(retry.is_submitting());
    }

    #[test]
    fn results_only_apply_while_submitting() {
        let state = editing();
        assert_eq!(state.reduce(&Action::SubmitFailed(failure())), state);
        assert_eq!(
            state.reduce(&Action::SubmitSucceeded(SubmitReceipt::default())),
            state
        );
    }

    #[test]
    fn new_invoice_after_success_starts_blank() {
        let done = submitting()
            .reduce(&Action::SubmitSucceeded(SubmitReceipt::default()));
        let fresh = done.reduce(&Action::NewInvoice {
            number: number("INV-2403-9999"),
        });

        assert_eq!(fresh.phase(), &Phase::Editing);
        assert_eq!(fresh.draft().invoice_number, number("INV-2403-9999"));
        assert_eq!(fresh.draft().items, vec![LineItemInput::blank()]);
        assert_eq!(fresh.document(), None);
    }

    #[test]
    fn new_invoice_is_refused_while_submitting() {
        let state = submitting();
        let same = state.reduce(&Action::NewInvoice {
            number: number("INV-2403-9999"),
        });
        assert_eq!(same, state);
    }

    #[test]
    fn removing_last_line_is_a_no_op() {
        let state = editing();
        assert_eq!(state.reduce(&Action::RemoveItem(0)), state);
    }

    #[test]
    fn validation_failure_is_recorded_and_cleared_on_submit() {
        let errors = einvoice_invoicing::validate(editing().draft()).unwrap_err();
        let state = editing().reduce(&Action::ValidationFailed(errors));
        assert!(state.validation().is_some());

        let started = state.reduce(&Action::SubmitStarted {
            document: "<Invoice/>".to_string(),
        });
        assert!(started.validation().is_none());
    }

    #[test]
    fn reducing_is_pure() {
        let state = editing();
        let action = Action::UpdateItem {
            index: 0,
            item: widget(),
        };
        assert_eq!(state.reduce(&action), state.reduce(&action));
        assert_eq!(state, editing());
    }
}
