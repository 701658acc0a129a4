//! Submit command - validate, render and send a draft to the service

use std::path::Path;

use anyhow::{Result, anyhow, bail};
use einvoice_app::{InvoiceSession, Phase};
use einvoice_client::{ClientConfig, InvoiceServiceClient, SubmitReceipt};
use einvoice_core::format_money;

use crate::ui;

pub async fn run(config: ClientConfig, path: &Path, show_document: bool) -> Result<()> {
    let draft = super::load_draft(path)?;
    let client = InvoiceServiceClient::new(config)?;

    ui::info(&format!(
        "Submitting {} to {}",
        draft.invoice_number,
        client.config().base_url()
    ));

    let mut session = InvoiceSession::new(client, draft);
    let state = session.submit().await;

    if show_document {
        if let Some(document) = state.document() {
            println!("{document}");
        }
    }

    match state.phase() {
        Phase::Succeeded(receipt) => {
            ui::success(
                receipt
                    .message
                    .as_deref()
                    .unwrap_or("Invoice submitted successfully"),
            );
            ui::key_value("Invoice Number", state.draft().invoice_number.as_str());
            if let Some(id) = receipt.invoice_id {
                ui::key_value("Invoice ID", &id.to_string());
            }
            let total = receipt
                .total_amount
                .unwrap_or_else(|| state.totals().grand_total);
            ui::key_value("Total", &format_money(total));

            if let Some(data) = verification_qr_data(receipt) {
                ui::header("Invoice Verification QR");
                ui::qr_code(&data)?;
            }
            Ok(())
        }
        Phase::Failed(failure) => {
            ui::error(&failure.to_string());
            ui::info("Your invoice number and data are unchanged; fix the issue and resubmit");
            Err(anyhow!("submission failed"))
        }
        Phase::Editing => match state.validation() {
            Some(errors) => {
                super::print_validation_errors(errors);
                bail!(errors.clone());
            }
            None => bail!("invoice was not submitted"),
        },
        Phase::Submitting => bail!("submission did not complete"),
    }
}

/// QR payload shown after a successful submission: the service-assigned id.
fn verification_qr_data(receipt: &SubmitReceipt) -> Option<String> {
    receipt.invoice_id.map(|id| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use einvoice_core::InvoiceId;

    #[test]
    fn verification_qr_encodes_returned_id() {
        let id: InvoiceId = "67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap();
        let receipt = SubmitReceipt {
            message: Some("Invoice processed successfully".to_string()),
            invoice_id: Some(id),
            total_amount: None,
        };

        let data = verification_qr_data(&receipt).unwrap();
        assert_eq!(data, "67e55044-10b1-426f-9247-bb680e5fe0c8");
        assert!(ui::qr_string(&data).is_ok());
    }

    #[test]
    fn no_qr_without_an_id() {
        assert_eq!(verification_qr_data(&SubmitReceipt::default()), None);
    }
}
