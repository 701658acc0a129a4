//! List command - show invoices stored by the service

use anyhow::Result;
use colored::Colorize;
use einvoice_client::{ClientConfig, InvoiceService, InvoiceServiceClient};

use crate::ui;

pub async fn run(config: ClientConfig) -> Result<()> {
    ui::header("Invoices");

    let client = InvoiceServiceClient::new(config)?;
    let invoices = client.list_invoices().await?;

    if invoices.is_empty() {
        ui::info("No invoices found");
        ui::info("Run 'einvoice submit <file>' to create one");
        return Ok(());
    }

    for invoice in &invoices {
        let status = if invoice.invoice_status.is_failure() {
            invoice.invoice_status.as_str().red().to_string()
        } else {
            invoice.invoice_status.as_str().green().to_string()
        };
        println!(
            "{}  {:<10}  {:>12}  {}  {}",
            invoice.invoice_id,
            invoice.created_on(),
            invoice.total_display(),
            status,
            invoice.buyer_info.name
        );
    }

    ui::separator();
    ui::info(&format!("{} invoice(s)", invoices.len()));
    Ok(())
}
