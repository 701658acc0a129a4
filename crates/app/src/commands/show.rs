//! Show command - display one invoice with a QR code of its id

use anyhow::{Context, Result};
use einvoice_client::{ClientConfig, InvoiceService, InvoiceServiceClient};
use einvoice_core::InvoiceId;

use crate::ui;

pub async fn run(config: ClientConfig, id: &str) -> Result<()> {
    let id: InvoiceId = id.parse().context("not a valid invoice id")?;
    let client = InvoiceServiceClient::new(config)?;
    let invoice = client.get_invoice(id).await?;

    ui::header("Invoice Details");
    ui::key_value("Invoice ID", &invoice.invoice_id.to_string());
    ui::key_value("Type", invoice.invoice_type.as_deref().unwrap_or("-"));
    ui::key_value("Status", invoice.invoice_status.as_str());
    ui::key_value("Date", &invoice.created_on());

    ui::header("Seller");
    let seller = invoice
        .seller_info
        .cr_id
        .as_deref()
        .unwrap_or(invoice.seller_cr.as_str());
    ui::key_value("Tax ID", seller);

    ui::header("Buyer");
    ui::key_value("Name", &invoice.buyer_info.name);
    ui::key_value("Address", &invoice.buyer_info.address);
    let buyer_id = if invoice.buyer_info.cr_id.is_empty() {
        invoice.buyer_id.as_str()
    } else {
        invoice.buyer_info.cr_id.as_str()
    };
    ui::key_value("Tax ID", buyer_id);

    ui::header("Totals");
    ui::key_value("Subtotal", &invoice.subtotal_display());
    ui::key_value("Tax", &invoice.tax_display());
    ui::key_value("Total", &invoice.total_display());

    ui::qr_code(&invoice.invoice_id.to_string())?;
    Ok(())
}
