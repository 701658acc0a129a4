//! New command - print a blank draft to fill in

use std::path::Path;

use anyhow::{Context, Result};
use einvoice_invoicing::{InvoiceDraft, InvoiceNumber, InvoiceType};

use crate::ui;

pub fn run(invoice_type: InvoiceType, seller_id: Option<String>, output: Option<&Path>) -> Result<()> {
    let mut draft = InvoiceDraft::new(InvoiceNumber::generate());
    draft.invoice_type = invoice_type;
    if let Some(seller_id) = seller_id {
        draft.seller_id = seller_id;
    }

    let json = serde_json::to_string_pretty(&draft)?;
    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            ui::success(&format!(
                "Draft {} written to {}",
                draft.invoice_number,
                path.display()
            ));
        }
        None => println!("{json}"),
    }
    Ok(())
}
