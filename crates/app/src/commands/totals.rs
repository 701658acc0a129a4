//! Totals command - show line and invoice totals for a draft

use std::path::Path;

use anyhow::Result;
use einvoice_core::format_money;
use einvoice_invoicing::validate;

use crate::ui;

pub fn run(path: &Path) -> Result<()> {
    let draft = super::load_draft(path)?;

    ui::header(&format!(
        "{} {} ({})",
        draft.invoice_type.label(),
        draft.invoice_number,
        draft.invoice_type
    ));

    for (index, item) in draft.items.iter().enumerate() {
        let totals = item.totals();
        let name = if item.description.trim().is_empty() {
            format!("Item {}", index + 1)
        } else {
            item.description.clone()
        };
        println!("{name}");
        ui::key_value("Net", &format_money(totals.total_without_tax));
        ui::key_value("Tax", &format_money(totals.tax_amount));
        ui::key_value("Total", &format_money(totals.total_with_tax));
    }

    let totals = draft.totals();
    ui::separator();
    ui::key_value("Subtotal", &format_money(totals.subtotal));
    ui::key_value("Total Tax", &format_money(totals.total_tax));
    ui::key_value("Grand Total", &format_money(totals.grand_total));

    if let Err(errors) = validate(&draft) {
        println!();
        ui::warning("Draft is not ready for submission:");
        super::print_validation_errors(&errors);
    }
    Ok(())
}
