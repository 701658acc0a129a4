//! CLI subcommands.

pub mod list;
pub mod new;
pub mod render;
pub mod show;
pub mod submit;
pub mod totals;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use einvoice_invoicing::{InvoiceDraft, ValidationErrors};

use crate::ui;

/// Read a draft from a JSON file, or from stdin when `path` is `-`.
pub fn load_draft(path: &Path) -> Result<InvoiceDraft> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read draft from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read draft {}", path.display()))?
    };
    parse_draft(&raw).with_context(|| format!("invalid draft {}", path.display()))
}

pub fn parse_draft(raw: &str) -> Result<InvoiceDraft> {
    Ok(serde_json::from_str(raw)?)
}

pub fn print_validation_errors(errors: &ValidationErrors) {
    for e in errors.errors() {
        ui::warning(&format!("{}: {}", e.field, e.message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_draft_leaves_missing_fields_blank() {
        let draft = parse_draft(
            r#"{
                "invoiceNumber": "INV-2403-4321",
                "sellerId": "1-234-567890",
                "items": [{"description": "Widget", "unitPrice": 100, "quantity": "2"}]
            }"#,
        )
        .unwrap();

        assert_eq!(draft.invoice_number.as_str(), "INV-2403-4321");
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].unit_price, "100");
        assert_eq!(draft.items[0].tax_percentage, "");
        assert!(draft.buyer.name.is_empty());
    }

    #[test]
    fn malformed_invoice_number_is_rejected() {
        assert!(parse_draft(r#"{"invoiceNumber": "42"}"#).is_err());
    }
}
