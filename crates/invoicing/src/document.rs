//! Textual invoice document (XML) rendered at submission time.
//!
//! Tag names and order are the interop contract with the invoice service:
//! header, seller, buyer, one `Item` block per line, then the three totals.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use einvoice_core::format_money;

use crate::invoice::ProcessedInvoice;
use crate::line_item::LineItem;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const INDENT: &str = "    ";

/// Render the document dated today (UTC calendar date).
pub fn render_document_today(invoice: &ProcessedInvoice) -> String {
    render_document(invoice, Utc::now().date_naive())
}

/// Render the document for a given issue date (ISO 8601, date only).
pub fn render_document(invoice: &ProcessedInvoice, issued_on: NaiveDate) -> String {
    let mut doc = Document::new();

    doc.open("Invoice");
    doc.leaf("InvoiceNumber", invoice.invoice_number.as_str());
    doc.leaf("InvoiceDate", &issued_on.format("%Y-%m-%d").to_string());
    doc.leaf("InvoiceType", invoice.invoice_type.as_str());

    doc.open("Seller");
    doc.leaf("TaxId", &invoice.seller_id);
    doc.close("Seller");

    doc.open("Buyer");
    doc.leaf("Name", &invoice.buyer.name);
    doc.leaf("Address", &invoice.buyer.address);
    doc.leaf("TaxId", &invoice.buyer.cr_id);
    doc.close("Buyer");

    doc.open("Items");
    for item in &invoice.items {
        item_block(&mut doc, item);
    }
    doc.close("Items");

    doc.leaf("Subtotal", &format_money(invoice.totals.subtotal));
    doc.leaf("TotalTax", &format_money(invoice.totals.total_tax));
    doc.leaf("GrandTotal", &format_money(invoice.totals.grand_total));
    doc.close("Invoice");

    doc.finish()
}

fn item_block(doc: &mut Document, item: &LineItem) {
    doc.open("Item");
    doc.leaf("Description", &item.description);
    doc.leaf("UnitPrice", &plain(item.unit_price));
    doc.leaf("Quantity", &item.quantity.to_string());
    doc.leaf("TaxPercentage", &plain(item.tax_percentage));
    doc.leaf("TaxAmount", &format_money(item.totals.tax_amount));
    doc.leaf("TotalWithoutTax", &format_money(item.totals.total_without_tax));
    doc.leaf("TotalWithTax", &format_money(item.totals.total_with_tax));
    doc.close("Item");
}

/// Entered values print without trailing zeros (`15`, `0.01`).
fn plain(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Escape markup-significant characters in text content.
///
/// Control characters that XML 1.0 does not allow (everything below U+0020
/// except tab, line feed and carriage return, plus U+FFFE and U+FFFF) are dropped.
pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if c < '\u{20}' || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            _ => out.push(ch),
        }
    }
    out
}

/// Minimal indented element writer.
struct Document {
    out: String,
    depth: usize,
}

impl Document {
    fn new() -> Self {
        let mut out = String::with_capacity(1024);
        out.push_str(XML_DECLARATION);
        out.push('\n');
        Self { out, depth: 0 }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    fn open(&mut self, tag: &str) {
        self.indent();
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push_str(">\n");
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    fn leaf(&mut self, tag: &str, text: &str) {
        self.indent();
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push('>');
        self.out.push_str(&escape_text(text));
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    fn finish(self) -> String {
        self.out
    }
}
