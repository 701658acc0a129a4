//! Line items and the per-item totals calculator.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use einvoice_core::{parse_decimal_or_zero, parse_quantity_or_zero, round_money};

/// Default tax rate (percent) for a freshly added line.
pub const DEFAULT_TAX_PERCENTAGE: &str = "15";

/// Upper bound on quantity accepted by form validation.
pub const MAX_QUANTITY: u32 = 10_000;

/// Raw, user-edited fields of one line as they come from the form.
///
/// Numeric fields stay textual so that blank or half-typed input survives until
/// the calculator, which treats anything unparseable as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub unit_price: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub quantity: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub tax_percentage: String,
}

impl LineItemInput {
    pub fn new(
        description: impl Into<String>,
        unit_price: impl Into<String>,
        quantity: impl Into<String>,
        tax_percentage: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            unit_price: unit_price.into(),
            quantity: quantity.into(),
            tax_percentage: tax_percentage.into(),
        }
    }

    /// Blank line as offered by the form: price 0, quantity 1, default tax.
    pub fn blank() -> Self {
        Self::new("", "0", "1", DEFAULT_TAX_PERCENTAGE)
    }

    pub fn totals(&self) -> ItemTotals {
        calculate_item_totals(self)
    }
}

impl Default for LineItemInput {
    fn default() -> Self {
        Self::blank()
    }
}

/// Accept strings, numbers and `null` for a form field; anything else is blank.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(_))
        | Some(serde_json::Value::Array(_))
        | Some(serde_json::Value::Object(_))
        | Some(serde_json::Value::Null)
        | None => String::new(),
    })
}

/// Derived monetary fields of one line. Never user-edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemTotals {
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_without_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_with_tax: Decimal,
}

impl ItemTotals {
    /// Compute totals from already-parsed values.
    ///
    /// `tax_amount` is taken from the unrounded net amount; `total_with_tax` is
    /// the sum of the two rounded parts. Arithmetic overflow degrades to zero.
    pub fn compute(unit_price: Decimal, quantity: u32, tax_percentage: Decimal) -> Self {
        let net = unit_price
            .checked_mul(Decimal::from(quantity))
            .unwrap_or_else(|| overflow("net amount"));
        let tax = net
            .checked_mul(tax_percentage)
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
            .unwrap_or_else(|| overflow("tax amount"));

        let total_without_tax = round_money(net);
        let tax_amount = round_money(tax);
        let total_with_tax = total_without_tax
            .checked_add(tax_amount)
            .map(round_money)
            .unwrap_or_else(|| overflow("gross amount"));

        Self {
            tax_amount,
            total_without_tax,
            total_with_tax,
        }
    }
}

pub(crate) fn overflow(what: &str) -> Decimal {
    tracing::warn!(field = what, "invoice arithmetic overflowed; treating as zero");
    Decimal::ZERO
}

/// Compute `{taxAmount, totalWithoutTax, totalWithTax}` for a raw line.
///
/// Never fails: missing or non-numeric unit price, quantity or tax percentage
/// count as zero.
pub fn calculate_item_totals(input: &LineItemInput) -> ItemTotals {
    ItemTotals::compute(
        parse_decimal_or_zero(&input.unit_price),
        parse_quantity_or_zero(&input.quantity),
        parse_decimal_or_zero(&input.tax_percentage),
    )
}

/// A calculated line, ready for the document and the submission body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// 1-based position on the invoice.
    pub id: u32,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_percentage: Decimal,
    #[serde(flatten)]
    pub totals: ItemTotals,
}

impl LineItem {
    pub fn from_input(id: u32, input: &LineItemInput) -> Self {
        let unit_price = parse_decimal_or_zero(&input.unit_price);
        let quantity = parse_quantity_or_zero(&input.quantity);
        let tax_percentage = parse_decimal_or_zero(&input.tax_percentage);

        Self {
            id,
            description: input.description.clone(),
            unit_price,
            quantity,
            tax_percentage,
            totals: ItemTotals::compute(unit_price, quantity, tax_percentage),
        }
    }
}
