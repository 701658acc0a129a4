//! `einvoice-core`: domain building blocks shared by the invoicing crates.
//!
//! This crate contains **pure domain** primitives (no IO, no HTTP).

pub mod error;
pub mod id;
pub mod money;
pub mod reducer;
pub mod tax_id;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::InvoiceId;
pub use money::{
    MONEY_DECIMALS, format_money, parse_decimal_or_zero, parse_quantity_or_zero, round_money,
};
pub use reducer::Reducer;
pub use tax_id::TaxId;
pub use value_object::ValueObject;
