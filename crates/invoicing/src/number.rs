//! Client-side invoice numbering (`INV-YYMM-NNNN`).

use core::str::FromStr;
use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use einvoice_core::DomainError;

static INVOICE_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^INV-[0-9]{4}-[0-9]{4}$").expect("invoice number pattern is valid"));

/// Invoice number shown on the form and the document.
///
/// Two-digit year, two-digit month, then a random four-digit serial in
/// `1000..=9999`. Numbers are not guaranteed unique; the remote service keys
/// records by its own id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    /// Generate a number for today using the thread-local RNG.
    pub fn generate() -> Self {
        Self::generate_for(Local::now().date_naive(), &mut rand::thread_rng())
    }

    /// Deterministic variant: caller supplies the date and the randomness.
    pub fn generate_for<R: Rng>(date: NaiveDate, rng: &mut R) -> Self {
        let serial: u16 = rng.gen_range(1000..=9999);
        Self(format!("INV-{}-{serial}", date.format("%y%m")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for InvoiceNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if INVOICE_NUMBER_PATTERN.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(DomainError::invalid_id(format!(
                "InvoiceNumber: expected INV-YYMM-NNNN, got {s:?}"
            )))
        }
    }
}

impl TryFrom<String> for InvoiceNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InvoiceNumber> for String {
    fn from(value: InvoiceNumber) -> Self {
        value.0
    }
}

impl core::fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generated_number_has_year_month_and_serial() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let number = InvoiceNumber::generate_for(date, &mut rng);

        let s = number.as_str();
        assert!(s.starts_with("INV-2403-"), "{s}");
        let serial: u16 = s["INV-2403-".len()..].parse().unwrap();
        assert!((1000..=9999).contains(&serial));
        assert_eq!(s.parse::<InvoiceNumber>().unwrap(), number);
    }

    #[test]
    fn generation_is_repeatable_with_same_seed() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let a = InvoiceNumber::generate_for(date, &mut StdRng::seed_from_u64(42));
        let b = InvoiceNumber::generate_for(date, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_malformed_numbers() {
        assert!("INV-24-1234".parse::<InvoiceNumber>().is_err());
        assert!("inv-2403-1234".parse::<InvoiceNumber>().is_err());
        assert!(serde_json::from_str::<InvoiceNumber>("\"INV-2403-12\"").is_err());
        assert!("INV-٢٤٠٣-١٢٣٤".parse::<InvoiceNumber>().is_err());
    }
}
