//! Fiscal identifier (CR) of a seller or buyer.

use core::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// Human-readable shape of a tax identifier, shown next to validation errors.
pub const TAX_ID_FORMAT_HINT: &str = "Format: 1-234-567890";

static TAX_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]-[0-9]{3}-[0-9]{6}$").expect("tax id pattern is valid"));

/// Tax identifier in the fixed pattern `D-DDD-DDDDDD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaxId(String);

impl TaxId {
    /// Returns `true` when `raw` matches the tax id pattern exactly (no trimming).
    pub fn is_valid(raw: &str) -> bool {
        TAX_ID_PATTERN.is_match(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for TaxId {}

impl FromStr for TaxId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(DomainError::validation(format!(
                "invalid tax id {s:?} ({TAX_ID_FORMAT_HINT})"
            )))
        }
    }
}

impl TryFrom<String> for TaxId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaxId> for String {
    fn from(value: TaxId) -> Self {
        value.0
    }
}

impl core::fmt::Display for TaxId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_canonical_shape() {
        let id: TaxId = "1-234-567890".parse().unwrap();
        assert_eq!(id.as_str(), "1-234-567890");
    }

    #[test]
    fn rejects_wrong_shapes() {
        for raw in ["", "1234567890", "12-234-567890", "1-234-56789", "1-234-5678901", "a-234-567890", " 1-234-567890"] {
            assert!(raw.parse::<TaxId>().is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn only_ascii_digits_count() {
        assert!(!TaxId::is_valid("١-٢٣٤-٥٦٧٨٩٠"));
        assert!(!TaxId::is_valid("１-２３４-５６７８９０"));
        assert!(serde_json::from_str::<TaxId>("\"١-٢٣٤-٥٦٧٨٩٠\"").is_err());
    }

    #[test]
    fn serde_validates_on_the_way_in() {
        let ok: TaxId = serde_json::from_str("\"3-101-123456\"").unwrap();
        assert_eq!(ok.to_string(), "3-101-123456");
        assert!(serde_json::from_str::<TaxId>("\"3101123456\"").is_err());
    }
}
