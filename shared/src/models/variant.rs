//! Variant selection snapshot
//!
//! A customer's choice among a product's configured variant types
//! (size, temperature, ...). Stored as JSON on cart lines, order items and
//! reservations; never a live reference into the catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One chosen option for a variant type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantOption {
    /// Option display name at the time of selection (e.g. "Large")
    pub option_name: String,
    /// Signed price delta applied per unit.
    ///
    /// Taken as supplied by the catalog's variant options and not checked
    /// against them here; pricing only bounds its size and keeps the adjusted
    /// unit price non-negative.
    #[serde(default)]
    pub price_modifier: f64,
}

/// Variant-type id → chosen option
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantSelections(pub BTreeMap<String, VariantOption>);

impl VariantSelections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and fixtures
    pub fn with(
        mut self,
        variant_type: impl Into<String>,
        option_name: impl Into<String>,
        price_modifier: f64,
    ) -> Self {
        self.0.insert(
            variant_type.into(),
            VariantOption {
                option_name: option_name.into(),
                price_modifier,
            },
        );
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &VariantOption)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_plain_map() {
        let sel = VariantSelections::new()
            .with("size", "Large", 0.5)
            .with("temperature", "Iced", 0.0);
        let json = serde_json::to_string(&sel).unwrap();
        assert_eq!(
            json,
            r#"{"size":{"option_name":"Large","price_modifier":0.5},"temperature":{"option_name":"Iced","price_modifier":0.0}}"#
        );
    }

    #[test]
    fn test_missing_modifier_defaults_to_zero() {
        let sel: VariantSelections =
            serde_json::from_str(r#"{"milk":{"option_name":"Oat"}}"#).unwrap();
        assert_eq!(sel.len(), 1);
        assert_eq!(sel.0["milk"].price_modifier, 0.0);
    }
}
