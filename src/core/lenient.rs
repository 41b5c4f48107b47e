//! Forgiving decoders for persisted record fields.
//!
//! Partitions written by older front ends keep numbers as text (`"12.5"`), leave
//! optional inputs as empty strings, and sometimes omit fields entirely. These
//! `deserialize_with` helpers accept all of that: numbers or numeric strings parse,
//! anything else becomes zero (or `None`).

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Decodes a decimal, treating missing or unparseable values as zero.
pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_decimal(&value).unwrap_or(Decimal::ZERO))
}

/// Decodes a non-negative integer count. Fractions are truncated; negative or
/// unparseable values become zero.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_decimal(&value)
        .and_then(|d| d.trunc().to_u32())
        .unwrap_or(0))
}

/// Decodes an optional integer such as a year.
pub fn optional_integer<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_decimal(&value).and_then(|d| d.trunc().to_i32()))
}

/// Decodes optional free text; blank strings count as absent.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Parses a JSON number or numeric string into a [`Decimal`].
#[must_use]
pub fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal_str(&n.to_string()),
        Value::String(s) => parse_decimal_str(s),
        _ => None,
    }
}

fn parse_decimal_str(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "decimal")]
        amount: Decimal,
        #[serde(default, deserialize_with = "count")]
        quantity: u32,
        #[serde(default, deserialize_with = "optional_integer")]
        year: Option<i32>,
        #[serde(default, deserialize_with = "optional_text")]
        notes: Option<String>,
    }

    fn probe(value: serde_json::Value) -> Probe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_numbers_stored_as_text() {
        let p = probe(json!({"amount": "-40.50", "quantity": "3", "year": "2023"}));
        assert_eq!(p.amount, dec!(-40.50));
        assert_eq!(p.quantity, 3);
        assert_eq!(p.year, Some(2023));
    }

    #[test]
    fn test_numbers_stored_as_numbers() {
        let p = probe(json!({"amount": 12.25, "quantity": 7, "year": 2021}));
        assert_eq!(p.amount, dec!(12.25));
        assert_eq!(p.quantity, 7);
        assert_eq!(p.year, Some(2021));
    }

    #[test]
    fn test_missing_fields_default() {
        let p = probe(json!({}));
        assert_eq!(p.amount, Decimal::ZERO);
        assert_eq!(p.quantity, 0);
        assert_eq!(p.year, None);
        assert_eq!(p.notes, None);
    }

    #[test]
    fn test_garbage_becomes_zero() {
        let p = probe(json!({"amount": "lots", "quantity": "", "year": null, "notes": "  "}));
        assert_eq!(p.amount, Decimal::ZERO);
        assert_eq!(p.quantity, 0);
        assert_eq!(p.year, None);
        assert_eq!(p.notes, None);
    }

    #[test]
    fn test_count_truncates_and_rejects_negative() {
        assert_eq!(probe(json!({"quantity": "3.9"})).quantity, 3);
        assert_eq!(probe(json!({"quantity": -2})).quantity, 0);
    }

    #[test]
    fn test_whitespace_around_numbers() {
        assert_eq!(probe(json!({"amount": " 100 "})).amount, dec!(100));
    }
}
