//! Serde helpers for values the backend serializes inconsistently.
//!
//! Decimal columns (`amount`) come back either as JSON numbers or as strings
//! such as `"12.50"`, and user ids are strings in auth payloads but integers
//! elsewhere. These helpers accept both spellings.
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Text(String),
}

pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let (amount, raw) = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(v) => (Some(v as f64), v.to_string()),
        NumberOrString::Float(v) => (Some(v), v.to_string()),
        NumberOrString::Text(s) => (s.trim().parse::<f64>().ok(), s),
    };
    // NaN or infinity would poison every total it is summed into.
    amount
        .filter(|v| v.is_finite())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid amount: {:?}", raw)))
}

pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<NumberOrString> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(NumberOrString::Int(v)) => Ok(Some(v)),
        Some(NumberOrString::Float(v)) => Ok(Some(v as i64)),
        Some(NumberOrString::Text(s)) if s.is_empty() => Ok(None),
        Some(NumberOrString::Text(s)) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
    }
}

pub fn deserialize_id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(v) => Ok(v.to_string()),
        NumberOrString::Float(v) => Ok(v.to_string()),
        NumberOrString::Text(s) => Ok(s),
    }
}
