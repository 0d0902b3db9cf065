use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::path::Path;

use crate::api::CompanyId;
use crate::models::CallRecord;

/// Accept either a string or an integer for the company id.
fn deserialize_company_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        String(String),
        Int(i64),
    }

    match StringOrInt::deserialize(deserializer)? {
        StringOrInt::String(s) => s.trim().parse::<i64>().map_err(D::Error::custom),
        StringOrInt::Int(i) => Ok(i),
    }
}

/// One row as exported by the warehouse query.
#[derive(Debug, Deserialize)]
struct RawCallRow {
    #[serde(deserialize_with = "deserialize_company_id")]
    company_id: i64,
    company_name: String,
    #[serde(alias = "location_state", default)]
    state: String,
    year: i32,
    month: u32,
    calls: u64,
    #[serde(alias = "distinct_campaigns", default)]
    campaigns: u64,
    #[serde(alias = "distinct_customers", default)]
    customers: u64,
}

/// Parse a calls JSON file into records.
pub fn parse_calls_json(json_path: &Path) -> Result<Vec<CallRecord>> {
    let json_content = std::fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read JSON file: {}", json_path.display()))?;

    parse_calls_json_str(&json_content)
}

/// Parse calls JSON from a string.
pub fn parse_calls_json_str(json_str: &str) -> Result<Vec<CallRecord>> {
    let json_value: serde_json::Value = serde_json::from_str(json_str).with_context(|| {
        let preview: String = json_str.chars().take(200).collect();
        format!("Invalid JSON syntax. First 200 chars: {}", preview)
    })?;

    parse_calls_value(json_value)
}

/// Parse an already-decoded JSON value into records.
///
/// Errors name the offending row and field, e.g. `calls[3].month`.
pub fn parse_calls_value(json_value: serde_json::Value) -> Result<Vec<CallRecord>> {
    let rows = match json_value {
        serde_json::Value::Array(rows) => rows,
        serde_json::Value::Object(mut map) => match map.remove("calls") {
            Some(serde_json::Value::Array(rows)) => rows,
            _ => anyhow::bail!(
                "JSON object must contain a 'calls' array. Found keys: {:?}",
                map.keys().collect::<Vec<_>>()
            ),
        },
        other => anyhow::bail!("Expected an array of call rows, found {}", json_kind(&other)),
    };

    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| {
            let raw: RawCallRow = serde_path_to_error::deserialize(row)
                .map_err(|e| anyhow::anyhow!("calls[{}].{}: {}", idx, e.path(), e.inner()))?;
            convert_raw_to_record(raw, idx)
        })
        .collect()
}

fn convert_raw_to_record(raw: RawCallRow, idx: usize) -> Result<CallRecord> {
    if !(1..=12).contains(&raw.month) {
        anyhow::bail!("calls[{}].month: expected 1-12, found {}", idx, raw.month);
    }

    Ok(CallRecord {
        company_id: CompanyId::new(raw.company_id),
        company_name: raw.company_name,
        state: raw.state,
        year: raw.year,
        month: raw.month,
        calls: raw.calls,
        campaigns: raw.campaigns,
        customers: raw.customers,
    })
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
