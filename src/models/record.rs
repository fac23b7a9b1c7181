use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// One poll's worth of scraped diagnostics.
///
/// Only fields that were found in the page are stored; lookups for anything
/// else yield an empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticRecord {
    captured_at: DateTime<Utc>,
    values: HashMap<String, String>,
}

impl DiagnosticRecord {
    pub fn new(captured_at: DateTime<Utc>, values: HashMap<String, String>) -> Self {
        Self {
            captured_at,
            values,
        }
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Capture time as fractional Unix seconds.
    pub fn unix_seconds(&self) -> f64 {
        self.captured_at.timestamp() as f64
            + f64::from(self.captured_at.timestamp_subsec_micros()) / 1_000_000.0
    }

    /// Render as `<unix seconds>,"v1","v2",...` in `fields` order.
    pub fn to_row(&self, fields: &[String]) -> String {
        let mut row = self.unix_seconds().to_string();
        for field in fields {
            row.push_str(",\"");
            row.push_str(&self.get(field).replace('"', "\"\""));
            row.push('"');
        }
        row
    }
}

pub fn header_row(fields: &[String]) -> String {
    format!("time,{}", fields.join(","))
}
