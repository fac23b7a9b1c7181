use chrono::Utc;
use reqwest::StatusCode;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::models::DiagnosticRecord;
use crate::services::extract::find_labeled_value;
use crate::services::{RouterError, RouterResult, RouterSession};

impl RouterSession {
    /// GET the diagnostics page and scrape `fields` out of it.
    ///
    /// Fields that are not present are left out of the record.
    pub async fn poll(&self, diag_url: &str, fields: &[String]) -> RouterResult<DiagnosticRecord> {
        let response = self
            .client
            .get(diag_url)
            .send()
            .await
            .map_err(|source| RouterError::Network {
                step: "diagnostics GET",
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Unexpected response from diagnostics GET: {}", status);
            return Err(RouterError::UnexpectedStatus {
                step: "diagnostics GET",
                status,
            });
        }

        let captured_at = Utc::now();
        let body = response.text().await.map_err(|source| RouterError::Network {
            step: "diagnostics GET",
            source,
        })?;

        let values = extract_fields(&body, fields);
        if values.len() < fields.len() {
            debug!(
                found = values.len(),
                expected = fields.len(),
                "Some diagnostic fields were not present"
            );
        }

        Ok(DiagnosticRecord::new(captured_at, values))
    }
}

pub fn extract_fields(body: &str, fields: &[String]) -> HashMap<String, String> {
    fields
        .iter()
        .filter_map(|field| {
            find_labeled_value(body, field).map(|value| (field.clone(), value.to_string()))
        })
        .collect()
}
