//! JSON request codec for hosting the converter behind an HTTP endpoint.
//!
//! Payloads carry the binding table and the CSV as base64 text:
//!
//! ```json
//! {"fileContent": "<base64>", "vlanMappings": {"1": "Wired"}, "includeIpColumns": true}
//! ```
//!
//! and a successful response echoes the detected declarations so the caller
//! can show them for review:
//!
//! ```json
//! {"csvContent": "<base64>", "detectedMappings": {"1": "Wired"}}
//! ```

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mab_core::{extract_bytes, render, require_records, ColumnProfile, ExtractError, MappingTable};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::mappings::resolve_mapping;

/// One conversion request. Missing and `null` fields take their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vlan_mappings: BTreeMap<String, String>,
    #[serde(
        default = "default_include_ip_columns",
        deserialize_with = "null_as_include_ip_columns"
    )]
    pub include_ip_columns: bool,
}

impl Default for ConvertRequest {
    fn default() -> Self {
        Self {
            file_content: String::new(),
            vlan_mappings: BTreeMap::new(),
            include_ip_columns: default_include_ip_columns(),
        }
    }
}

fn default_include_ip_columns() -> bool {
    true
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_include_ip_columns<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_else(default_include_ip_columns))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub csv_content: String,
    pub detected_mappings: MappingTable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors that reject a single request.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid request body: {0}")]
    Body(#[from] serde_json::Error),
    #[error("No file content provided")]
    MissingContent,
    #[error("Invalid base64 encoding: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl RequestError {
    /// HTTP status a host should answer with.
    pub fn status(&self) -> u16 {
        match self {
            RequestError::Body(_) => 500,
            RequestError::MissingContent
            | RequestError::Base64(_)
            | RequestError::Extract(_) => 400,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

/// Parse a JSON request body and convert it.
pub fn handle_body(body: &str) -> Result<ConvertResponse, RequestError> {
    let request: ConvertRequest = serde_json::from_str(body)?;
    handle_request(&request)
}

/// Convert one decoded request.
pub fn handle_request(request: &ConvertRequest) -> Result<ConvertResponse, RequestError> {
    // Line-wrapped payloads (e.g. 76-column `base64` output) are accepted.
    let encoded: String = request
        .file_content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if encoded.is_empty() {
        return Err(RequestError::MissingContent);
    }

    let bytes = STANDARD.decode(&encoded)?;
    let extraction = require_records(extract_bytes(&bytes)?)?;

    // Any supplied entry, even one that names no usable VLAN, disables the
    // fallback to detected declarations.
    let resolved = if request.vlan_mappings.is_empty() {
        resolve_mapping(&MappingTable::new(), &extraction.detected_mappings)
    } else {
        supplied_mapping(&request.vlan_mappings)
    };
    let profile = ColumnProfile::from(request.include_ip_columns);
    let csv = render(&extraction.records, &resolved, profile);
    debug!(
        records = extraction.records.len(),
        columns = profile.column_count(),
        "request converted"
    );

    Ok(ConvertResponse {
        csv_content: STANDARD.encode(csv),
        detected_mappings: extraction.detected_mappings,
    })
}

/// Keep entries whose key is a VLAN id; others can never match a record.
fn supplied_mapping(raw: &BTreeMap<String, String>) -> MappingTable {
    raw.iter()
        .filter_map(|(key, segment)| match key.trim().parse::<u32>() {
            Ok(vlan) => Some((vlan, segment.clone())),
            Err(_) => {
                warn!(key = %key, "ignoring vlanMappings entry with non-numeric VLAN id");
                None
            }
        })
        .collect()
}
