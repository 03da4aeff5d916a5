use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use mab_core::{ColumnProfile, MappingTable};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use tracing::{debug, info};

/// Segment mapping and output options read from a TOML file.
///
/// ```toml
/// columns = "base"
///
/// [segments]
/// 1 = "Wired Production"
/// 5 = "Guest"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertConfig {
    pub columns: Option<ColumnProfile>,
    pub segments: MappingTable,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    columns: Option<ColumnProfile>,
    #[serde(default)]
    segments: BTreeMap<String, String>,
}

/// Errors returned when loading a mapping config file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid VLAN id '{key}' in [segments] of {path}")]
    InvalidVlan { path: String, key: String },
}

/// Load a mapping config from a TOML file.
pub fn load_config(path: &Path) -> Result<ConvertConfig, ConfigLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_config(&raw, path.display().to_string())
}

fn parse_config(raw: &str, path: String) -> Result<ConvertConfig, ConfigLoadError> {
    let parsed: ConfigFile = toml::from_str(raw).map_err(|source| ConfigLoadError::Parse {
        path: path.clone(),
        source,
    })?;

    let mut segments = MappingTable::new();
    for (key, segment) in parsed.segments {
        let vlan = key
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigLoadError::InvalidVlan {
                path: path.clone(),
                key: key.clone(),
            })?;
        segments.insert(vlan, segment);
    }
    debug!(%path, segments = segments.len(), "loaded mapping config");

    Ok(ConvertConfig {
        columns: parsed.columns,
        segments,
    })
}

/// Render an editable config seeded with `mapping`.
///
/// Each VLAN in `unmapped` gets an empty segment entry so the reviewer can
/// fill it in. Entries are written in ascending VLAN order.
pub fn render_config(
    columns: Option<ColumnProfile>,
    mapping: &MappingTable,
    unmapped: &[u32],
) -> Result<String, toml::ser::Error> {
    let mut segments: BTreeMap<u32, &str> = mapping.iter().collect();
    for vlan in unmapped {
        segments.entry(*vlan).or_insert("");
    }

    toml::to_string(&RenderedConfig {
        columns,
        segments: OrderedSegments(segments),
    })
}

#[derive(Serialize)]
struct RenderedConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    columns: Option<ColumnProfile>,
    segments: OrderedSegments<'a>,
}

/// Serializes with string keys in numeric VLAN order.
struct OrderedSegments<'a>(BTreeMap<u32, &'a str>);

impl Serialize for OrderedSegments<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (vlan, segment) in &self.0 {
            map.serialize_entry(&vlan.to_string(), segment)?;
        }
        map.end()
    }
}

/// Parse a `VLAN=SEGMENT` override such as `5=Guest`.
pub fn parse_override(raw: &str) -> Result<(u32, String), String> {
    let (vlan, segment) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected VLAN=SEGMENT, got '{raw}'"))?;
    let vlan = vlan
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid VLAN id '{}'", vlan.trim()))?;
    Ok((vlan, segment.trim().to_string()))
}

/// Pick the mapping used for rendering.
///
/// A non-empty caller mapping is used as-is; otherwise the detected
/// declarations apply. The two are never merged.
pub fn resolve_mapping(supplied: &MappingTable, detected: &MappingTable) -> MappingTable {
    if supplied.is_empty() {
        info!(
            segments = detected.len(),
            "using mapping declarations found in input"
        );
        detected.clone()
    } else {
        info!(segments = supplied.len(), "using supplied mapping");
        supplied.clone()
    }
}
