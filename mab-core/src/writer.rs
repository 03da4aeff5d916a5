use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::mac::normalize_mac;
use crate::table::{BindingRecord, MappingTable};

const BASE_HEADER: [&str; 7] = [
    "MAC Address (Required)",
    "Segment (Required for allow state)",
    "Lock to Port (Optional)",
    "Site (Optional)",
    "Building (Optional)",
    "Floor (Optional)",
    "Allow or Deny (Required)",
];

const IP_HEADER: [&str; 4] = [
    "Description (Optional)",
    "Static IP (Optional)",
    "IP Address (Optional)",
    "Passive IP (Optional)",
];

/// Column set of the rendered CSV.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnProfile {
    /// The seven required/location columns.
    Base,
    /// Base columns plus description and IP columns.
    #[default]
    Full,
}

impl ColumnProfile {
    pub fn includes_ip_columns(self) -> bool {
        self == ColumnProfile::Full
    }

    pub fn column_count(self) -> usize {
        header(self).len()
    }
}

impl From<bool> for ColumnProfile {
    fn from(include_ip_columns: bool) -> Self {
        if include_ip_columns {
            ColumnProfile::Full
        } else {
            ColumnProfile::Base
        }
    }
}

/// Header labels for `profile`.
pub fn header(profile: ColumnProfile) -> Vec<&'static str> {
    let mut labels = BASE_HEADER.to_vec();
    if profile.includes_ip_columns() {
        labels.extend(IP_HEADER);
    }
    labels
}

/// Render records as Nile import CSV.
///
/// Rows follow record order. VLANs missing from `mapping` get an empty
/// segment. Fields are joined with commas and never quoted; rows are joined
/// with `\n` and the text has no trailing newline.
pub fn render(records: &[BindingRecord], mapping: &MappingTable, profile: ColumnProfile) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(header(profile).join(","));

    for record in records {
        lines.push(render_row(record, mapping, profile));
    }

    lines.join("\n")
}

/// [`render`] with the column profile chosen by a flag.
pub fn render_with_ip_columns(
    records: &[BindingRecord],
    mapping: &MappingTable,
    include_ip_columns: bool,
) -> String {
    render(records, mapping, ColumnProfile::from(include_ip_columns))
}

/// Render CSV and write it to `path` with a trailing newline.
pub fn write_file(
    records: &[BindingRecord],
    mapping: &MappingTable,
    profile: ColumnProfile,
    path: &Path,
) -> std::io::Result<()> {
    let mut csv = render(records, mapping, profile);
    csv.push('\n');
    fs::write(path, csv)
}

fn render_row(record: &BindingRecord, mapping: &MappingTable, profile: ColumnProfile) -> String {
    let mac = normalize_mac(&record.mac);
    let segment = mapping.get(record.vlan).unwrap_or_default();

    // MAC, segment, lock to port, site, building, floor, allow/deny
    let mut fields = vec![mac.as_str(), segment, "", "", "", "", "Allow"];
    if profile.includes_ip_columns() {
        // description, static IP, IP address, passive IP
        fields.extend(["", "No", "", "No"]);
    }
    fields.join(",")
}
