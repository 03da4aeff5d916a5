use std::collections::BTreeSet;

use colored::Colorize;
use mab_core::{is_canonical_mac, Extraction, MappingTable};
use serde::Serialize;

/// What a binding table contains, against the mapping that will be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionReport {
    pub records: usize,
    pub detected_mappings: MappingTable,
    pub vlans: Vec<VlanUsage>,
    pub unmapped_vlans: Vec<u32>,
    pub nonstandard_macs: Vec<String>,
    pub warnings: Vec<String>,
}

/// Record count and segment for one VLAN seen in bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VlanUsage {
    pub vlan: u32,
    pub records: usize,
    pub segment: Option<String>,
}

/// Build a detection report, judging coverage against `mapping`.
pub fn build_detection_report(extraction: &Extraction, mapping: &MappingTable) -> DetectionReport {
    let vlans = extraction
        .vlans()
        .into_iter()
        .map(|vlan| VlanUsage {
            vlan,
            records: extraction
                .records
                .iter()
                .filter(|record| record.vlan == vlan)
                .count(),
            segment: mapping.get(vlan).map(str::to_string),
        })
        .collect();

    let unmapped_vlans = extraction.unmapped_vlans(mapping);
    let nonstandard_macs = nonstandard_macs(extraction);
    let warnings = collect_warnings(&unmapped_vlans, &nonstandard_macs, mapping);

    DetectionReport {
        records: extraction.records.len(),
        detected_mappings: extraction.detected_mappings.clone(),
        vlans,
        unmapped_vlans,
        nonstandard_macs,
        warnings,
    }
}

/// Render a detection report for terminal output.
pub fn render_detection(report: &DetectionReport) -> String {
    let mut out = Vec::new();
    out.push(format!("records={}", report.records));
    out.push(String::new());
    out.push("detected_mappings".to_string());
    if report.detected_mappings.is_empty() {
        out.push("- none".to_string());
    }
    for (vlan, segment) in report.detected_mappings.iter() {
        out.push(format!("- {vlan} = {segment}"));
    }
    out.push(String::new());
    out.push("vlans".to_string());
    for usage in &report.vlans {
        match &usage.segment {
            Some(segment) => out.push(format!(
                "- {} records={} segment={segment}",
                usage.vlan, usage.records
            )),
            None => out.push(
                format!("- {} records={} segment=(unmapped)", usage.vlan, usage.records)
                    .yellow()
                    .to_string(),
            ),
        }
    }

    if !report.warnings.is_empty() {
        out.push(String::new());
        out.push(render_warnings(&report.warnings));
    }

    out.join("\n")
}

/// Data problems worth flagging before an import.
///
/// None of these stop a conversion: unmapped VLANs render with an empty
/// segment, odd MACs pass through cleaned, and commas inside segment names
/// are written unquoted.
fn collect_warnings(
    unmapped_vlans: &[u32],
    nonstandard_macs: &[String],
    mapping: &MappingTable,
) -> Vec<String> {
    let mut warnings = Vec::new();
    if !unmapped_vlans.is_empty() {
        let vlans: Vec<String> = unmapped_vlans.iter().map(u32::to_string).collect();
        warnings.push(format!(
            "no segment for VLAN(s) {}; rows will have an empty segment",
            vlans.join(", ")
        ));
    }
    for mac in nonstandard_macs {
        warnings.push(format!("'{mac}' is not a 12-digit hex MAC address"));
    }
    for (vlan, segment) in mapping.iter() {
        if segment.contains(',') {
            warnings.push(format!(
                "segment '{segment}' for VLAN {vlan} contains a comma and will shift CSV columns"
            ));
        }
    }
    warnings
}

/// Render warning lines for terminal output.
pub fn render_warnings(warnings: &[String]) -> String {
    warnings
        .iter()
        .map(|warning| format!("warning: {warning}").yellow().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn nonstandard_macs(extraction: &Extraction) -> Vec<String> {
    let mut seen = BTreeSet::new();
    extraction
        .records
        .iter()
        .filter(|record| !is_canonical_mac(&record.mac) && seen.insert(record.mac.as_str()))
        .map(|record| record.mac.clone())
        .collect()
}
