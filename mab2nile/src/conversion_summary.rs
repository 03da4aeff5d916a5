use mab_core::{ColumnProfile, Extraction, MappingTable};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    pub rows: usize,
    pub vlans: usize,
    pub mapped_vlans: usize,
    pub unmapped_vlans: usize,
    pub columns: usize,
}

pub fn summarize(
    extraction: &Extraction,
    mapping: &MappingTable,
    profile: ColumnProfile,
) -> ConversionSummary {
    let vlans = extraction.vlans().len();
    let unmapped_vlans = extraction.unmapped_vlans(mapping).len();
    ConversionSummary {
        rows: extraction.records.len(),
        vlans,
        mapped_vlans: vlans - unmapped_vlans,
        unmapped_vlans,
        columns: profile.column_count(),
    }
}

pub fn render(summary: ConversionSummary) -> String {
    format!(
        "convert_summary rows={} vlans={} mapped_vlans={} unmapped_vlans={} columns={}",
        summary.rows, summary.vlans, summary.mapped_vlans, summary.unmapped_vlans, summary.columns
    )
}

#[cfg(test)]
mod tests {
    use super::{render, summarize};
    use mab_core::{extract, ColumnProfile};

    #[test]
    fn counts_rows_and_vlan_coverage() {
        let extraction = extract(
            "1 = 'Wired'\n\
             1 001e.0b41.7afd DYNAMIC Gi1/0/15\n\
             5 0050.56a3.1b2c DYNAMIC Gi1/0/3\n\
             5 0050.56a3.1b2d DYNAMIC Gi1/0/4\n",
        );
        let summary = summarize(&extraction, &extraction.detected_mappings, ColumnProfile::Base);

        assert_eq!(summary.rows, 3);
        assert_eq!(summary.vlans, 2);
        assert_eq!(summary.mapped_vlans, 1);
        assert_eq!(summary.unmapped_vlans, 1);
        assert_eq!(
            render(summary),
            "convert_summary rows=3 vlans=2 mapped_vlans=1 unmapped_vlans=1 columns=7"
        );
    }
}
