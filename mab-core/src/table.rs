use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// One MAC address learned on a switch port, as listed in a binding table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingRecord {
    /// VLAN the address was learned on.
    pub vlan: u32,
    /// MAC address exactly as it appeared in the input.
    pub mac: String,
    /// Port label, for example `Gi1/0/15`.
    pub port: String,
}

impl BindingRecord {
    pub fn new(vlan: u32, mac: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            vlan,
            mac: mac.into(),
            port: port.into(),
        }
    }
}

/// VLAN id to segment name lookup.
///
/// Iterates in ascending VLAN order. Serializes as an object keyed by the
/// VLAN id's decimal string, e.g. `{"1": "Wired Production"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingTable(BTreeMap<u32, String>);

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segment name for `vlan`, if one is mapped.
    pub fn get(&self, vlan: u32) -> Option<&str> {
        self.0.get(&vlan).map(String::as_str)
    }

    /// Map `vlan` to `segment`, returning the previous segment name.
    pub fn insert(&mut self, vlan: u32, segment: impl Into<String>) -> Option<String> {
        self.0.insert(vlan, segment.into())
    }

    pub fn contains(&self, vlan: u32) -> bool {
        self.0.contains_key(&vlan)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(vlan, segment)` pairs in ascending VLAN order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.0.iter().map(|(vlan, segment)| (*vlan, segment.as_str()))
    }
}

impl FromIterator<(u32, String)> for MappingTable {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<(u32, String)> for MappingTable {
    fn extend<I: IntoIterator<Item = (u32, String)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for MappingTable {
    type Item = (u32, String);
    type IntoIter = btree_map::IntoIter<u32, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Output of scanning one binding table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    /// Binding records in input order.
    pub records: Vec<BindingRecord>,
    /// Mapping declarations found in the input, last declaration per VLAN wins.
    pub detected_mappings: MappingTable,
}

impl Extraction {
    /// Distinct VLAN ids referenced by records, ascending.
    pub fn vlans(&self) -> Vec<u32> {
        self.records
            .iter()
            .map(|record| record.vlan)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// VLAN ids referenced by records that `mapping` has no segment for.
    pub fn unmapped_vlans(&self, mapping: &MappingTable) -> Vec<u32> {
        self.vlans()
            .into_iter()
            .filter(|vlan| !mapping.contains(*vlan))
            .collect()
    }
}
