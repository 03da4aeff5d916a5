//! Switch MAC-address binding tables to Nile segment import CSV.
//!
//! Campus migrations to Nile start from whatever the old switches know about
//! attached clients, usually the output of `show mac address-table`. This
//! library wraps the [`mab_core`] pipeline with what a tool around it needs:
//!
//! - [`mappings`] — VLAN to segment config files, `VLAN=SEGMENT` overrides,
//!   and the rule for choosing between supplied and detected mappings
//! - [`request`] — base64/JSON request codec for serving conversions over HTTP
//! - [`report`] — detection report and data warnings for human review
//! - [`conversion_summary`] — one-line post-conversion counts
//!
//! # Workflow
//!
//! 1. **Detect** bindings and `<vlan> = '<segment>'` declarations
//! 2. **Review** the mapping, filling in VLANs with no segment
//! 3. **Convert** with the reviewed mapping and write the CSV
//!
//! ```ignore
//! use mab_core::{extract_file, render, require_records, ColumnProfile, MappingTable};
//! use mab2nile::mappings::resolve_mapping;
//!
//! let extraction = require_records(extract_file("mab.txt".as_ref())?)?;
//! let mapping = resolve_mapping(&MappingTable::new(), &extraction.detected_mappings);
//! let csv = render(&extraction.records, &mapping, ColumnProfile::Full);
//! ```

pub mod conversion_summary;
pub mod mappings;
pub mod report;
pub mod request;
