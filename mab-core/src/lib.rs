//! MAC-address binding table extraction and Nile segment CSV rendering.
//!
//! The pipeline is split in two independently callable stages so a caller
//! can review the VLAN to segment mapping between them:
//!
//! 1. [`extract`] scans switch output for `<vlan> <mac> <type> <port>`
//!    bindings and `<vlan> = '<segment>'` declarations.
//! 2. [`render`] turns the records plus a resolved [`MappingTable`] into CSV.
//!
//! Every function here is a pure function of its arguments.

pub mod mac;
pub mod parser;
pub mod table;
pub mod writer;

pub use mac::{is_canonical_mac, normalize_mac};
pub use parser::{
    classify_line, extract, extract_bytes, extract_file, require_records, ExtractError, LineKind,
};
pub use table::{BindingRecord, Extraction, MappingTable};
pub use writer::{header, render, render_with_ip_columns, write_file, ColumnProfile};
