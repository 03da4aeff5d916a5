use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::{debug, trace};

use crate::table::{BindingRecord, Extraction};

/// `<vlan> = '<segment>'`, quotes optional and not required to balance.
static MAPPING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^([0-9]+)\s*=\s*['"]?(.*?)['"]?$"#).expect("mapping pattern is valid")
});

/// Errors that can occur while reading a binding table.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Input bytes were not valid UTF-8.
    #[error("input is not valid UTF-8 text: {0}")]
    Decoding(#[from] std::str::Utf8Error),
    /// The input contained no binding lines.
    #[error("no valid binding entries found")]
    NoRecordsFound,
    /// Failed to read input file.
    #[error("failed to read binding table: {0}")]
    Io(#[from] std::io::Error),
}

/// How a single input line was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// `<vlan> = <segment>` declaration.
    Mapping { vlan: u32, segment: String },
    /// `<vlan> <mac> <type> <port>` binding.
    Binding(BindingRecord),
    /// Anything else, including blank lines.
    Noise,
}

/// Classify one line of a binding table.
pub fn classify_line(line: &str) -> LineKind {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Noise;
    }

    if let Some(caps) = MAPPING_LINE.captures(line) {
        return match caps[1].parse::<u32>() {
            Ok(vlan) => LineKind::Mapping {
                vlan,
                segment: caps[2].to_string(),
            },
            Err(_) => LineKind::Noise,
        };
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 4 {
        return LineKind::Noise;
    }
    let Ok(vlan) = tokens[0].parse::<u32>() else {
        return LineKind::Noise;
    };
    // tokens[2] is the entry type (DYNAMIC, STATIC, ...) and is not kept.
    LineKind::Binding(BindingRecord::new(vlan, tokens[1], tokens[3]))
}

/// Scan a binding table and collect records and mapping declarations.
///
/// Lines that are neither declarations nor well-formed bindings are skipped.
/// An input with no bindings still returns whatever declarations it had; use
/// [`require_records`] to turn that case into an error.
pub fn extract(text: &str) -> Extraction {
    let mut out = Extraction::default();

    for (index, line) in text.lines().enumerate() {
        match classify_line(line) {
            LineKind::Mapping { vlan, segment } => {
                if let Some(previous) = out.detected_mappings.insert(vlan, segment) {
                    debug!(line = index + 1, vlan, %previous, "mapping declaration replaced");
                }
            }
            LineKind::Binding(record) => out.records.push(record),
            LineKind::Noise => {
                if !line.trim().is_empty() {
                    trace!(line = index + 1, "skipping unrecognized line");
                }
            }
        }
    }

    debug!(
        records = out.records.len(),
        mappings = out.detected_mappings.len(),
        "binding table scanned"
    );
    out
}

/// Decode UTF-8 bytes and scan them with [`extract`].
pub fn extract_bytes(bytes: &[u8]) -> Result<Extraction, ExtractError> {
    let text = std::str::from_utf8(bytes)?;
    Ok(extract(text))
}

/// Read a binding table file and scan it with [`extract`].
pub fn extract_file(path: &Path) -> Result<Extraction, ExtractError> {
    let bytes = fs::read(path)?;
    extract_bytes(&bytes)
}

/// Reject an extraction that produced no binding records.
pub fn require_records(extraction: Extraction) -> Result<Extraction, ExtractError> {
    if extraction.records.is_empty() {
        return Err(ExtractError::NoRecordsFound);
    }
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::{classify_line, extract, extract_bytes, require_records, ExtractError, LineKind};
    use crate::table::BindingRecord;

    #[test]
    fn classifies_binding_line() {
        assert_eq!(
            classify_line("   1    001e.0b41.7afd    DYNAMIC     Gi1/0/15"),
            LineKind::Binding(BindingRecord::new(1, "001e.0b41.7afd", "Gi1/0/15"))
        );
    }

    #[test]
    fn classifies_quoted_and_bare_declarations() {
        for line in ["5 = 'Guest'", "5 = \"Guest\"", "5=Guest", "  5 =   Guest  "] {
            assert_eq!(
                classify_line(line),
                LineKind::Mapping {
                    vlan: 5,
                    segment: "Guest".to_string()
                },
                "line {line:?}"
            );
        }
    }

    #[test]
    fn declaration_quotes_need_not_balance() {
        assert_eq!(
            classify_line("7 = 'Lab\""),
            LineKind::Mapping {
                vlan: 7,
                segment: "Lab".to_string()
            }
        );
        assert_eq!(
            classify_line("8 = O'Brien Hall'"),
            LineKind::Mapping {
                vlan: 8,
                segment: "O'Brien Hall".to_string()
            }
        );
    }

    #[test]
    fn declaration_may_have_empty_segment() {
        assert_eq!(
            classify_line("9 ="),
            LineKind::Mapping {
                vlan: 9,
                segment: String::new()
            }
        );
    }

    #[test]
    fn short_or_non_numeric_lines_are_noise() {
        assert_eq!(classify_line(""), LineKind::Noise);
        assert_eq!(classify_line("1 001e.0b41.7afd DYNAMIC"), LineKind::Noise);
        assert_eq!(
            classify_line("Vlan    Mac Address       Type        Ports"),
            LineKind::Noise
        );
        assert_eq!(
            classify_line("----    -----------       --------    -----"),
            LineKind::Noise
        );
        assert_eq!(classify_line("-1 001e.0b41.7afd DYNAMIC Gi1/0/1"), LineKind::Noise);
    }

    #[test]
    fn overflowing_declaration_is_noise() {
        assert_eq!(classify_line("99999999999 = 'Huge'"), LineKind::Noise);
    }

    #[test]
    fn extract_keeps_input_order_and_last_declaration() {
        let text = "5 = 'Guest'\n\
                    1 = 'Wired Production'\n\
                    5 = 'Visitors'\n\
                    \n\
                    Vlan Mac Address Type Ports\n\
                    10 aaaa.bbbb.cccc DYNAMIC Gi1/0/2\n\
                    1 001e.0b41.7afd DYNAMIC Gi1/0/15\n";

        let out = extract(text);
        assert_eq!(
            out.records,
            vec![
                BindingRecord::new(10, "aaaa.bbbb.cccc", "Gi1/0/2"),
                BindingRecord::new(1, "001e.0b41.7afd", "Gi1/0/15"),
            ]
        );
        assert_eq!(out.detected_mappings.get(5), Some("Visitors"));
        assert_eq!(out.detected_mappings.get(1), Some("Wired Production"));
    }

    #[test]
    fn extract_returns_mappings_without_records() {
        let out = extract("1 = 'Wired'\nTotal Mac Addresses for this criterion: 0\n");
        assert!(out.records.is_empty());
        assert_eq!(out.detected_mappings.get(1), Some("Wired"));

        let err = require_records(out).expect_err("no records");
        assert!(matches!(err, ExtractError::NoRecordsFound));
        assert_eq!(err.to_string(), "no valid binding entries found");
    }

    #[test]
    fn extract_handles_crlf_input() {
        let out = extract("1 = 'Wired'\r\n1 001e.0b41.7afd DYNAMIC Gi1/0/15\r\n");
        assert_eq!(out.records[0].port, "Gi1/0/15");
        assert_eq!(out.detected_mappings.get(1), Some("Wired"));
    }

    #[test]
    fn extract_bytes_rejects_invalid_utf8() {
        let err = extract_bytes(&[b'1', b' ', 0xff, 0xfe]).expect_err("invalid utf-8");
        assert!(matches!(err, ExtractError::Decoding(_)));
    }
}
