//! The `convert` subcommand: table in, Nile CSV out.
//!
//! The mapping used for rendering is chosen in this order:
//!
//! 1. `[segments]` from `--config`, when the file has any entries
//! 2. otherwise the `<vlan> = '<segment>'` declarations found in the input
//! 3. `--map VLAN=SEGMENT` overrides applied on top, per VLAN
//!
//! VLANs left without a segment still produce rows (with an empty segment)
//! unless `--strict` is set.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use mab2nile::conversion_summary::{render as render_summary, summarize};
use mab2nile::mappings::{load_config, resolve_mapping};
use mab2nile::report::{build_detection_report, render_warnings};
use mab_core::{extract_file, require_records, write_file, ColumnProfile};
use tracing::{debug, info};

use crate::cli::ConvertArgs;
use crate::path_guard::ensure_output_not_same;

pub fn run_convert(args: ConvertArgs) -> Result<()> {
    ensure_output_not_same(&args.output, &args.input)?;

    let extraction = extract_file(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let extraction = require_records(extraction)
        .with_context(|| format!("nothing to convert in {}", args.input.display()))?;

    let config = args
        .config
        .as_deref()
        .map(load_config)
        .transpose()
        .context("failed to load mapping config")?
        .unwrap_or_default();

    let mut mapping = resolve_mapping(&config.segments, &extraction.detected_mappings);
    for (vlan, segment) in args.overrides {
        if let Some(previous) = mapping.insert(vlan, segment) {
            debug!(vlan, %previous, "segment overridden from command line");
        }
    }

    let profile = args
        .columns
        .map(ColumnProfile::from)
        .or(config.columns)
        .unwrap_or_default();

    let report = build_detection_report(&extraction, &mapping);
    if args.strict && !report.unmapped_vlans.is_empty() {
        let vlans: Vec<String> = report.unmapped_vlans.iter().map(u32::to_string).collect();
        bail!(
            "strict mode failed: no segment for VLAN(s) {}",
            vlans.join(", ")
        );
    }

    write_file(&extraction.records, &mapping, profile, &args.output)
        .with_context(|| format!("failed to write output CSV {}", args.output.display()))?;
    info!(
        output = %args.output.display(),
        rows = extraction.records.len(),
        "wrote Nile CSV"
    );

    if !args.quiet {
        if !report.warnings.is_empty() {
            println!("{}", render_warnings(&report.warnings));
        }
        println!("wrote {}", args.output.display());
    }
    println!(
        "{}",
        render_summary(summarize(&extraction, &mapping, profile)).cyan()
    );

    Ok(())
}
