use std::fs;

use anyhow::{Context, Result};
use mab2nile::mappings::{load_config, render_config, resolve_mapping};
use mab2nile::report::{build_detection_report, render_detection};
use mab_core::extract_file;

use crate::cli::{DetectArgs, OutputFormat};

pub fn run_detect(args: DetectArgs) -> Result<()> {
    let extraction = extract_file(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let config = args
        .config
        .as_deref()
        .map(load_config)
        .transpose()
        .context("failed to load mapping config")?
        .unwrap_or_default();
    let mapping = resolve_mapping(&config.segments, &extraction.detected_mappings);
    let report = build_detection_report(&extraction, &mapping);

    if let Some(path) = &args.emit_config {
        let raw = render_config(config.columns, &mapping, &report.unmapped_vlans)
            .context("failed to render mapping config")?;
        fs::write(path, raw)
            .with_context(|| format!("failed to write config file {}", path.display()))?;
    }

    match args.format {
        OutputFormat::Text => println!("{}", render_detection(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
