use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use mab2nile::mappings::parse_override;
use mab_core::ColumnProfile;

#[derive(Parser, Debug)]
#[command(name = "mab2nile")]
#[command(about = "Convert switch MAC address tables into Nile segment import CSV")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Show bindings and VLAN to segment declarations found in a table.
    Detect(DetectArgs),
    /// Convert a table to Nile CSV.
    Convert(ConvertArgs),
    /// Answer one JSON conversion request (base64 payloads).
    Handle(HandleArgs),
}

#[derive(Parser, Debug)]
pub struct DetectArgs {
    /// MAC address table text file.
    pub input: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Judge VLAN coverage against this config instead of the declarations.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Write an editable config seeded with the detected mapping.
    #[arg(long)]
    pub emit_config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// MAC address table text file.
    pub input: PathBuf,
    /// Output CSV path.
    #[arg(short, long, default_value = "nile_migration.csv")]
    pub output: PathBuf,
    /// TOML config with a [segments] table; replaces declarations in the input.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Map one VLAN, e.g. --map 5=Guest. Applied after the config or declarations.
    #[arg(long = "map", value_name = "VLAN=SEGMENT", value_parser = parse_override)]
    pub overrides: Vec<(u32, String)>,
    /// Column set; defaults to the config's `columns`, then `full`.
    #[arg(long, value_enum)]
    pub columns: Option<Columns>,
    /// Fail when any VLAN has no segment.
    #[arg(long)]
    pub strict: bool,
    /// Only print the summary line.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Parser, Debug)]
pub struct HandleArgs {
    /// Request JSON file, or `-` for stdin.
    #[arg(default_value = "-")]
    pub request: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum Columns {
    /// MAC, segment, location and allow/deny columns.
    Base,
    /// Base columns plus description and IP columns.
    Full,
}

impl From<Columns> for ColumnProfile {
    fn from(columns: Columns) -> Self {
        match columns {
            Columns::Base => ColumnProfile::Base,
            Columns::Full => ColumnProfile::Full,
        }
    }
}
