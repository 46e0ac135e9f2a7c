use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "ros-compile")]
#[command(about = "Compile router network intent into RouterOS command sections")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Compile an intent file into a RouterOS script.
    Compile(CompileArgs),
    /// Show how the two radios are allocated to the requested networks.
    Plan(PlanArgs),
    /// List every configuration section in output order.
    Sections(SectionsArgs),
    /// Normalize an existing RouterOS script.
    Normalize(NormalizeArgs),
}

#[derive(Parser, Debug)]
pub struct CompileArgs {
    /// Intent file (.toml or .json).
    pub intent: PathBuf,
    /// Options file overriding the built-in device defaults.
    #[arg(long)]
    pub options: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Write to a file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Only emit these sections: a group (wireless, lan, vpn, tunnels,
    /// routing, dns, firewall) or a section path. Repeatable.
    #[arg(long)]
    pub section: Vec<String>,
    /// Skip the normalization pass.
    #[arg(long)]
    pub raw: bool,
    /// Print section and command counts only.
    #[arg(long)]
    pub summary: bool,
}

#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Intent file (.toml or .json).
    pub intent: PathBuf,
    /// Options file overriding the built-in device defaults.
    #[arg(long)]
    pub options: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct SectionsArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct NormalizeArgs {
    /// RouterOS script to normalize.
    pub script: PathBuf,
    /// Write to a file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
