use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use ros_compile::options::{default_options, load_options, CompileOptions};
use ros_compile::section::Section;
use section_map::{normalize, parse_file, write, write_file, ScriptFormat};
use tracing_subscriber::EnvFilter;

mod cli;
mod compile_cmd;
mod path_guard;
mod plan_cmd;
mod report;

use cli::{Cli, Command, NormalizeArgs, OutputFormat, SectionsArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Compile(args) => compile_cmd::run_compile(args),
        Command::Plan(args) => plan_cmd::run_plan(args),
        Command::Sections(args) => run_sections(args),
        Command::Normalize(args) => run_normalize(args),
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Built-in options, or the user's file when given.
pub(crate) fn resolve_options(path: Option<&Path>) -> Result<CompileOptions> {
    match path {
        Some(path) => load_options(path)
            .with_context(|| format!("failed to load options {}", path.display())),
        None => Ok(default_options()),
    }
}

fn run_sections(args: SectionsArgs) -> Result<()> {
    let paths: Vec<&'static str> = Section::canonical().map(Section::as_path).collect();
    match args.format {
        OutputFormat::Text => print!("{}", report::render_sections(&paths)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&paths)?),
    }
    Ok(())
}

fn run_normalize(args: NormalizeArgs) -> Result<()> {
    let parsed = parse_file(&args.script)
        .with_context(|| format!("failed to parse {}", args.script.display()))?;
    let normalized = normalize(&parsed);

    match args.output {
        Some(out_path) => {
            path_guard::ensure_output_not_same(
                &out_path,
                &[path_guard::Input::new("script", &args.script)],
            )?;
            write_file(&normalized, &out_path, ScriptFormat::Text)
                .with_context(|| format!("failed to write {}", out_path.display()))?;
        }
        None => print!("{}", write(&normalized, ScriptFormat::Text)),
    }
    Ok(())
}
