use std::io::IsTerminal;

use anyhow::{bail, Context, Result};
use ros_compile::compile::{compile, compile_unnormalized};
use ros_compile::intent::load_intent;
use ros_compile::section::{resolve_filter, CommandMap, Section};
use section_map::{format_summary, write, write_file, ScriptFormat};

use crate::cli::{CompileArgs, OutputFormat};
use crate::path_guard::{ensure_output_not_same, Input};
use crate::report::render_script;
use crate::resolve_options;

pub fn run_compile(args: CompileArgs) -> Result<()> {
    let mut inputs = vec![Input::new("intent", &args.intent)];
    inputs.extend(args.options.as_deref().map(|path| Input::new("options", path)));
    if let Some(out_path) = &args.output {
        ensure_output_not_same(out_path, &inputs)?;
    }

    let filter = section_filter(&args.section)?;
    let intent = load_intent(&args.intent)
        .with_context(|| format!("failed to load intent {}", args.intent.display()))?;
    let options = resolve_options(args.options.as_deref())?;

    let mut map = if args.raw {
        compile_unnormalized(&intent, &options)
    } else {
        compile(&intent, &options)
    }
    .with_context(|| format!("failed to compile {}", args.intent.display()))?;

    if let Some(keep) = filter {
        map.retain_sections(|section| keep.contains(section));
    }

    if args.summary {
        println!("{}", format_summary(&map));
        return Ok(());
    }

    let format = match args.format {
        OutputFormat::Text => ScriptFormat::Text,
        OutputFormat::Json => ScriptFormat::Json,
    };

    match &args.output {
        Some(out_path) => write_file(&map, out_path, format)
            .with_context(|| format!("failed to write output {}", out_path.display()))?,
        None => print!("{}", render(&map, format)),
    }
    Ok(())
}

fn render(map: &CommandMap, format: ScriptFormat) -> String {
    match format {
        ScriptFormat::Text => render_script(map, std::io::stdout().is_terminal()),
        ScriptFormat::Json => write(map, format),
    }
}

fn section_filter(filters: &[String]) -> Result<Option<Vec<Section>>> {
    if filters.is_empty() {
        return Ok(None);
    }
    let mut keep = Vec::new();
    for filter in filters {
        match resolve_filter(filter) {
            Some(sections) => keep.extend(sections),
            None => bail!("unknown section '{filter}' (see `ros-compile sections`)"),
        }
    }
    Ok(Some(keep))
}
