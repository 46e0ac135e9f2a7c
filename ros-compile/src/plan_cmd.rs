use anyhow::{Context, Result};
use ros_compile::intent::load_intent;
use ros_compile::radio::plan;

use crate::cli::{OutputFormat, PlanArgs};
use crate::report::render_plan;
use crate::resolve_options;

pub fn run_plan(args: PlanArgs) -> Result<()> {
    let intent = load_intent(&args.intent)
        .with_context(|| format!("failed to load intent {}", args.intent.display()))?;
    let options = resolve_options(args.options.as_deref())?;
    let plan = plan(&intent, &options);

    match args.format {
        OutputFormat::Text => print!("{}", render_plan(&plan, &options)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
    }
    Ok(())
}
