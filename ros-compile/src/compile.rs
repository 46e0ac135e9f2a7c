use section_map::{merge, normalize};
use tracing::debug;

use crate::build::{lan, tunnel, wan, wireless};
use crate::error::CompileError;
use crate::intent::NetworkIntent;
use crate::options::CompileOptions;
use crate::radio;
use crate::section::{CommandMap, Section};

/// Compile an intent into normalized, ordered command sections.
pub fn compile(intent: &NetworkIntent, options: &CompileOptions) -> Result<CommandMap, CompileError> {
    let map = compile_unnormalized(intent, options)?;
    Ok(normalize(&map))
}

/// Compile without the normalization pass.
///
/// Builders run independently; their maps are merged onto a skeleton holding
/// every section in canonical order, and sections left empty are dropped.
pub fn compile_unnormalized(
    intent: &NetworkIntent,
    options: &CompileOptions,
) -> Result<CommandMap, CompileError> {
    let plan = radio::plan(intent, options);
    debug!(assignments = plan.assignments.len(), "radio plan ready");

    let maps = [
        CommandMap::with_sections(Section::canonical()),
        lan::build(intent, options),
        wan::build(intent, options)?,
        wireless::build(&intent.wireless, &plan, options),
        tunnel::build(&intent.tunnels)?,
    ];
    let mut out = merge(maps);
    out.prune_empty();
    debug!(sections = out.len(), commands = out.line_count(), "compiled");
    Ok(out)
}
