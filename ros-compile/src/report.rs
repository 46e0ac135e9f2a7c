use colored::Colorize;
use ros_compile::intent::Band;
use ros_compile::options::CompileOptions;
use ros_compile::radio::{RadioKind, RadioPlan};
use ros_compile::section::CommandMap;
use section_map::{format_text, yes_no};

/// Render a compiled script, colouring headers and verbs when `color` is set.
pub fn render_script(map: &CommandMap, color: bool) -> String {
    let raw = format_text(map);
    if !color {
        return raw;
    }

    let mut out = String::with_capacity(raw.len());
    for line in raw.lines() {
        let rendered = if line.starts_with('/') {
            line.cyan().bold().to_string()
        } else if let Some(rest) = line.strip_prefix("add ") {
            format!("{} {rest}", "add".green())
        } else if let Some(rest) = line.strip_prefix("set ") {
            format!("{} {rest}", "set".yellow())
        } else {
            line.to_string()
        };
        out.push_str(&rendered);
        out.push('\n');
    }
    out
}

/// Render the radio allocation as one line per network and band.
pub fn render_plan(plan: &RadioPlan, options: &CompileOptions) -> String {
    let mut out = Vec::new();
    out.push(format!(
        "consumed {}={} {}={}",
        Band::Band2_4,
        yes_no(plan.consumed.band2_4),
        Band::Band5,
        yes_no(plan.consumed.band5)
    ));
    if plan.is_empty() {
        out.push("no networks requested; unused radios are disabled".to_string());
    }
    for assignment in &plan.assignments {
        let radio = options.radio(assignment.band);
        let placement = match assignment.kind {
            RadioKind::Master => format!("master {radio}"),
            RadioKind::Slave => format!("slave of {radio}"),
        };
        out.push(format!(
            "- {} {} {placement}",
            assignment.role, assignment.band
        ));
    }
    let mut rendered = out.join("\n");
    rendered.push('\n');
    rendered
}

/// One section path per line.
pub fn render_sections(paths: &[&str]) -> String {
    let mut out = paths.join("\n");
    out.push('\n');
    out
}
