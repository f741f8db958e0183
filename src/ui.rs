//! Terminal output
//!
//! Renders reports, diffs and package trees as strings; the binary decides
//! where they go. Colour is only applied when the caller asks for it.

use std::fmt::Write as _;

use crossterm::style::{Color, Stylize};
use is_terminal::IsTerminal;

use crate::config::ConfigWarning;
use crate::denv::{PackageSummary, ProjectSummary};
use crate::generator::{GeneratePlan, GenerateReport};

/// Semantic colours
pub mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const INFO: Color = Color::Cyan;
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const WARNING: &str = "⚠";
    pub const REMOVED: &str = "✗";
    pub const GENERATE: &str = "📦";
    pub const DIFF: &str = "Δ";
}

/// Colour stdout only when it is a terminal and `NO_COLOR` is unset
pub fn supports_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Whether stderr is attached to a terminal
pub fn stderr_is_terminal() -> bool {
    std::io::stderr().is_terminal()
}

fn paint(s: &str, color: Color, enabled: bool) -> String {
    if enabled {
        format!("{}", s.with(color))
    } else {
        s.to_string()
    }
}

/// Command header, e.g. `📦 xvmem generate`
pub fn render_header(icon: &str, title: &str, color: bool) -> String {
    paint(&format!("{icon} {title}"), colors::INFO, color)
}

/// Human readable generation summary
pub fn render_report(report: &GenerateReport, color: bool) -> String {
    let mut out = String::new();
    let verb = if report.dry_run { "Would write" } else { "Written" };

    let written: Vec<&String> = report.created.iter().chain(report.updated.iter()).collect();
    if !written.is_empty() {
        let line = format!("  {} {}: {} files", icons::SUCCESS, verb, written.len());
        let _ = writeln!(out, "{}", paint(&line, colors::SUCCESS, color));
        for path in &report.created {
            let _ = writeln!(out, "    + {path}");
        }
        for path in &report.updated {
            let _ = writeln!(out, "    ~ {path}");
        }
    }

    if !report.removed.is_empty() {
        let verb = if report.dry_run { "Would remove" } else { "Removed" };
        let line = format!("  {} {}: {} files", icons::REMOVED, verb, report.removed.len());
        let _ = writeln!(out, "{}", paint(&line, colors::ERROR, color));
        for path in &report.removed {
            let _ = writeln!(out, "    - {path}");
        }
    }

    if !report.skipped.is_empty() {
        let line = format!(
            "  {} Skipped: {} files (modified by user, use --force to overwrite)",
            icons::WARNING,
            report.skipped.len()
        );
        let _ = writeln!(out, "{}", paint(&line, colors::WARNING, color));
        for path in &report.skipped {
            let _ = writeln!(out, "    ! {path}");
        }
    }

    if !report.unchanged.is_empty() {
        let line = format!("  Unchanged: {} files", report.unchanged.len());
        let _ = writeln!(out, "{}", paint(&line, colors::DIM, color));
    }

    if out.is_empty() {
        out.push_str("  Nothing to generate\n");
    }
    out
}

/// JSON event for a generation report
pub fn report_json(package: &str, report: &GenerateReport) -> serde_json::Value {
    serde_json::json!({
        "event": "generate",
        "package": package,
        "status": if report.is_clean() { "success" } else { "partial" },
        "dry_run": report.dry_run,
        "created": report.created,
        "updated": report.updated,
        "unchanged": report.unchanged,
        "skipped": report.skipped,
        "removed": report.removed,
    })
}

/// Unified diffs of every pending change, colourised per line
pub fn render_plan_diff(plan: &GeneratePlan, color: bool) -> String {
    let mut out = String::new();
    for file in &plan.files {
        let Some(diff) = file.unified_diff() else {
            continue;
        };
        for line in diff.lines() {
            let painted = if line.starts_with("+++") || line.starts_with("---") || line.starts_with("@@") {
                paint(line, colors::INFO, color)
            } else if line.starts_with('+') {
                paint(line, colors::SUCCESS, color)
            } else if line.starts_with('-') {
                paint(line, colors::ERROR, color)
            } else {
                line.to_string()
            };
            out.push_str(&painted);
            out.push('\n');
        }
    }
    out
}

/// JSON event for a diff run
pub fn plan_json(package: &str, plan: &GeneratePlan) -> serde_json::Value {
    let files: Vec<serde_json::Value> = plan
        .files
        .iter()
        .map(|f| {
            serde_json::json!({
                "path": f.path.to_string_lossy().replace('\\', "/"),
                "action": f.action,
                "diff": f.unified_diff(),
            })
        })
        .collect();
    serde_json::json!({
        "event": "diff",
        "package": package,
        "files": files,
    })
}

fn render_project(out: &mut String, project: &ProjectSummary, indent: &str) {
    let _ = write!(out, "{indent}{} {}", project.kind.as_str(), project.name);
    if !project.dependencies.is_empty() {
        let _ = write!(out, " -> {}", project.dependencies.join(", "));
    }
    out.push('\n');
}

fn render_package(out: &mut String, package: &PackageSummary, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = writeln!(out, "{indent}{} [{}]", package.name, package.path);

    let inner = "  ".repeat(depth + 1);
    for project in package.main_lib.iter().chain(package.unittests.iter()) {
        render_project(out, project, &inner);
    }
    for child in &package.packages {
        render_package(out, child, depth + 1);
    }
}

/// Indented text tree of a package and its sub-packages
pub fn render_tree(package: &PackageSummary) -> String {
    let mut out = String::new();
    render_package(&mut out, package, 0);
    out
}

/// Unknown-key warnings for stderr
pub fn render_config_warnings(warnings: &[ConfigWarning], color: bool) -> String {
    let mut out = String::new();
    for w in warnings {
        let line = match w.line {
            Some(line) => format!(
                "{} Unknown config key '{}' in {}:{}",
                icons::WARNING,
                w.key,
                w.file.display(),
                line
            ),
            None => format!(
                "{} Unknown config key '{}' in {}",
                icons::WARNING,
                w.key,
                w.file.display()
            ),
        };
        let _ = writeln!(out, "{}", paint(&line, colors::WARNING, color));
    }
    out
}
