//! Colored console output for reports and maps.

use std::collections::HashSet;
use std::fmt::Display;
use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor, Stylize};
use octile_core::{Coordinate, TerrainMap};
use octile_search::Report;

use crate::planner::{Comparison, PlanSummary};

/// Write `text` in bold `color`.
pub fn message<W: Write>(out: &mut W, color: Color, text: impl Display) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(color),
        SetAttribute(Attribute::Bold),
        Print(text),
        SetAttribute(Attribute::Reset),
        ResetColor
    )
}

/// Headline, counters and the numbered path of one report.
pub fn write_report<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    let agent = report.agent();
    if report.is_solved() {
        message(
            out,
            Color::Green,
            format_args!("Found a path from {} to {}\n", agent.start(), agent.goal()),
        )?;
    } else {
        message(
            out,
            Color::Red,
            format_args!(
                "Failed to find a path from {} to {} ({:?})\n",
                agent.start(),
                agent.goal(),
                report.status()
            ),
        )?;
    }

    let s = report.stats();
    message(out, Color::White, format_args!("Expanded nodes: {}\n", s.expanded))?;
    message(out, Color::White, format_args!("Generated nodes: {}\n", s.generated))?;
    message(out, Color::White, format_args!("Pop operations: {}\n", s.popped))?;
    message(out, Color::White, format_args!("Peak frontier size: {}\n", s.peak_frontier))?;
    write_path(out, report.path())?;
    out.flush()
}

/// Path length followed by one numbered line per cell.
pub fn write_path<W: Write>(out: &mut W, path: &[Coordinate]) -> io::Result<()> {
    message(
        out,
        Color::Green,
        format_args!("Path has {} cells:\n", path.len()),
    )?;
    for (i, c) in path.iter().enumerate() {
        message(out, Color::White, format_args!("#{i}\t{c}\n"))?;
    }
    Ok(())
}

/// The map with the report's agent stamped on it and its path highlighted.
pub fn write_map<W: Write>(out: &mut W, map: &TerrainMap, report: &Report) -> io::Result<()> {
    let on_path: HashSet<Coordinate> = report.path().iter().copied().collect();
    let stamp = map.stamp_agent(report.agent());
    let text = map.render_with(|c, terrain| {
        if on_path.contains(&c) {
            terrain.red().bold().to_string()
        } else {
            terrain.to_string()
        }
    });
    if let Some(stamp) = stamp {
        map.unstamp_agent(stamp);
    }
    queue!(out, Print(text))?;
    out.flush()
}

/// One-line tally of a [`Planner::plan_all`](crate::Planner::plan_all) run.
pub fn write_summary<W: Write>(out: &mut W, engine: &str, summary: &PlanSummary) -> io::Result<()> {
    message(
        out,
        Color::Blue,
        format_args!(
            "{engine}: succeeded planning: {}, failed planning: {}\n",
            summary.succeeded, summary.failed
        ),
    )?;
    out.flush()
}

/// One-line tally of a [`Planner::compare`](crate::Planner::compare) run,
/// green when the engines agreed on every scenario.
pub fn write_comparison<W: Write>(
    out: &mut W,
    reference: &str,
    candidate: &str,
    comparison: &Comparison,
) -> io::Result<()> {
    let color = if comparison.disagreed == 0 {
        Color::Green
    } else {
        Color::Red
    };
    message(
        out,
        color,
        format_args!(
            "{candidate} vs {reference}: {} agreed, {} disagreed\n",
            comparison.agreed, comparison.disagreed
        ),
    )?;
    out.flush()
}
