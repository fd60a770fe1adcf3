//! Terminal rendering of catalog, summary and graph.

use colored::*;

use playlistr::catalog::Catalog;
use playlistr::engine::SequenceSummary;
use playlistr::graph::AdjacencyView;

/// Parse `#RRGGBB` into its components.
fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Paint `text` in the content's display color, plain when unparseable.
fn paint(text: &str, color: &str) -> ColoredString {
    match parse_hex(color) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

fn on_off(enabled: bool) -> ColoredString {
    if enabled { "on".green() } else { "off".dimmed() }
}

pub fn catalog_lines(catalog: &Catalog) -> Vec<String> {
    let mut lines = vec![format!(
        "{} self {}, pairwise {}",
        "Separation:".cyan(),
        on_off(catalog.modes.self_separation),
        on_off(catalog.modes.pairwise)
    )];

    if catalog.is_empty() {
        lines.push("  (no contents)".dimmed().to_string());
        return lines;
    }

    for content in &catalog.contents {
        let separation = if content.separation.is_empty() {
            String::new()
        } else {
            let names: Vec<&str> = content.separation.iter().map(String::as_str).collect();
            format!("  apart from {}", names.join(", "))
        };
        lines.push(format!(
            "  {:<16} x{:<3} {:>8.2}{}",
            paint(&content.name, &content.color),
            content.saturation,
            content.duration,
            separation
        ));
    }
    lines.push(format!(
        "  {} contents, {} occurrences",
        catalog.len(),
        catalog.total_saturation()
    ));
    lines
}

pub fn summary_lines(summary: &SequenceSummary, verbose: bool) -> Vec<String> {
    let mut lines = Vec::new();

    let placed = format!("{}/{}", summary.placed, summary.requested);
    lines.push(format!(
        "{} {} placed, total {:.2}, rating {:.3}, seed {}",
        "Playlist:".green(),
        if summary.is_complete() { placed.green() } else { placed.yellow() },
        summary.total_duration(),
        summary.rating,
        summary.seed
    ));

    for (index, occurrence) in summary.occurrences.iter().enumerate() {
        lines.push(format!(
            "  {:>4}  {:<20} {:>8.2}",
            index,
            paint(&occurrence.label, &occurrence.color),
            occurrence.duration
        ));
    }

    if !summary.is_complete() {
        lines.push(format!("{} {}", "Dropped:".red(), summary.dropped.join(", ")));
    }

    if verbose {
        for pass in &summary.passes {
            lines.push(format!(
                "  pass {:>2}: placed {}, deferred self {} / pairwise {} / both {}",
                pass.pass, pass.placed, pass.self_only, pass.ext_only, pass.both
            ));
        }
    }

    lines
}

pub fn graph_lines(view: &AdjacencyView) -> Vec<String> {
    let mut lines = vec![format!("{} {} nodes, {} links", "Graph:".cyan(), view.nodes.len(), view.links.len())];
    for link in &view.links {
        lines.push(format!("  {} -- {}", link.source, link.target));
    }
    lines
}
