//! Output rendering for `fabricator resolve`.

use std::fmt::Write as _;

use fabricator::{Blueprint, Fabricated, Report};
use fabricator_core::{Constructible, Error, Result};
use serde::Serialize;

use crate::config::OutputFormat;

/// What to include besides the resolved units.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Construct each unit and include its properties.
    pub construct: bool,
    /// Include skipped entries.
    pub explain: bool,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum NodeView {
    Unit(UnitView),
    Group { group: Vec<NodeView> },
}

#[derive(Debug, Serialize)]
struct UnitView {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    ident: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<toml::Table>,
}

#[derive(Debug, Serialize)]
struct ReportView {
    units: Vec<NodeView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skipped: Option<Vec<String>>,
}

/// Render a fabrication report in the requested format.
///
/// # Errors
///
/// Fails when a unit cannot be constructed (with `construct` set) or the
/// JSON encoder rejects a property value.
pub fn render(
    report: &Report<Blueprint>,
    format: OutputFormat,
    options: RenderOptions,
) -> Result<String> {
    let view = ReportView {
        units: report
            .units
            .iter()
            .map(|u| node_view(u, options.construct))
            .collect::<Result<_>>()?,
        skipped: options
            .explain
            .then(|| report.skipped.iter().map(ToString::to_string).collect()),
    };

    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&view).map_err(|e| Error::serialization(e.to_string()))
        }
        OutputFormat::Text => Ok(render_text(&view)),
    }
}

fn node_view(node: &Fabricated<Blueprint>, construct: bool) -> Result<NodeView> {
    match node {
        Fabricated::Unit(unit) => {
            let properties = if construct {
                Some(unit.construct()?.properties)
            } else {
                None
            };
            Ok(NodeView::Unit(UnitView {
                name: unit.name(),
                ident: unit.ident().to_string(),
                origin: unit.origin().map(|p| p.display().to_string()),
                properties,
            }))
        }
        Fabricated::Group(items) => Ok(NodeView::Group {
            group: items
                .iter()
                .map(|n| node_view(n, construct))
                .collect::<Result<_>>()?,
        }),
    }
}

fn render_text(view: &ReportView) -> String {
    let mut out = String::new();
    if view.units.is_empty() {
        out.push_str("(no units)\n");
    }
    for node in &view.units {
        write_node(&mut out, node, 0);
    }
    if let Some(skipped) = &view.skipped
        && !skipped.is_empty()
    {
        out.push_str("skipped:\n");
        for line in skipped {
            let _ = writeln!(out, "  {line}");
        }
    }
    out
}

fn write_node(out: &mut String, node: &NodeView, depth: usize) {
    let pad = "  ".repeat(depth);
    match node {
        NodeView::Unit(unit) => {
            let name = unit.name.as_deref().unwrap_or("<unnamed>");
            let _ = write!(out, "{pad}- {name} ({})", unit.ident);
            if let Some(origin) = &unit.origin {
                let _ = write!(out, "  {origin}");
            }
            out.push('\n');
            if let Some(properties) = &unit.properties {
                for (key, value) in properties {
                    let _ = writeln!(out, "{pad}    {key} = {value}");
                }
            }
        }
        NodeView::Group { group } => {
            let _ = writeln!(out, "{pad}- group of {}", group.len());
            for child in group {
                write_node(out, child, depth + 1);
            }
        }
    }
}
