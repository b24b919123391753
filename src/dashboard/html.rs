// src/dashboard/html.rs

use anyhow::{Context, Result};
use std::fmt::Write as _;

use crate::build::GeoWageRow;
use crate::dashboard::{Dashboard, Renderer, SHOW_SOURCE_LABEL};
use crate::model::columns;

const VEGA_SCRIPTS: [&str; 3] = [
    "https://cdn.jsdelivr.net/npm/vega@6",
    "https://cdn.jsdelivr.net/npm/vega-lite@6",
    "https://cdn.jsdelivr.net/npm/vega-embed@7",
];
const DECK_SCRIPTS: [&str; 2] = [
    "https://unpkg.com/deck.gl@9/dist.min.js",
    "https://unpkg.com/@deck.gl/json@9/dist.min.js",
];

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON safe to inline inside a `<script>` element.
fn script_json(value: &impl serde::Serialize) -> Result<String> {
    let json = serde_json::to_string(value).context("serializing panel spec")?;
    Ok(json.replace("</", "<\\/"))
}

fn source_table(rows: &[GeoWageRow]) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<details open><summary>{}</summary><table><thead><tr>",
        escape(SHOW_SOURCE_LABEL)
    );
    for h in [
        columns::YEAR,
        columns::PREFECTURE,
        columns::PER_CAPITA_WAGE,
        columns::LONGITUDE,
        columns::LATITUDE,
        columns::NORMALIZED_WAGE,
    ] {
        let _ = write!(html, "<th>{}</th>", escape(h));
    }
    html.push_str("</tr></thead><tbody>");
    for r in rows {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            r.year,
            escape(&r.prefecture),
            r.per_capita_wage,
            r.longitude,
            r.latitude,
            r.normalized_wage
        );
    }
    html.push_str("</tbody></table></details>");
    html
}

/// A standalone page that draws every panel with vega-embed / deck.gl.
pub fn render_html(dashboard: &Dashboard) -> Result<String> {
    let mut html = String::new();
    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, "<html lang=\"ja\"><head><meta charset=\"utf-8\">");
    let _ = writeln!(html, "<title>{}</title>", escape(&dashboard.title));
    for src in VEGA_SCRIPTS.iter().chain(DECK_SCRIPTS.iter()) {
        let _ = writeln!(html, "<script src=\"{}\"></script>", src);
    }
    let _ = writeln!(
        html,
        "<style>.map{{position:relative;width:100%;height:500px}}</style></head><body>"
    );
    let _ = writeln!(html, "<h1>{}</h1>", escape(&dashboard.title));

    let mut scripts = String::new();
    for (i, panel) in dashboard.panels.iter().enumerate() {
        let target = format!("panel-{}", i);
        let _ = writeln!(html, "<h2>{}</h2>", escape(&panel.header));
        let spec = script_json(&panel.spec)?;
        match panel.renderer {
            Renderer::Deck => {
                let _ = writeln!(html, "<div id=\"{}\" class=\"map\"></div>", target);
                let _ = writeln!(
                    scripts,
                    "new deck.DeckGL({{container: '{}', controller: true, \
                     ...new deck.JSONConverter({{configuration: {{classes: deck}}}}).convert({})}});",
                    target, spec
                );
                if panel.id == "heatmap" {
                    if let Some(rows) = &dashboard.source_table {
                        html.push_str(&source_table(rows));
                        html.push('\n');
                    }
                }
            }
            Renderer::VegaLite => {
                let _ = writeln!(html, "<div id=\"{}\"></div>", target);
                let _ = writeln!(scripts, "vegaEmbed('#{}', {});", target, spec);
            }
        }
    }

    for line in &dashboard.footer {
        let _ = writeln!(html, "<pre>{}</pre>", escape(line));
    }
    let _ = writeln!(html, "<script>\n{}</script>", scripts);
    html.push_str("</body></html>\n");
    Ok(html)
}
