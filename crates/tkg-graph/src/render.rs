//! Renderers: consumers of a computed [`Layout`]
//!
//! The layout engine never draws. A renderer turns the layout into an output
//! document; `write_output` stores it on disk.

use std::fmt::Write as _;
use std::path::Path;

use tkg_core::{NodeKind, Result, TkgError};

use crate::layout::{color, Bounds, Layout};

/// Trait for layout renderers
pub trait Renderer {
    /// Render the layout into a document
    fn render(&self, layout: &Layout) -> Result<String>;

    /// File extension of rendered documents
    fn extension(&self) -> &'static str;
}

/// Render a layout and write it to `path`
pub fn write_output(renderer: &dyn Renderer, layout: &Layout, path: &Path) -> Result<()> {
    let document = renderer.render(layout)?;
    std::fs::write(path, document).map_err(|e| {
        TkgError::Render(format!("failed to write {}: {e}", path.display()))
    })?;

    tracing::debug!(path = %path.display(), "Wrote rendering");
    Ok(())
}

// =============================================================================
// SVG
// =============================================================================

/// Static SVG drawing with a title and a color legend
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    /// Title drawn above the graph
    pub title: String,
    /// Pixels per horizontal layout unit
    pub x_scale: f64,
    /// Pixels per vertical layout unit
    pub y_scale: f64,
    /// Node circle radius in pixels
    pub node_radius: f64,
    /// Label font size in pixels
    pub font_size: f64,
}

const MARGIN: f64 = 80.0;
const HEADER: f64 = 60.0;
const LEGEND_WIDTH: f64 = 150.0;

impl SvgRenderer {
    pub fn new() -> Self {
        Self {
            title: "Team Knowledge Graph".to_string(),
            x_scale: 10.0,
            y_scale: 90.0,
            node_radius: 48.0,
            font_size: 10.0,
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Map layout coordinates to pixels; the y axis points up in layout space
    fn project(&self, bounds: &Bounds, x: f64, y: f64) -> (f64, f64) {
        (
            MARGIN + (x - bounds.min_x) * self.x_scale,
            HEADER + MARGIN + (bounds.max_y - y) * self.y_scale,
        )
    }

    fn canvas_size(&self, bounds: &Bounds) -> (f64, f64) {
        let width = (bounds.max_x - bounds.min_x) * self.x_scale + 2.0 * MARGIN;
        let height = (bounds.max_y - bounds.min_y) * self.y_scale + 2.0 * MARGIN + HEADER;
        (width.max(LEGEND_WIDTH + 2.0 * MARGIN), height)
    }

    fn write_label(&self, svg: &mut String, x: f64, y: f64, label: &str) -> std::fmt::Result {
        let lines: Vec<&str> = label.split('\n').collect();
        let line_height = self.font_size * 1.2;
        let first_dy = -(lines.len() as f64 - 1.0) / 2.0 * line_height;

        write!(
            svg,
            "  <text x=\"{x:.1}\" y=\"{y:.1}\" fill=\"#1a202c\" font-size=\"{:.0}\" text-anchor=\"middle\" dominant-baseline=\"middle\">",
            self.font_size
        )?;
        for (i, line) in lines.iter().enumerate() {
            let dy = if i == 0 { first_dy } else { line_height };
            write!(
                svg,
                "<tspan x=\"{x:.1}\" dy=\"{dy:.1}\">{}</tspan>",
                escape_xml(line)
            )?;
        }
        svg.push_str("</text>\n");
        Ok(())
    }

    fn write_legend(&self, svg: &mut String, canvas_width: f64) -> std::fmt::Result {
        let x = canvas_width - MARGIN - LEGEND_WIDTH;
        let mut y = 20.0;

        write!(
            svg,
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{LEGEND_WIDTH:.0}\" height=\"{:.0}\" fill=\"#ffffff\" stroke=\"#cbd5e0\" />\n",
            x - 10.0,
            y - 14.0,
            NodeKind::ALL.len() as f64 * 20.0 + 8.0
        )?;
        for kind in NodeKind::ALL {
            write!(
                svg,
                "  <rect x=\"{x:.1}\" y=\"{:.1}\" width=\"14\" height=\"14\" fill=\"{}\" />\n  <text x=\"{:.1}\" y=\"{y:.1}\" font-size=\"12\" dominant-baseline=\"middle\">{}</text>\n",
                y - 7.0,
                color(kind),
                x + 22.0,
                kind
            )?;
            y += 20.0;
        }
        Ok(())
    }

    fn render_svg(&self, layout: &Layout) -> std::result::Result<String, std::fmt::Error> {
        let bounds = layout.bounds().unwrap_or(Bounds {
            min_x: 0.0,
            max_x: 0.0,
            min_y: 0.0,
            max_y: 0.0,
        });
        let (width, height) = self.canvas_size(&bounds);

        let mut svg = String::new();
        write!(
            svg,
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}" font-family="Inter, system-ui, sans-serif">
  <rect width="100%" height="100%" fill="#ffffff" />
  <text x="{:.1}" y="32" font-size="20" text-anchor="middle">{}</text>
"##,
            width / 2.0,
            escape_xml(&self.title)
        )?;

        for (a, b) in &layout.edges {
            let (Some(pa), Some(pb)) = (layout.position(a), layout.position(b)) else {
                continue;
            };
            let (x1, y1) = self.project(&bounds, pa.x, pa.y);
            let (x2, y2) = self.project(&bounds, pb.x, pb.y);
            write!(
                svg,
                "  <line x1=\"{x1:.1}\" y1=\"{y1:.1}\" x2=\"{x2:.1}\" y2=\"{y2:.1}\" stroke=\"#2d3748\" stroke-width=\"1.5\" />\n"
            )?;
        }

        for node in &layout.nodes {
            let (cx, cy) = self.project(&bounds, node.position.x, node.position.y);
            write!(
                svg,
                "  <circle cx=\"{cx:.1}\" cy=\"{cy:.1}\" r=\"{:.1}\" fill=\"{}\" />\n",
                self.node_radius, node.color
            )?;
            self.write_label(&mut svg, cx, cy, &node.label)?;
        }

        self.write_legend(&mut svg, width)?;
        svg.push_str("</svg>\n");
        Ok(svg)
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for SvgRenderer {
    fn render(&self, layout: &Layout) -> Result<String> {
        self.render_svg(layout)
            .map_err(|e| TkgError::Render(format!("SVG formatting failed: {e}")))
    }

    fn extension(&self) -> &'static str {
        "svg"
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// =============================================================================
// JSON
// =============================================================================

/// Pretty-printed JSON of the layout
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, layout: &Layout) -> Result<String> {
        serde_json::to_string_pretty(layout)
            .map_err(|e| TkgError::Render(format!("JSON serialization failed: {e}")))
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
