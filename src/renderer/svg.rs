//! SVG generation from figure layouts

use tracing::debug;

use crate::color::Colormap;
use crate::layout::{BoundingBox, ColorbarLayout, Figure, PanelLayout, TextAnchor, TextLayout};

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            elements: vec![],
            indent: 1,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a rectangle element with prefixed classes
    pub fn add_rect(&mut self, bounds: BoundingBox, classes: &[&str], styles: &str) {
        let prefix = self.prefix();
        let class_list = classes
            .iter()
            .map(|c| format!("{}{}", prefix, c))
            .collect::<Vec<_>>()
            .join(" ");

        self.elements.push(format!(
            r#"{}<rect class="{}" x="{}" y="{}" width="{}" height="{}"{}/>"#,
            self.indent_str(),
            class_list,
            num(bounds.x),
            num(bounds.y),
            num(bounds.width),
            num(bounds.height),
            styles
        ));
    }

    /// Add a bare filled rectangle (heatmap cells, colorbar steps)
    pub fn add_cell(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        self.elements.push(format!(
            r#"{}<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            self.indent_str(),
            num(x),
            num(y),
            num(w),
            num(h),
            fill
        ));
    }

    /// Add a line element
    pub fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, styles: &str) {
        self.elements.push(format!(
            r#"{}<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            self.indent_str(),
            num(x1),
            num(y1),
            num(x2),
            num(y2),
            styles
        ));
    }

    /// Add a text element
    pub fn add_text(&mut self, text: &TextLayout, class: &str, styles: &str) {
        let prefix = self.prefix();
        let anchor_str = match text.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };

        self.elements.push(format!(
            r#"{}<text class="{}{}" x="{}" y="{}" text-anchor="{}" font-size="{}"{}>{}</text>"#,
            self.indent_str(),
            prefix,
            class,
            num(text.position.x),
            num(text.position.y),
            anchor_str,
            num(text.font_size),
            styles,
            escape_xml(&text.text)
        ));
    }

    /// Open a group element with optional ID, prefixed classes and raw attributes
    pub fn start_group(&mut self, id: Option<&str>, classes: &[&str], attrs: &str) {
        let prefix = self.prefix();
        let id_attr = id
            .map(|i| format!(r#" id="{}{}""#, prefix, escape_xml(i)))
            .unwrap_or_default();
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            let list = classes
                .iter()
                .map(|c| format!("{}{}", prefix, c))
                .collect::<Vec<_>>()
                .join(" ");
            format!(r#" class="{}""#, list)
        };

        self.elements.push(format!(
            "{}<g{}{}{}>",
            self.indent_str(),
            id_attr,
            class_attr,
            attrs
        ));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string
    ///
    /// The viewBox is the figure's tight bounds; width and height match it
    /// one user unit per pixel.
    pub fn build(self, viewbox: BoundingBox) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        // XML declaration for standalone
        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        // SVG root element
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}" font-family="{}">"#,
            num(viewbox.width),
            num(viewbox.height),
            num(viewbox.x),
            num(viewbox.y),
            num(viewbox.width),
            num(viewbox.height),
            escape_xml(&self.config.font_family)
        ));
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a figure to an SVG string
pub fn render_svg(figure: &Figure, cmap: &Colormap, config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    let text_style = format!(r#" fill="{}""#, config.foreground);

    builder.add_rect(
        figure.bounds,
        &["background"],
        &format!(r#" fill="{}""#, config.background),
    );

    if let Some(title) = &figure.suptitle {
        builder.add_text(title, "suptitle", &text_style);
    }

    let mut masked = 0;
    for panel in &figure.panels {
        masked += render_panel(panel, figure, cmap, config, &mut builder);
    }
    if masked > 0 {
        debug!(cells = masked, "masked cells without a log-scale value");
    }

    render_colorbar(&figure.colorbar, cmap, config, &mut builder);

    builder.build(figure.bounds)
}

/// Render one heatmap panel; returns the number of masked cells
fn render_panel(
    panel: &PanelLayout,
    figure: &Figure,
    cmap: &Colormap,
    config: &SvgConfig,
    builder: &mut SvgBuilder,
) -> usize {
    let matrix = &panel.matrix;
    let id = format!("panel-{}-{}", panel.cell.row, panel.cell.col);
    builder.start_group(Some(&id), &["panel"], "");

    builder.start_group(None, &["heatmap"], r#" shape-rendering="crispEdges""#);
    let cell_w = panel.bounds.width / matrix.cols() as f64;
    let cell_h = panel.bounds.height / matrix.rows() as f64;
    let mut masked = 0;
    for (row, col, value) in matrix.cells() {
        let Some(t) = value.and_then(|v| figure.norm.normalize(v)) else {
            masked += 1;
            continue;
        };
        builder.add_cell(
            panel.bounds.x + col as f64 * cell_w,
            panel.bounds.y + row as f64 * cell_h,
            cell_w,
            cell_h,
            &cmap.map(t).to_hex(),
        );
    }
    builder.end_group();

    builder.add_rect(
        panel.bounds,
        &["frame"],
        &format!(r#" fill="none" stroke="{}" stroke-width="1""#, config.foreground),
    );
    builder.add_text(
        &panel.title,
        "title",
        &format!(r#" fill="{}""#, config.foreground),
    );

    builder.end_group();
    masked
}

fn render_colorbar(
    colorbar: &ColorbarLayout,
    cmap: &Colormap,
    config: &SvgConfig,
    builder: &mut SvgBuilder,
) {
    let bounds = colorbar.bounds;
    builder.start_group(Some("colorbar"), &["colorbar"], "");

    builder.start_group(None, &["gradient"], r#" shape-rendering="crispEdges""#);
    let lut = cmap.lut();
    let step = bounds.height / lut.len() as f64;
    for (i, color) in lut.iter().enumerate() {
        // lowest value at the bottom
        let y = bounds.bottom() - (i + 1) as f64 * step;
        builder.add_cell(bounds.x, y, bounds.width, step, &color.to_hex());
    }
    builder.end_group();

    builder.add_rect(
        bounds,
        &["frame"],
        &format!(r#" fill="none" stroke="{}" stroke-width="1""#, config.foreground),
    );

    let tick_style = format!(r#" stroke="{}" stroke-width="1""#, config.foreground);
    let label_style = format!(r#" fill="{}""#, config.foreground);
    for tick in &colorbar.ticks {
        builder.add_line(
            bounds.right(),
            tick.y,
            bounds.right() + colorbar.tick_length,
            tick.y,
            &tick_style,
        );
        builder.add_text(&tick.label, "tick", &label_style);
    }

    builder.end_group();
}

/// Format a coordinate with at most three decimals
fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
