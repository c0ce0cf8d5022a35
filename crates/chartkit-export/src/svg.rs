//! SVG vector backend
//!
//! Assembles the SVG document directly with `fmt::Write`; the geometry all
//! comes from [`crate::scene`], so SVG and PNG exports always agree.

use crate::scene::{build_scene, Anchor, Mark, Scene};
use chartkit_chart::RenderedChart;
use std::fmt::Write;

/// Render a chart as an SVG document
pub fn to_svg(chart: &RenderedChart) -> String {
    let scene = build_scene(chart);
    let mut out = String::new();
    write_scene(&mut out, &scene);
    out
}

fn write_scene(out: &mut String, scene: &Scene) {
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = scene.width,
        h = scene.height
    );
    let _ = writeln!(
        out,
        r#"  <rect width="{}" height="{}" fill="{}"/>"#,
        scene.width, scene.height, scene.background
    );

    for mark in &scene.marks {
        write_mark(out, mark);
    }

    let _ = writeln!(out, "</svg>");
}

fn write_mark(out: &mut String, mark: &Mark) {
    match mark {
        Mark::Rect { x, y, w, h, color } => {
            let _ = writeln!(
                out,
                r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
                x, y, w, h, color
            );
        }

        Mark::Line {
            points,
            color,
            width,
        } => {
            let mut path = String::new();
            for (i, (x, y)) in points.iter().enumerate() {
                if i > 0 {
                    path.push(' ');
                }
                let _ = write!(path, "{:.2},{:.2}", x, y);
            }
            let _ = writeln!(
                out,
                r#"  <polyline points="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                path, color, width
            );
        }

        Mark::Circle { cx, cy, r, color } => {
            let _ = writeln!(
                out,
                r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
                cx, cy, r, color
            );
        }

        Mark::Polygon { points, color } => {
            let mut path = String::new();
            for (i, (x, y)) in points.iter().enumerate() {
                if i > 0 {
                    path.push(' ');
                }
                let _ = write!(path, "{:.2},{:.2}", x, y);
            }
            let _ = writeln!(out, r#"  <polygon points="{}" fill="{}"/>"#, path, color);
        }

        Mark::Wedge {
            cx,
            cy,
            r,
            start,
            end,
            color,
        } => {
            let (x0, y0) = (cx + r * start.cos(), cy + r * start.sin());
            let (x1, y1) = (cx + r * end.cos(), cy + r * end.sin());
            let large_arc = if end - start > std::f64::consts::PI { 1 } else { 0 };
            let _ = writeln!(
                out,
                r#"  <path d="M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {r:.2} {r:.2} 0 {large_arc} 1 {x1:.2} {y1:.2} Z" fill="{color}"/>"#,
            );
        }

        Mark::Text {
            x,
            y,
            content,
            size,
            anchor,
            vertical,
        } => {
            let anchor = match anchor {
                Anchor::Start => "start",
                Anchor::Middle => "middle",
                Anchor::End => "end",
            };
            let transform = if *vertical {
                format!(r#" transform="rotate(-90 {:.2} {:.2})""#, x, y)
            } else {
                String::new()
            };
            let _ = writeln!(
                out,
                r#"  <text x="{:.2}" y="{:.2}" font-size="{}" font-family="sans-serif" text-anchor="{}"{}>{}</text>"#,
                x,
                y,
                size,
                anchor,
                transform,
                escape_xml(content)
            );
        }
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartkit_chart::{render, ChartConfig, ChartKind};
    use chartkit_core::{Column, DataFormat, DataSource, TableData};

    fn chart(kind: ChartKind, title: &str) -> RenderedChart {
        let table = TableData::new(vec![Column::new("y", vec![1.0, 3.0, 2.0])]).unwrap();
        let data = DataSource::table(DataFormat::Manual, table);
        render(kind, &ChartConfig::default().with_title(title), &data).unwrap()
    }

    #[test]
    fn test_svg_is_well_formed_enough() {
        let svg = to_svg(&chart(ChartKind::Line, "demo"));
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("<polyline"));
        assert!(svg.contains(">demo</text>"));
    }

    #[test]
    fn test_svg_escapes_title() {
        let svg = to_svg(&chart(ChartKind::Line, "a < b & c"));
        assert!(svg.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn test_pie_emits_wedges() {
        let svg = to_svg(&chart(ChartKind::Pie, ""));
        assert!(svg.contains("<path"));
    }
}
