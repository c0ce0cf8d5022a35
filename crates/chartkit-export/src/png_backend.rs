//! PNG raster backend
//!
//! Draws the shared scene onto the internal canvas and encodes it with the
//! `png` crate. Text marks are geometry-free and skipped; the raster export
//! is visually faithful for the chart body, the SVG export carries the
//! typography.

use crate::error::ExportResult;
use crate::raster::{parse_color, Canvas};
use crate::scene::{build_scene, Mark};
use chartkit_chart::RenderedChart;

/// Render a chart as PNG bytes
pub fn to_png(chart: &RenderedChart) -> ExportResult<Vec<u8>> {
    let scene = build_scene(chart);
    let mut canvas = Canvas::new(scene.width, scene.height, parse_color(&scene.background));

    for mark in &scene.marks {
        match mark {
            Mark::Rect { x, y, w, h, color } => {
                canvas.fill_rect(*x, *y, *w, *h, parse_color(color));
            }
            Mark::Line {
                points,
                color,
                width,
            } => {
                canvas.polyline(points, *width, parse_color(color));
            }
            Mark::Circle { cx, cy, r, color } => {
                canvas.fill_circle(*cx, *cy, *r, parse_color(color));
            }
            Mark::Polygon { points, color } => {
                canvas.fill_polygon(points, parse_color(color));
            }
            Mark::Wedge {
                cx,
                cy,
                r,
                start,
                end,
                color,
            } => {
                canvas.fill_wedge(*cx, *cy, *r, *start, *end, parse_color(color));
            }
            Mark::Text { .. } => {}
        }
    }

    let bytes = encode(&canvas)?;
    log::debug!(
        "encoded {}x{} png ({} bytes)",
        canvas.width(),
        canvas.height(),
        bytes.len()
    );
    Ok(bytes)
}

fn encode(canvas: &Canvas) -> ExportResult<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, canvas.width(), canvas.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(canvas.pixels())?;
    }
    Ok(out)
}
