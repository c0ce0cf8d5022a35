//! Chart geometry
//!
//! Turns a [`RenderedChart`] into a flat list of drawing marks in pixel
//! space. Both image backends consume the same scene, so the vector and
//! raster exports of a chart always show the same geometry.

use chartkit_chart::{ChartKind, RenderSeries, RenderedChart, SeriesData};

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;

const COLOR_BACKGROUND: &str = "#FFFFFF";
const COLOR_FRAME: &str = "#303133";
const COLOR_GRID: &str = "#E4E7ED";
const COLOR_WICK: &str = "#606266";
const COLOR_UP: &str = "#67C23A";
const COLOR_DOWN: &str = "#F56C6C";
const COLOR_MISSING: &str = "#EEEEEE";

/// Text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// A drawing primitive in pixel coordinates (origin top-left)
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: String,
    },
    Line {
        points: Vec<(f64, f64)>,
        color: String,
        width: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        color: String,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        color: String,
    },
    Wedge {
        cx: f64,
        cy: f64,
        r: f64,
        start: f64,
        end: f64,
        color: String,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        size: f64,
        anchor: Anchor,
        vertical: bool,
    },
}

/// A fully laid-out chart ready for a backend
#[derive(Debug, Clone)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub marks: Vec<Mark>,
}

/// The plot rectangle plus the data ranges mapped onto it
struct Frame {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Frame {
    fn map_x(&self, x: f64) -> f64 {
        self.x0 + (x - self.x_min) / (self.x_max - self.x_min) * (self.x1 - self.x0)
    }

    fn map_y(&self, y: f64) -> f64 {
        // Pixel y grows downward
        self.y1 - (y - self.y_min) / (self.y_max - self.y_min) * (self.y1 - self.y0)
    }
}

/// Build the drawing scene for a rendered chart.
pub fn build_scene(chart: &RenderedChart) -> Scene {
    let width = chart.config.width;
    let height = chart.config.height;
    let mut marks = Vec::new();

    if !chart.config.title.is_empty() {
        marks.push(Mark::Text {
            x: width as f64 / 2.0,
            y: MARGIN_TOP / 2.0 + 5.0,
            content: chart.config.title.clone(),
            size: 16.0,
            anchor: Anchor::Middle,
            vertical: false,
        });
    }

    match chart.kind {
        ChartKind::Pie => pie_marks(chart, &mut marks),
        ChartKind::Heatmap | ChartKind::Surface | ChartKind::Contour => {
            grid_marks(chart, &mut marks)
        }
        _ => cartesian_marks(chart, &mut marks),
    }

    Scene {
        width,
        height,
        background: COLOR_BACKGROUND.to_string(),
        marks,
    }
}

fn palette_color(chart: &RenderedChart, index: usize) -> String {
    let colors = &chart.config.style.colors;
    colors[index % colors.len()].clone()
}

fn plot_rect(chart: &RenderedChart) -> (f64, f64, f64, f64) {
    (
        MARGIN_LEFT,
        MARGIN_TOP,
        chart.config.width as f64 - MARGIN_RIGHT,
        chart.config.height as f64 - MARGIN_BOTTOM,
    )
}

fn finite_points(series: &RenderSeries) -> Vec<[f64; 2]> {
    match &series.data {
        SeriesData::Points(points) => points
            .iter()
            .copied()
            .filter(|p| p[0].is_finite() && p[1].is_finite())
            .collect(),
        SeriesData::Grid(_) => Vec::new(),
    }
}

/// Largest point count across series; the slot count for indexed kinds
fn slot_count(chart: &RenderedChart) -> usize {
    chart
        .series
        .iter()
        .map(|s| finite_points(s).len())
        .max()
        .unwrap_or(0)
        .max(1)
}

fn pad_range(min: f64, max: f64) -> (f64, f64) {
    if min == max {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

/// Data ranges per kind. Bars and histograms anchor y at zero; slot-indexed
/// kinds span the slots with half-slot margins.
fn data_ranges(chart: &RenderedChart) -> ((f64, f64), (f64, f64)) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for series in &chart.series {
        for p in finite_points(series) {
            x_min = x_min.min(p[0]);
            x_max = x_max.max(p[0]);
            y_min = y_min.min(p[1]);
            y_max = y_max.max(p[1]);
        }
    }
    if !x_min.is_finite() {
        return ((0.0, 1.0), (0.0, 1.0));
    }

    let slots = slot_count(chart) as f64;
    match chart.kind {
        ChartKind::Bar | ChartKind::Candlestick | ChartKind::BoxPlot | ChartKind::ViolinPlot => {
            let y = if chart.kind == ChartKind::Bar {
                pad_range(y_min.min(0.0), y_max.max(0.0))
            } else {
                pad_range(y_min, y_max)
            };
            // Slot axes for box/violin run over the series, not the points
            let x = match chart.kind {
                ChartKind::BoxPlot | ChartKind::ViolinPlot => {
                    (-0.5, chart.series.len() as f64 - 0.5)
                }
                _ => (-0.5, slots - 0.5),
            };
            (x, y)
        }
        ChartKind::Histogram => {
            let bin = histogram_bin_width(chart);
            (
                (x_min - bin / 2.0, x_max + bin / 2.0),
                pad_range(0.0, y_max.max(0.0)),
            )
        }
        _ => (pad_range(x_min, x_max), pad_range(y_min, y_max)),
    }
}

fn histogram_bin_width(chart: &RenderedChart) -> f64 {
    for series in &chart.series {
        let points = finite_points(series);
        if points.len() >= 2 {
            return points[1][0] - points[0][0];
        }
    }
    1.0
}

// === Axes ===

/// Step sizes of 1/2/5 x 10^k covering about `target` intervals
fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    let span = max - min;
    if !(span.is_finite()) || span <= 0.0 {
        return vec![min];
    }
    let raw_step = span / target as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;
    let step = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    } * magnitude;

    let mut ticks = Vec::new();
    let mut tick = (min / step).ceil() * step;
    while tick <= max + step * 1e-9 {
        // Snap values like 0.30000000000000004 back onto the grid
        ticks.push((tick / step).round() * step);
        tick += step;
    }
    ticks
}

fn format_tick(v: f64) -> String {
    let rounded = (v * 1e6).round() / 1e6;
    format!("{}", rounded)
}

fn axis_marks(chart: &RenderedChart, frame: &Frame, marks: &mut Vec<Mark>) {
    // Frame border
    marks.push(Mark::Line {
        points: vec![
            (frame.x0, frame.y0),
            (frame.x0, frame.y1),
            (frame.x1, frame.y1),
        ],
        color: COLOR_FRAME.to_string(),
        width: 1.0,
    });

    let show_grid = chart.config.style.show_grid;

    for tick in nice_ticks(frame.y_min, frame.y_max, 5) {
        let y = frame.map_y(tick);
        if show_grid {
            marks.push(Mark::Line {
                points: vec![(frame.x0, y), (frame.x1, y)],
                color: COLOR_GRID.to_string(),
                width: 1.0,
            });
        }
        marks.push(Mark::Text {
            x: frame.x0 - 6.0,
            y: y + 4.0,
            content: format_tick(tick),
            size: 11.0,
            anchor: Anchor::End,
            vertical: false,
        });
    }

    for tick in nice_ticks(frame.x_min, frame.x_max, 6) {
        let x = frame.map_x(tick);
        if show_grid {
            marks.push(Mark::Line {
                points: vec![(x, frame.y0), (x, frame.y1)],
                color: COLOR_GRID.to_string(),
                width: 1.0,
            });
        }
        marks.push(Mark::Text {
            x,
            y: frame.y1 + 16.0,
            content: format_tick(tick),
            size: 11.0,
            anchor: Anchor::Middle,
            vertical: false,
        });
    }

    if !chart.config.x_axis_label.is_empty() {
        marks.push(Mark::Text {
            x: (frame.x0 + frame.x1) / 2.0,
            y: frame.y1 + 36.0,
            content: chart.config.x_axis_label.clone(),
            size: 13.0,
            anchor: Anchor::Middle,
            vertical: false,
        });
    }
    if !chart.config.y_axis_label.is_empty() {
        marks.push(Mark::Text {
            x: 16.0,
            y: (frame.y0 + frame.y1) / 2.0,
            content: chart.config.y_axis_label.clone(),
            size: 13.0,
            anchor: Anchor::Middle,
            vertical: true,
        });
    }
}

fn legend_marks(chart: &RenderedChart, frame: &Frame, marks: &mut Vec<Mark>) {
    if !chart.config.style.show_legend {
        return;
    }
    for (i, series) in chart.series.iter().enumerate() {
        let y = frame.y0 + 8.0 + i as f64 * 16.0;
        marks.push(Mark::Rect {
            x: frame.x1 - 90.0,
            y: y - 5.0,
            w: 10.0,
            h: 10.0,
            color: palette_color(chart, i),
        });
        marks.push(Mark::Text {
            x: frame.x1 - 76.0,
            y: y + 4.0,
            content: series.label.clone(),
            size: 11.0,
            anchor: Anchor::Start,
            vertical: false,
        });
    }
}

// === Cartesian kinds ===

fn cartesian_marks(chart: &RenderedChart, marks: &mut Vec<Mark>) {
    let (x0, y0, x1, y1) = plot_rect(chart);
    let ((x_min, x_max), (y_min, y_max)) = data_ranges(chart);
    let frame = Frame {
        x0,
        y0,
        x1,
        y1,
        x_min,
        x_max,
        y_min,
        y_max,
    };

    axis_marks(chart, &frame, marks);

    match chart.kind {
        ChartKind::Line | ChartKind::TimeSeries => line_series_marks(chart, &frame, marks),
        ChartKind::Scatter => scatter_marks(chart, &frame, marks),
        ChartKind::Bar => bar_marks(chart, &frame, marks),
        ChartKind::Histogram => histogram_marks(chart, &frame, marks),
        ChartKind::BoxPlot => box_marks(chart, &frame, marks),
        ChartKind::ViolinPlot => violin_marks(chart, &frame, marks),
        ChartKind::Candlestick => candlestick_marks(chart, &frame, marks),
        ChartKind::Pie | ChartKind::Heatmap | ChartKind::Surface | ChartKind::Contour => {
            unreachable!("handled by dedicated builders")
        }
    }

    if !matches!(chart.kind, ChartKind::Candlestick) {
        legend_marks(chart, &frame, marks);
    }
}

fn line_series_marks(chart: &RenderedChart, frame: &Frame, marks: &mut Vec<Mark>) {
    for (i, series) in chart.series.iter().enumerate() {
        let points = finite_points(series)
            .iter()
            .map(|p| (frame.map_x(p[0]), frame.map_y(p[1])))
            .collect::<Vec<_>>();
        if points.len() >= 2 {
            marks.push(Mark::Line {
                points,
                color: palette_color(chart, i),
                width: 2.0,
            });
        } else if let Some(&(cx, cy)) = points.first() {
            marks.push(Mark::Circle {
                cx,
                cy,
                r: 3.0,
                color: palette_color(chart, i),
            });
        }
    }
}

fn scatter_marks(chart: &RenderedChart, frame: &Frame, marks: &mut Vec<Mark>) {
    for (i, series) in chart.series.iter().enumerate() {
        let color = palette_color(chart, i);
        for p in finite_points(series) {
            marks.push(Mark::Circle {
                cx: frame.map_x(p[0]),
                cy: frame.map_y(p[1]),
                r: 3.0,
                color: color.clone(),
            });
        }
    }
}

fn bar_marks(chart: &RenderedChart, frame: &Frame, marks: &mut Vec<Mark>) {
    let slots = slot_count(chart) as f64;
    let slot_width = (frame.x1 - frame.x0) / slots;
    let group_width = slot_width * 0.7;
    let bar_width = group_width / chart.series.len() as f64;
    let base = frame.map_y(0.0f64.clamp(frame.y_min, frame.y_max));

    for (i, series) in chart.series.iter().enumerate() {
        let color = palette_color(chart, i);
        for p in finite_points(series) {
            let center = frame.map_x(p[0]);
            let x = center - group_width / 2.0 + i as f64 * bar_width;
            let top = frame.map_y(p[1]);
            let (y, h) = if top <= base {
                (top, base - top)
            } else {
                (base, top - base)
            };
            marks.push(Mark::Rect {
                x,
                y,
                w: bar_width * 0.9,
                h,
                color: color.clone(),
            });
        }
    }
}

fn histogram_marks(chart: &RenderedChart, frame: &Frame, marks: &mut Vec<Mark>) {
    let bin = histogram_bin_width(chart);
    let base = frame.map_y(0.0);

    for (i, series) in chart.series.iter().enumerate() {
        let color = palette_color(chart, i);
        for p in finite_points(series) {
            let left = frame.map_x(p[0] - bin / 2.0 * 0.95);
            let right = frame.map_x(p[0] + bin / 2.0 * 0.95);
            let top = frame.map_y(p[1]);
            marks.push(Mark::Rect {
                x: left,
                y: top,
                w: right - left,
                h: base - top,
                color: color.clone(),
            });
        }
    }
}

fn box_marks(chart: &RenderedChart, frame: &Frame, marks: &mut Vec<Mark>) {
    let slot_width = (frame.x1 - frame.x0) / chart.series.len() as f64;
    let box_width = slot_width * 0.5;

    for (i, series) in chart.series.iter().enumerate() {
        let points = finite_points(series);
        if points.len() != 5 {
            continue;
        }
        let (min, q1, median, q3, max) = (
            points[0][1],
            points[1][1],
            points[2][1],
            points[3][1],
            points[4][1],
        );
        let center = frame.map_x(i as f64);
        let color = palette_color(chart, i);

        // Whisker spine
        marks.push(Mark::Line {
            points: vec![(center, frame.map_y(min)), (center, frame.map_y(max))],
            color: COLOR_WICK.to_string(),
            width: 1.0,
        });
        // Interquartile box
        marks.push(Mark::Rect {
            x: center - box_width / 2.0,
            y: frame.map_y(q3),
            w: box_width,
            h: frame.map_y(q1) - frame.map_y(q3),
            color,
        });
        // Median
        marks.push(Mark::Line {
            points: vec![
                (center - box_width / 2.0, frame.map_y(median)),
                (center + box_width / 2.0, frame.map_y(median)),
            ],
            color: COLOR_FRAME.to_string(),
            width: 2.0,
        });
    }
}

fn violin_marks(chart: &RenderedChart, frame: &Frame, marks: &mut Vec<Mark>) {
    let slot_width = (frame.x1 - frame.x0) / chart.series.len() as f64;
    let half_width = slot_width * 0.45;

    for (i, series) in chart.series.iter().enumerate() {
        let points = finite_points(series);
        if points.is_empty() {
            continue;
        }
        let center = frame.map_x(i as f64);

        // Right side down, left side back up
        let mut outline = Vec::with_capacity(points.len() * 2);
        for p in &points {
            outline.push((center + p[1] * half_width, frame.map_y(p[0])));
        }
        for p in points.iter().rev() {
            outline.push((center - p[1] * half_width, frame.map_y(p[0])));
        }
        marks.push(Mark::Polygon {
            points: outline,
            color: palette_color(chart, i),
        });
    }
}

fn candlestick_marks(chart: &RenderedChart, frame: &Frame, marks: &mut Vec<Mark>) {
    // Series arrive as open/high/low/close in order
    if chart.series.len() != 4 {
        return;
    }
    let component = |j: usize| finite_points(&chart.series[j]);
    let (open, high, low, close) = (component(0), component(1), component(2), component(3));
    let candles = open.len().min(high.len()).min(low.len()).min(close.len());

    let slot_width = (frame.x1 - frame.x0) / candles.max(1) as f64;
    let body_width = slot_width * 0.6;

    for i in 0..candles {
        let center = frame.map_x(open[i][0]);

        marks.push(Mark::Line {
            points: vec![
                (center, frame.map_y(low[i][1])),
                (center, frame.map_y(high[i][1])),
            ],
            color: COLOR_WICK.to_string(),
            width: 1.0,
        });

        let (o, c) = (open[i][1], close[i][1]);
        let color = if c >= o { COLOR_UP } else { COLOR_DOWN };
        let top = frame.map_y(o.max(c));
        let bottom = frame.map_y(o.min(c));
        marks.push(Mark::Rect {
            x: center - body_width / 2.0,
            y: top,
            w: body_width,
            h: (bottom - top).max(1.0),
            color: color.to_string(),
        });
    }
}

// === Pie ===

fn pie_marks(chart: &RenderedChart, marks: &mut Vec<Mark>) {
    let (x0, y0, x1, y1) = plot_rect(chart);
    let cx = (x0 + x1) / 2.0;
    let cy = (y0 + y1) / 2.0;
    let r = ((x1 - x0).min(y1 - y0) / 2.0) * 0.85;

    let slices: Vec<[f64; 2]> = chart
        .series
        .first()
        .map(finite_points)
        .unwrap_or_default();
    let total: f64 = slices.iter().map(|p| p[1]).sum();
    if total <= 0.0 {
        return;
    }

    let mut angle = -std::f64::consts::FRAC_PI_2;
    for (i, slice) in slices.iter().enumerate() {
        let sweep = slice[1] / total * std::f64::consts::TAU;
        marks.push(Mark::Wedge {
            cx,
            cy,
            r,
            start: angle,
            end: angle + sweep,
            color: palette_color(chart, i),
        });
        angle += sweep;
    }
}

// === Matrix kinds ===

/// Two-stop color ramp for grid cells, low to high
fn ramp(t: f64) -> String {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: f64, b: f64| (a + (b - a) * t) as u8;
    // #313695 -> #A50026
    format!(
        "#{:02X}{:02X}{:02X}",
        lerp(0x31 as f64, 0xA5 as f64),
        lerp(0x36 as f64, 0x00 as f64),
        lerp(0x95 as f64, 0x26 as f64)
    )
}

fn grid_marks(chart: &RenderedChart, marks: &mut Vec<Mark>) {
    let (x0, y0, x1, y1) = plot_rect(chart);

    let grid = match chart.series.first().map(|s| &s.data) {
        Some(SeriesData::Grid(grid)) if !grid.is_empty() => grid,
        _ => return,
    };
    let rows = grid.len();
    let cols = grid[0].len();

    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for row in grid {
        for &v in row {
            if v.is_finite() {
                lo = lo.min(v);
                hi = hi.max(v);
            }
        }
    }
    let span = if hi > lo { hi - lo } else { 1.0 };

    let cell_w = (x1 - x0) / cols as f64;
    let cell_h = (y1 - y0) / rows as f64;
    for (i, row) in grid.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            let color = if v.is_finite() {
                ramp((v - lo) / span)
            } else {
                COLOR_MISSING.to_string()
            };
            marks.push(Mark::Rect {
                x: x0 + j as f64 * cell_w,
                y: y0 + i as f64 * cell_h,
                w: cell_w,
                h: cell_h,
                color,
            });
        }
    }

    marks.push(Mark::Line {
        points: vec![
            (x0, y0),
            (x1, y0),
            (x1, y1),
            (x0, y1),
            (x0, y0),
        ],
        color: COLOR_FRAME.to_string(),
        width: 1.0,
    });
}
