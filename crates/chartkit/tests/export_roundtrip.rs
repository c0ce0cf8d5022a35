//! Export round-trip and encoding tests

use chartkit::prelude::*;

fn rendered(kind: ChartKind, columns: Vec<Column>) -> RenderedChart {
    let data = DataSource::table(DataFormat::Manual, TableData::new(columns).unwrap());
    render(
        kind,
        &ChartConfig::default()
            .with_title("round trip")
            .with_axis_labels("x", "y"),
        &data,
    )
    .unwrap()
}

/// The JSON export is lossless: re-importing reproduces the rendered
/// definition exactly, for every table-backed kind
#[test]
fn test_json_round_trip_all_table_kinds() {
    let kinds = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Scatter,
        ChartKind::Pie,
        ChartKind::Histogram,
        ChartKind::BoxPlot,
        ChartKind::ViolinPlot,
        ChartKind::TimeSeries,
    ];

    for kind in kinds {
        let chart = rendered(
            kind,
            vec![Column::new("v", vec![1.0, 2.0, 2.0, 3.0, 5.0, 8.0])],
        );
        let bytes = export(&chart, ExportFormat::Json).unwrap();
        let imported = import_json(&bytes).unwrap();
        assert_eq!(imported, chart, "round trip failed for {}", kind);
    }
}

/// Grid kinds round-trip too
#[test]
fn test_json_round_trip_matrix_kind() {
    let matrix = MatrixData::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    let data = DataSource::matrix(DataFormat::Manual, matrix);
    let chart = render(ChartKind::Heatmap, &ChartConfig::default(), &data).unwrap();

    let bytes = export(&chart, ExportFormat::Json).unwrap();
    assert_eq!(import_json(&bytes).unwrap(), chart);
}

/// Re-rendering an imported definition's data reproduces its render
/// output: exporting twice through the JSON format is stable
#[test]
fn test_json_export_is_stable() {
    let chart = rendered(ChartKind::Line, vec![Column::new("v", vec![1.0, 4.0, 9.0])]);
    let once = export(&chart, ExportFormat::Json).unwrap();
    let twice = export(&import_json(&once).unwrap(), ExportFormat::Json).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_svg_export_shape() {
    let chart = rendered(ChartKind::Scatter, vec![Column::new("v", vec![1.0, 2.0])]);
    let bytes = export(&chart, ExportFormat::Svg).unwrap();
    let svg = String::from_utf8(bytes).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("round trip"));
    assert!(svg.contains("<circle"));
}

#[test]
fn test_png_export_signature_and_determinism() {
    let chart = rendered(
        ChartKind::Histogram,
        vec![Column::new("v", vec![1.0, 1.0, 2.0, 3.0, 3.0, 3.0])],
    );
    let bytes = export(&chart, ExportFormat::Png).unwrap();
    assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    assert_eq!(bytes, export(&chart, ExportFormat::Png).unwrap());
}

#[test]
fn test_unknown_format_rejected() {
    let err = "gif".parse::<ExportFormat>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedExportFormat);
}

#[test]
fn test_content_types_match_format() {
    assert_eq!(ExportFormat::Json.content_type(), "application/json");
    assert_eq!(ExportFormat::Svg.content_type(), "image/svg+xml");
    assert_eq!(ExportFormat::Png.content_type(), "image/png");
}
