//! Chart registry behavior tests

use chartkit::prelude::*;
use std::sync::Arc;

fn data(values: Vec<f64>) -> Arc<DataSource> {
    let table = TableData::new(vec![Column::new("y", values)]).unwrap();
    Arc::new(DataSource::table(DataFormat::Manual, table))
}

/// update replaces bound data only; id and config survive
#[test]
fn test_update_preserves_identity_and_config() {
    let registry = ChartRegistry::new();
    let config = ChartConfig::default()
        .with_title("stable title")
        .with_size(320, 240);
    let id = registry
        .create(data(vec![1.0, 2.0]), ChartKind::Line, config.clone())
        .unwrap();

    registry.update(&id, data(vec![9.0, 8.0, 7.0])).unwrap();

    let rendered = registry.rendered(&id).unwrap();
    assert_eq!(rendered.config, config);
    match &rendered.series[0].data {
        SeriesData::Points(points) => assert_eq!(points.len(), 3),
        other => panic!("expected points, got {:?}", other),
    }
}

/// Explicitly supplied config replaces the old one
#[test]
fn test_update_config_replaces() {
    let registry = ChartRegistry::new();
    let id = registry
        .create(data(vec![1.0]), ChartKind::Line, ChartConfig::default())
        .unwrap();

    registry
        .update_config(&id, ChartConfig::default().with_title("new"))
        .unwrap();
    assert_eq!(registry.rendered(&id).unwrap().config.title, "new");
}

/// Unknown ids are ChartNotFound, and operations on one chart never
/// affect another
#[test]
fn test_unknown_id_and_isolation() {
    let registry = ChartRegistry::new();
    let keep = registry
        .create(data(vec![1.0]), ChartKind::Line, ChartConfig::default())
        .unwrap();
    let drop = registry
        .create(data(vec![2.0]), ChartKind::Bar, ChartConfig::default())
        .unwrap();

    assert!(registry.remove(&drop));
    let err = registry.rendered(&drop).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ChartNotFound);

    // The surviving chart is untouched
    assert_eq!(registry.rendered(&keep).unwrap().kind, ChartKind::Line);
    assert_eq!(registry.len(), 1);
}

/// Ids are unique across concurrent creates, and same-id operations
/// serialize without panics or half-written definitions
#[test]
fn test_concurrent_creates_and_updates() {
    let registry = Arc::new(ChartRegistry::new());

    let shared = registry
        .create(data(vec![0.0]), ChartKind::Line, ChartConfig::default())
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..8 {
        let registry = Arc::clone(&registry);
        let shared = shared.clone();
        handles.push(std::thread::spawn(move || {
            let own = registry
                .create(
                    data(vec![i as f64]),
                    ChartKind::Scatter,
                    ChartConfig::default(),
                )
                .unwrap();
            registry
                .update(&shared, data(vec![i as f64, 1.0]))
                .unwrap();
            // Never observes a half-written definition
            let rendered = registry.rendered(&shared).unwrap();
            assert_eq!(rendered.kind, ChartKind::Line);
            own
        }));
    }

    let ids: std::collections::HashSet<_> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(ids.len(), 8);
    assert_eq!(registry.len(), 9);
}
