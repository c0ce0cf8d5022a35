//! Time-indexed chart kinds: time series, candlestick

use super::{basic, table_of, RenderSeries, SeriesData};
use crate::error::{ChartError, ChartResult};
use crate::kind::ChartKind;
use chartkit_core::DataSource;

/// The OHLC component names a candlestick needs
const OHLC: [&str; 4] = ["open", "high", "low", "close"];

/// Time series: the first column is the time index, rendered exactly like
/// a line chart over it.
pub fn time_series(data: &DataSource) -> ChartResult<Vec<RenderSeries>> {
    basic::xy_series(ChartKind::TimeSeries, data)
}

/// Candlestick: one series per OHLC component, points are (row index,
/// value). Components are matched by column name, case-insensitive;
/// a table without named components must carry at least four columns,
/// taken as open/high/low/close in order.
pub fn candlestick_series(data: &DataSource) -> ChartResult<Vec<RenderSeries>> {
    let table = table_of(data, ChartKind::Candlestick)?;

    let named: Vec<_> = OHLC
        .iter()
        .filter_map(|name| {
            table
                .columns()
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(name))
        })
        .collect();

    let components: Vec<_> = if named.len() == 4 {
        named
    } else if table.column_count() >= 4 {
        table.columns().iter().take(4).collect()
    } else {
        return Err(ChartError::InvalidData {
            kind: "candlestick",
            message: "requires open/high/low/close columns".into(),
        });
    };

    Ok(components
        .iter()
        .zip(OHLC)
        .map(|(col, component)| RenderSeries {
            label: component.to_string(),
            data: SeriesData::Points(
                col.values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| [i as f64, v])
                    .collect(),
            ),
        })
        .collect())
}
