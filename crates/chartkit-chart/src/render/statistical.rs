//! Statistical chart kinds: histogram, box plot, violin plot
//!
//! NaN values are dropped before computing summaries — a missing value
//! has no place in a distribution plot.

use super::{table_of, RenderSeries, SeriesData};
use crate::error::{ChartError, ChartResult};
use crate::kind::ChartKind;
use chartkit_core::DataSource;

/// Bins for violin density profiles
const VIOLIN_BINS: usize = 16;

fn finite_values(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Sturges' rule
fn bin_count(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    (n as f64).log2().ceil() as usize + 1
}

/// Linear-interpolation quantile over sorted values, q in [0, 1]
fn quantile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

fn histogram(values: &[f64], bins: usize) -> Vec<(f64, f64)> {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if lo == hi {
        // Degenerate distribution: one bin holding everything
        return vec![(lo, values.len() as f64)];
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0.0; bins];
    for &v in values {
        let mut bin = ((v - lo) / width) as usize;
        if bin >= bins {
            bin = bins - 1; // v == hi lands in the last bin
        }
        counts[bin] += 1.0;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| (lo + width * (i as f64 + 0.5), count))
        .collect()
}

fn non_empty(values: Vec<f64>, kind: ChartKind, column: &str) -> ChartResult<Vec<f64>> {
    if values.is_empty() {
        return Err(ChartError::InvalidData {
            kind: kind.as_str(),
            message: format!("column '{}' has no finite values", column),
        });
    }
    Ok(values)
}

/// Histogram: per column, points are (bin center, count)
pub fn histogram_series(data: &DataSource) -> ChartResult<Vec<RenderSeries>> {
    let table = table_of(data, ChartKind::Histogram)?;
    let mut series = Vec::with_capacity(table.column_count());

    for col in table.columns() {
        let values = non_empty(finite_values(&col.values), ChartKind::Histogram, &col.name)?;
        let points = histogram(&values, bin_count(values.len()))
            .into_iter()
            .map(|(center, count)| [center, count])
            .collect();
        series.push(RenderSeries {
            label: col.name.clone(),
            data: SeriesData::Points(points),
        });
    }

    Ok(series)
}

/// Box plot: per column, the five-number summary as points
/// (0 min, 1 q1, 2 median, 3 q3, 4 max)
pub fn box_series(data: &DataSource) -> ChartResult<Vec<RenderSeries>> {
    let table = table_of(data, ChartKind::BoxPlot)?;
    let mut series = Vec::with_capacity(table.column_count());

    for col in table.columns() {
        let mut values = non_empty(finite_values(&col.values), ChartKind::BoxPlot, &col.name)?;
        values.sort_by(|a, b| a.total_cmp(b));

        let summary = [
            values[0],
            quantile(&values, 0.25),
            quantile(&values, 0.5),
            quantile(&values, 0.75),
            values[values.len() - 1],
        ];
        series.push(RenderSeries {
            label: col.name.clone(),
            data: SeriesData::Points(
                summary
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| [i as f64, v])
                    .collect(),
            ),
        });
    }

    Ok(series)
}

/// Violin plot: per column, a density profile with points
/// (bin center, density) where density peaks at 1
pub fn violin_series(data: &DataSource) -> ChartResult<Vec<RenderSeries>> {
    let table = table_of(data, ChartKind::ViolinPlot)?;
    let mut series = Vec::with_capacity(table.column_count());

    for col in table.columns() {
        let values = non_empty(finite_values(&col.values), ChartKind::ViolinPlot, &col.name)?;
        let bins = histogram(&values, VIOLIN_BINS);
        let peak = bins.iter().map(|(_, c)| *c).fold(0.0, f64::max).max(1.0);
        let points = bins
            .into_iter()
            .map(|(center, count)| [center, count / peak])
            .collect();
        series.push(RenderSeries {
            label: col.name.clone(),
            data: SeriesData::Points(points),
        });
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartkit_core::{Column, DataFormat, TableData};

    fn source(columns: Vec<Column>) -> DataSource {
        DataSource::table(DataFormat::Manual, TableData::new(columns).unwrap())
    }

    #[test]
    fn test_histogram_counts_sum_to_sample_count() {
        let values: Vec<f64> = (0..100).map(|i| (i % 17) as f64).collect();
        let data = source(vec![Column::new("v", values)]);
        let series = histogram_series(&data).unwrap();
        if let SeriesData::Points(points) = &series[0].data {
            let total: f64 = points.iter().map(|p| p[1]).sum();
            assert_eq!(total, 100.0);
        } else {
            panic!("Expected points");
        }
    }

    #[test]
    fn test_histogram_constant_column() {
        let data = source(vec![Column::new("v", vec![4.0; 10])]);
        let series = histogram_series(&data).unwrap();
        assert_eq!(
            series[0].data,
            SeriesData::Points(vec![[4.0, 10.0]])
        );
    }

    #[test]
    fn test_box_five_number_summary() {
        let data = source(vec![Column::new("v", vec![1.0, 2.0, 3.0, 4.0, 5.0])]);
        let series = box_series(&data).unwrap();
        assert_eq!(
            series[0].data,
            SeriesData::Points(vec![
                [0.0, 1.0],
                [1.0, 2.0],
                [2.0, 3.0],
                [3.0, 4.0],
                [4.0, 5.0]
            ])
        );
    }

    #[test]
    fn test_violin_density_peaks_at_one() {
        let values: Vec<f64> = (0..64).map(|i| ((i * 7) % 13) as f64).collect();
        let data = source(vec![Column::new("v", values)]);
        let series = violin_series(&data).unwrap();
        if let SeriesData::Points(points) = &series[0].data {
            let peak = points.iter().map(|p| p[1]).fold(0.0, f64::max);
            assert_eq!(peak, 1.0);
        } else {
            panic!("Expected points");
        }
    }

    #[test]
    fn test_all_nan_column_rejected() {
        let data = source(vec![Column::new("v", vec![f64::NAN, f64::NAN])]);
        assert!(histogram_series(&data).is_err());
    }
}
