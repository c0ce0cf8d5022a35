//! Chartkit CLI - dataset transform and chart rendering tool

use anyhow::{bail, Context, Result};
use chartkit::prelude::*;
use chartkit::{DataContent, DataDecoder, DecodeOptions};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "chartkit")]
#[command(
    author,
    version,
    about = "Transform tabular data with formulas and render charts"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: import, validate, preprocess, transform, chart
    Render {
        /// Input dataset file (JSON: {"columns": [...]} or {"matrix": [...]})
        data: PathBuf,

        /// Transform formula, e.g. "normalize(x)" (skipped if absent)
        #[arg(short, long)]
        formula: Option<String>,

        /// Chart type (line, bar, scatter, pie, histogram, box_plot,
        /// violin_plot, heatmap, 3d_surface, contour, time_series,
        /// candlestick)
        #[arg(short, long, default_value = "line")]
        chart: String,

        /// Output file; format follows the extension (.json, .svg, .png)
        #[arg(short, long)]
        output: PathBuf,

        /// Chart title
        #[arg(long)]
        title: Option<String>,

        /// Canvas width in pixels
        #[arg(long, default_value = "800")]
        width: u32,

        /// Canvas height in pixels
        #[arg(long, default_value = "600")]
        height: u32,
    },

    /// Parse and validate a formula without evaluating it
    Check {
        /// Formula text, e.g. "moving_average(x, 5) + 1"
        formula: String,
    },

    /// List the formula functions available, by family
    Functions,

    /// Show information about a dataset file
    Info {
        /// Input dataset file
        data: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            data,
            formula,
            chart,
            output,
            title,
            width,
            height,
        } => render(
            &data,
            formula.as_deref(),
            &chart,
            &output,
            title.as_deref(),
            width,
            height,
        ),
        Commands::Check { formula } => check(&formula),
        Commands::Functions => functions(),
        Commands::Info { data } => info(&data),
    }
}

// === Dataset decoding (the CLI is the decode collaborator) ===

#[derive(Deserialize)]
struct DatasetFile {
    #[serde(default)]
    columns: Option<Vec<ColumnSpec>>,
    #[serde(default)]
    matrix: Option<Vec<Vec<f64>>>,
}

#[derive(Deserialize)]
struct ColumnSpec {
    name: String,
    values: Vec<f64>,
}

struct JsonDatasetDecoder;

impl DataDecoder for JsonDatasetDecoder {
    fn decode(
        &self,
        bytes: &[u8],
        format: DataFormat,
        _options: &DecodeOptions,
    ) -> chartkit::CoreResult<DataSource> {
        let file: DatasetFile = serde_json::from_slice(bytes)
            .map_err(|e| chartkit::CoreError::Decode(e.to_string()))?;

        if let Some(matrix) = file.matrix {
            let matrix = MatrixData::new(matrix)?;
            return Ok(DataSource::matrix(format, matrix));
        }

        let specs = file
            .columns
            .ok_or_else(|| chartkit::CoreError::Decode("expected 'columns' or 'matrix'".into()))?;
        let columns = specs
            .into_iter()
            .map(|c| Column::new(c.name, c.values))
            .collect();
        Ok(DataSource::table(format, TableData::new(columns)?))
    }
}

fn load_dataset(path: &Path) -> Result<DataSource> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    let decoder = JsonDatasetDecoder;
    decoder
        .decode(&bytes, DataFormat::Json, &DecodeOptions::default())
        .with_context(|| format!("Failed to decode '{}'", path.display()))
}

// === Commands ===

fn render(
    data_path: &Path,
    formula: Option<&str>,
    chart_type: &str,
    output: &Path,
    title: Option<&str>,
    width: u32,
    height: u32,
) -> Result<()> {
    let kind: ChartKind = chart_type
        .parse()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let format: ExportFormat = match output.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.parse().map_err(|e| anyhow::anyhow!("{}", e))?,
        None => bail!("Output file needs a .json, .svg or .png extension"),
    };

    let source = load_dataset(data_path)?;
    let mut config = ChartConfig::default().with_size(width, height);
    if let Some(title) = title {
        config = config.with_title(title);
    }

    let registry = ChartRegistry::new();
    let result = Orchestrator::new(&registry).run(
        FlowInput::Source(source),
        formula,
        ChartRequest::new(kind, config),
    );

    for step in &result.steps {
        let timing = format!("{:.1}ms", step.elapsed.as_secs_f64() * 1000.0);
        match step.error.as_deref() {
            None => eprintln!("  {:<10} ok     {}", step.kind.as_str(), timing),
            Some(error) => eprintln!("  {:<10} failed {}  {}", step.kind.as_str(), timing, error),
        }
    }

    if result.status != RunState::Completed {
        let (kind, message) = result.error.expect("failed run carries an error");
        bail!("Run failed [{}]: {}", kind, message);
    }

    let rendered = result.rendered.expect("completed run carries a chart");
    let bytes = export(&rendered, format).map_err(|e| anyhow::anyhow!("{}", e))?;
    std::fs::write(output, &bytes)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;

    eprintln!(
        "Wrote {} ({} bytes, {})",
        output.display(),
        bytes.len(),
        format.content_type()
    );
    Ok(())
}

fn check(formula: &str) -> Result<()> {
    let expression = match FormulaExpression::parse(formula) {
        Ok(expression) => expression,
        Err(error) => bail!("Parse failed: {}", error),
    };

    let validation = validate(&expression, &SandboxLimits::default());
    if !validation.valid {
        eprintln!("Formula is invalid:");
        for violation in &validation.violations {
            eprintln!("  [{}] {}", violation.kind, violation.message);
        }
        bail!("{} violation(s)", validation.violations.len());
    }

    let info = expression.info();
    println!("ok");
    println!(
        "  variables:  {}",
        expression
            .free_variables
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  nodes:      {}", info.node_count);
    println!("  depth:      {}", info.depth);
    println!("  calls:      {}", info.call_count);
    println!("  complexity: {}", info.complexity);
    Ok(())
}

fn functions() -> Result<()> {
    for family in ChartService::new().capabilities() {
        println!("{}:", family.category);
        for function in family.functions {
            println!("  {}", function);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_decode_columns() {
        let file = write_temp(r#"{"columns": [{"name": "x", "values": [1, 2, 3]}]}"#);
        let source = load_dataset(file.path()).unwrap();
        assert_eq!(source.shape(), (3, 1));
    }

    #[test]
    fn test_decode_matrix() {
        let file = write_temp(r#"{"matrix": [[1, 2], [3, 4]]}"#);
        let source = load_dataset(file.path()).unwrap();
        assert!(source.as_matrix().is_some());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let file = write_temp(r#"{"rows": []}"#);
        assert!(load_dataset(file.path()).is_err());
    }

    #[test]
    fn test_render_end_to_end() {
        let data = write_temp(r#"{"columns": [{"name": "x", "values": [1, 2, 3, 4]}]}"#);
        let out_dir = tempfile::tempdir().unwrap();
        let out = out_dir.path().join("chart.svg");

        render(
            data.path(),
            Some("normalize(x)"),
            "line",
            &out,
            Some("demo"),
            320,
            240,
        )
        .unwrap();

        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("demo"));
    }

    #[test]
    fn test_render_fails_on_bad_formula() {
        let data = write_temp(r#"{"columns": [{"name": "x", "values": [1, 2]}]}"#);
        let out_dir = tempfile::tempdir().unwrap();
        let out = out_dir.path().join("chart.png");

        let result = render(data.path(), Some("system(x)"), "line", &out, None, 100, 100);
        assert!(result.is_err());
        assert!(!out.exists());
    }
}

fn info(path: &Path) -> Result<()> {
    let source = load_dataset(path)?;
    let (rows, cols) = source.shape();
    println!("id:      {}", source.id);
    println!("format:  {}", source.format);
    println!("shape:   {} rows x {} columns", rows, cols);
    match &source.content {
        DataContent::Table(table) => {
            for column in table.columns() {
                let missing = column.nan_ratio() * 100.0;
                println!("  {:<16} {:>4} values, {:.0}% missing", column.name, column.len(), missing);
            }
        }
        DataContent::Matrix(matrix) => {
            if let Some((lo, hi)) = matrix.value_range() {
                println!("  values in [{}, {}]", lo, hi);
            }
        }
    }
    Ok(())
}
