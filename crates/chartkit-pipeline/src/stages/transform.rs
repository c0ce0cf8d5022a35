//! The transform stage
//!
//! Parses, validates and evaluates the user formula over the current
//! dataset, producing a new derived `DataSource`. Besides its column
//! names, a table exposes `index` (the row index) and positional `col_0`,
//! `col_1`, ... aliases to the formula.

use crate::error::{PipelineError, PipelineResult};
use chartkit_core::{Column, DataContent, DataSource, TableData};
use chartkit_formula::{compile, Bindings, Evaluation, FormulaExpression, Sandbox, Value};

/// Result of a transform: the derived dataset plus the raw evaluation
#[derive(Debug)]
pub struct TransformOutcome {
    pub data: DataSource,
    pub evaluation: Evaluation,
}

/// Apply a formula to a dataset.
pub fn transform(
    source: &DataSource,
    formula_text: &str,
    sandbox: &Sandbox,
) -> PipelineResult<TransformOutcome> {
    let table = match &source.content {
        DataContent::Table(t) => t,
        DataContent::Matrix(_) => {
            return Err(PipelineError::Validation(
                "formulas apply to tabular data, not matrices".into(),
            ))
        }
    };

    let expression = FormulaExpression::parse(formula_text)?;
    let compiled = compile(expression, sandbox.limits())?;

    let bindings = bind_table(table);
    let evaluation = sandbox.evaluate(&compiled, &bindings)?;

    let data = result_source(source, table, &evaluation.value)?;
    Ok(TransformOutcome { data, evaluation })
}

/// Column names, plus `index` and `col_N` aliases where they do not clash
/// with real columns.
fn bind_table(table: &TableData) -> Bindings {
    let mut bindings = Bindings::from_table(table);

    if table.column("index").is_none() {
        let index: Vec<f64> = (0..table.row_count()).map(|i| i as f64).collect();
        bindings.bind("index", index);
    }
    for (i, column) in table.columns().iter().enumerate() {
        let alias = format!("col_{}", i);
        if table.column(&alias).is_none() {
            bindings.bind(alias, column.values.clone());
        }
    }

    bindings
}

/// Shape the evaluation result into a derived dataset. A vector matching
/// the source length lands as a `result` column alongside the source
/// columns; anything else becomes a standalone `result` column.
fn result_source(
    source: &DataSource,
    table: &TableData,
    value: &Value,
) -> PipelineResult<DataSource> {
    let columns = match value {
        Value::Vector(v) if v.len() == table.row_count() => {
            let mut columns = table.columns().to_vec();
            columns.push(Column::new(result_name(table), v.clone()));
            columns
        }
        Value::Vector(v) => vec![Column::new("result", v.clone())],
        Value::Scalar(s) => vec![Column::new("result", vec![*s])],
        Value::Str(_) => {
            return Err(PipelineError::Validation(
                "formula produced a string, expected numeric data".into(),
            ))
        }
    };

    let content = DataContent::Table(TableData::new(columns)?);
    Ok(DataSource::derived(source, content, "transform"))
}

fn result_name(table: &TableData) -> String {
    if table.column("result").is_none() {
        return "result".to_string();
    }
    let mut i = 1;
    loop {
        let name = format!("result_{}", i);
        if table.column(&name).is_none() {
            return name;
        }
        i += 1;
    }
}
