//! Parsed formula expressions

use crate::ast::Expr;
use crate::error::FormulaResult;
use crate::parser::parse_formula;
use std::collections::{BTreeMap, BTreeSet};

/// A parsed formula: text, AST, free variables and declared parameters.
///
/// `free_variables` is exactly the set of variable references reachable in
/// the AST; after validation it is guaranteed not to contain any capability
/// registry name. `parameters` collects the literal numeric arguments found
/// in call positions (e.g. the window size of `moving_average(x, 5)`).
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaExpression {
    /// Original formula text
    pub text: String,
    /// Validated AST
    pub ast: Expr,
    /// Variable names referenced by the AST, in sorted order
    pub free_variables: BTreeSet<String>,
    /// Literal numeric call arguments, keyed `const_0`, `const_1`, ...
    pub parameters: BTreeMap<String, f64>,
}

impl FormulaExpression {
    /// Parse formula text into an expression.
    ///
    /// This is purely syntactic; run [`crate::validate::validate`] (or
    /// [`crate::evaluator::compile`]) afterwards to enforce the capability
    /// allow-list and the complexity ceiling.
    pub fn parse(text: &str) -> FormulaResult<Self> {
        let ast = parse_formula(text)?;

        let mut free_variables = BTreeSet::new();
        let mut parameters = BTreeMap::new();
        let mut const_index = 0usize;

        ast.walk(&mut |node| match node {
            Expr::Variable(name) => {
                free_variables.insert(name.clone());
            }
            Expr::Call { args, .. } => {
                for arg in args {
                    if let Expr::Number(n) = arg {
                        parameters.insert(format!("const_{}", const_index), *n);
                        const_index += 1;
                    }
                }
            }
            _ => {}
        });

        Ok(Self {
            text: text.to_string(),
            ast,
            free_variables,
            parameters,
        })
    }

    /// Complexity score: node count plus nesting depth
    pub fn complexity(&self) -> usize {
        self.ast.node_count() + self.ast.depth()
    }

    /// Detailed report for boundary consumers
    pub fn info(&self) -> ExpressionInfo {
        let mut call_count = 0;
        self.ast.walk(&mut |node| {
            if matches!(node, Expr::Call { .. }) {
                call_count += 1;
            }
        });
        ExpressionInfo {
            text: self.text.clone(),
            node_count: self.ast.node_count(),
            depth: self.ast.depth(),
            call_count,
            variable_count: self.free_variables.len(),
            complexity: self.complexity(),
        }
    }
}

/// Complexity breakdown of a parsed expression
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionInfo {
    pub text: String,
    pub node_count: usize,
    pub depth: usize,
    pub call_count: usize,
    pub variable_count: usize,
    pub complexity: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_free_variables() {
        let expr = FormulaExpression::parse("sin(x) + y * 2").unwrap();
        let vars: Vec<_> = expr.free_variables.iter().cloned().collect();
        assert_eq!(vars, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_constants_are_not_variables() {
        let expr = FormulaExpression::parse("x + pi").unwrap();
        assert_eq!(expr.free_variables.len(), 1);
        assert!(expr.free_variables.contains("x"));
    }

    #[test]
    fn test_literal_call_parameters() {
        let expr = FormulaExpression::parse("moving_average(x, 5) + quantile(y, 0.9)").unwrap();
        assert_eq!(expr.parameters.get("const_0"), Some(&5.0));
        assert_eq!(expr.parameters.get("const_1"), Some(&0.9));
        // Window sizes are parameters, not free variables
        assert_eq!(expr.free_variables.len(), 2);
    }

    #[test]
    fn test_info() {
        let expr = FormulaExpression::parse("mean(x) + 1").unwrap();
        let info = expr.info();
        assert_eq!(info.node_count, 4);
        assert_eq!(info.call_count, 1);
        assert_eq!(info.variable_count, 1);
        assert_eq!(info.complexity, info.node_count + info.depth);
    }
}
