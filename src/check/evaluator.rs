// SPDX-License-Identifier: MIT

//! Condition evaluation against a parsed document

use std::fmt;

use sxd_xpath::{Context, Value};

use super::document::ParsedTree;
use super::predicate::Predicate;
use crate::error::{ConcheckError, Result};

/// Raw result of running a predicate, tagged by XPath value type
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Boolean(bool),
    /// Number of nodes selected
    NodeSet(usize),
    Number(f64),
    String(String),
}

impl From<Value<'_>> for QueryResult {
    fn from(value: Value<'_>) -> Self {
        match value {
            Value::Boolean(b) => QueryResult::Boolean(b),
            Value::Number(n) => QueryResult::Number(n),
            Value::String(s) => QueryResult::String(s),
            Value::Nodeset(nodes) => QueryResult::NodeSet(nodes.size()),
        }
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryResult::Boolean(b) => write!(f, "the boolean {}", b),
            QueryResult::NodeSet(n) => write!(f, "a node-set of {} node(s)", n),
            QueryResult::Number(n) => write!(f, "the number {}", n),
            QueryResult::String(s) => write!(f, "the string {:?}", s),
        }
    }
}

/// Whether the condition holds for the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Satisfied,
    NotSatisfied,
}

impl Outcome {
    pub fn is_satisfied(self) -> bool {
        self == Outcome::Satisfied
    }
}

/// Run a predicate against the document root and return its raw result
pub fn query(tree: &ParsedTree, predicate: &Predicate) -> Result<QueryResult> {
    let context = Context::new();
    let document = tree.document();

    let value = predicate
        .xpath()
        .evaluate(&context, document.root())
        .map_err(|e| ConcheckError::PredicateEvaluation(format!("{} in `{}`", e, predicate)))?;

    Ok(value.into())
}

/// Evaluate a predicate, accepting only a boolean result
pub fn evaluate(tree: &ParsedTree, predicate: &Predicate) -> Result<Outcome> {
    let result = query(tree, predicate)?;
    log::debug!("`{}` evaluated to {}", predicate, result);

    match result {
        QueryResult::Boolean(true) => Ok(Outcome::Satisfied),
        QueryResult::Boolean(false) => Ok(Outcome::NotSatisfied),
        other => Err(ConcheckError::PredicateType {
            found: other.to_string(),
        }),
    }
}
