// SPDX-License-Identifier: MIT

//! Compiled XPath conditions
//!
//! A condition is compiled once, up front, so a malformed expression is
//! reported before any page is fetched.

use std::fmt;
use std::str::FromStr;

use sxd_xpath::{Factory, XPath};

use crate::error::{ConcheckError, Result};

/// A compiled boolean XPath condition
pub struct Predicate {
    expression: String,
    xpath: XPath,
}

impl Predicate {
    /// Compile an XPath 1.0 expression.
    ///
    /// Only the syntax is checked here; whether the expression yields a
    /// boolean is only known once it runs against a document.
    pub fn compile(expression: &str) -> Result<Self> {
        if expression.trim().is_empty() {
            return Err(ConcheckError::PredicateSyntax(
                "the condition is empty".to_string(),
            ));
        }

        let xpath = Factory::new()
            .build(expression)
            .map_err(|e| ConcheckError::PredicateSyntax(format!("{} in `{}`", e, expression)))?
            .ok_or_else(|| {
                ConcheckError::PredicateSyntax(format!("`{}` is not an expression", expression))
            })?;

        Ok(Self {
            expression: expression.to_string(),
            xpath,
        })
    }

    /// The expression as the caller wrote it
    pub fn as_str(&self) -> &str {
        &self.expression
    }

    pub(crate) fn xpath(&self) -> &XPath {
        &self.xpath
    }
}

impl FromStr for Predicate {
    type Err = ConcheckError;

    fn from_str(s: &str) -> Result<Self> {
        Self::compile(s)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.expression).finish()
    }
}
