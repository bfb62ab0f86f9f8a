// SPDX-License-Identifier: MIT

//! Condition checking for fetched pages
//!
//! This module parses markup into a queryable tree and evaluates boolean
//! XPath conditions against it. Conditions are restrictions like:
//! - `boolean(//div[@class="active"])`
//! - `count(//li[@class='result']) > 3`
//! - `//span[@id='stock'] = 'In stock'`
//!
//! Selection paths such as `//div` are rejected rather than coerced.

mod document;
mod evaluator;
mod predicate;

pub use document::ParsedTree;
pub use evaluator::{evaluate, query, Outcome, QueryResult};
pub use predicate::Predicate;
