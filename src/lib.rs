// SPDX-License-Identifier: MIT

//! concheck - check a webpage against a boolean XPath condition and
//! optionally send one notification email when it holds.

pub mod check;
pub mod config;
pub mod error;
pub mod notify;
pub mod runner;
pub mod source;

pub use error::{ConcheckError, Result};
