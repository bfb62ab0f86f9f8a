// SPDX-License-Identifier: MIT

//! Typed error handling for concheck
//!
//! Every error is fatal: the binary reports it and exits non-zero.

use thiserror::Error;

/// Top-level error type for concheck
#[derive(Debug, Error)]
pub enum ConcheckError {
    /// Configuration errors (no input source, missing env vars, unreadable template)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fetching the page failed (transport error or non-success status)
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The predicate could not be compiled
    #[error("Invalid XPath condition: {0}")]
    PredicateSyntax(String),

    /// The predicate compiled but the engine failed while running it
    #[error("Could not evaluate XPath condition: {0}")]
    PredicateEvaluation(String),

    /// The predicate produced something other than a boolean
    #[error(
        "The condition used didn't give a boolean result (got {found}), make sure you are \
         passing a restriction and not a search path"
    )]
    PredicateType { found: String },

    /// The mail template has malformed placeholders
    #[error("Template error: {0}")]
    Template(String),

    /// The email API call failed
    #[error("Notification failed: {0}")]
    Notification(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ConcheckError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a fetch error for the given URL
    pub fn fetch(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Fetch {
            url: url.into(),
            source,
        }
    }

    /// Create a template error
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template(message.into())
    }

    /// Create a notification error
    pub fn notification(message: impl Into<String>) -> Self {
        Self::Notification(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ConcheckError>;
