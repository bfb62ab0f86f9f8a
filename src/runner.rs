// SPDX-License-Identifier: MIT

//! One check run: resolve input, parse, evaluate, maybe notify
//!
//! The run is linear. Any error aborts it before the next status line is
//! written, so a failed run never reports partial success.

use std::fmt;
use std::io::Write;
use std::sync::Arc;
use url::Url;

use crate::check::{self, Outcome, ParsedTree, Predicate};
use crate::error::{ConcheckError, Result};
use crate::notify::Notifier;
use crate::source::{self, PageFetcher, PipedInput, RawDocument};

/// Status lines written to the output, in the order they can appear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    NotSatisfied,
    Satisfied,
    NotificationSent,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::NotSatisfied => write!(f, "FINISHED: condition not satisfied."),
            Status::Satisfied => write!(f, "FINISHED: condition satisfied."),
            Status::NotificationSent => write!(f, "FINISHED: notification sent."),
        }
    }
}

/// What the caller asked for
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    /// Literal markup
    pub text: Option<String>,
    pub url: Option<Url>,
    /// Boolean XPath condition
    pub predicate: String,
    /// Address to notify when the condition holds
    pub recipient: Option<String>,
}

pub struct Runner<W: Write> {
    fetcher: Arc<dyn PageFetcher>,
    piped: Box<dyn PipedInput>,
    notifier: Option<Notifier>,
    out: W,
}

impl<W: Write> Runner<W> {
    pub fn new(fetcher: Arc<dyn PageFetcher>, piped: Box<dyn PipedInput>, out: W) -> Self {
        Self {
            fetcher,
            piped,
            notifier: None,
            out,
        }
    }

    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Give back the status output
    pub fn into_output(self) -> W {
        self.out
    }

    pub async fn run(&mut self, invocation: Invocation) -> Result<Outcome> {
        let predicate = Predicate::compile(&invocation.predicate)?;

        let notifier = match (&invocation.recipient, &self.notifier) {
            (Some(_), None) => {
                return Err(ConcheckError::config(
                    "Notification requested but no sender or API key is configured",
                ))
            }
            (Some(recipient), Some(notifier)) => Some((recipient.as_str(), notifier)),
            (None, _) => None,
        };

        let raw = source::resolve(
            invocation.text,
            invocation.url.as_ref(),
            self.fetcher.as_ref(),
            self.piped.as_mut(),
        )
        .await?;
        log::info!("Checking `{}` against {}", predicate, raw.origin());

        let outcome = evaluate_document(&raw, &predicate)?;

        match outcome {
            Outcome::NotSatisfied => {
                writeln!(self.out, "{}", Status::NotSatisfied)?;
            }
            Outcome::Satisfied => {
                writeln!(self.out, "{}", Status::Satisfied)?;

                if let Some((recipient, notifier)) = notifier {
                    notifier.notify(recipient).await?;
                    writeln!(self.out, "{}", Status::NotificationSent)?;
                }
            }
        }

        self.out.flush()?;
        Ok(outcome)
    }
}

/// Parse and evaluate; the tree is dropped before anything is awaited
fn evaluate_document(raw: &RawDocument, predicate: &Predicate) -> Result<Outcome> {
    let tree = ParsedTree::parse(raw);
    check::evaluate(&tree, predicate)
}
