// SPDX-License-Identifier: MIT

//! Mail body template
//!
//! Placeholders are written `{receiver}` and `{satisfaction_time}`. Literal
//! braces (e.g. in a `<style>` block) are doubled: `{{` and `}}`.

use std::fs;
use std::path::Path;

use crate::error::{ConcheckError, Result};

pub const RECEIVER: &str = "receiver";
pub const SATISFACTION_TIME: &str = "satisfaction_time";

/// Template file looked up in the working directory by default
pub const DEFAULT_TEMPLATE_PATH: &str = "template.html";

/// HTML body template with `{receiver}` and `{satisfaction_time}` placeholders
#[derive(Debug, Clone)]
pub struct MailTemplate {
    text: String,
}

impl MailTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Read a template file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            ConcheckError::config(format!(
                "Could not read mail template {}: {}",
                path.display(),
                e
            ))
        })?;
        log::debug!("Loaded mail template from {}", path.display());
        Ok(Self::new(text))
    }

    pub fn render(&self, receiver: &str, satisfaction_time: &str) -> Result<String> {
        render(&self.text, receiver, satisfaction_time)
    }
}

/// Substitute the placeholders in `template`
pub fn render(template: &str, receiver: &str, satisfaction_time: &str) -> Result<String> {
    let mut out = String::with_capacity(template.len() + receiver.len() + satisfaction_time.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' if chars.peek().map(|&(_, next)| next) == Some('{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let rest = &template[pos + 1..];
                let end = rest.find('}').ok_or_else(|| {
                    ConcheckError::template(format!("unclosed '{{' at byte {}", pos))
                })?;
                let name = &rest[..end];

                match name {
                    RECEIVER => out.push_str(receiver),
                    SATISFACTION_TIME => out.push_str(satisfaction_time),
                    other => {
                        return Err(ConcheckError::template(format!(
                            "unknown placeholder '{{{}}}' at byte {}",
                            other, pos
                        )))
                    }
                }

                // skip the name and the closing brace
                for _ in 0..=name.chars().count() {
                    chars.next();
                }
            }
            '}' if chars.peek().map(|&(_, next)| next) == Some('}') => {
                chars.next();
                out.push('}');
            }
            '}' => {
                return Err(ConcheckError::template(format!(
                    "single '}}' at byte {}",
                    pos
                )))
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}
