// SPDX-License-Identifier: MIT

//! Input resolution: literal text, fetched URL, or piped stdin
//!
//! Exactly one source is used per run, picked by fixed precedence:
//! literal text, then URL, then piped standard input.

use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::io::{IsTerminal, Read};
use url::Url;

use crate::error::{ConcheckError, Result};

/// Where the markup came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Literal,
    Url(Url),
    Piped,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Literal => write!(f, "literal text"),
            Origin::Url(url) => write!(f, "{}", url),
            Origin::Piped => write!(f, "standard input"),
        }
    }
}

/// Markup text for a single run. Never blank.
#[derive(Debug, Clone)]
pub struct RawDocument {
    text: String,
    origin: Origin,
}

impl RawDocument {
    /// Returns `None` when `text` is empty or whitespace only
    pub fn new(text: impl Into<String>, origin: Origin) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self { text, origin })
    }

    pub fn literal(text: impl Into<String>) -> Option<Self> {
        Self::new(text, Origin::Literal)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }
}

/// Fetches a page body over the network
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String>;
}

/// Single GET with the client's default policies; no retries
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String> {
        log::info!("Fetching {}", url);

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ConcheckError::fetch(url.as_str(), e))?;

        let status = resp.status();
        let resp = resp
            .error_for_status()
            .map_err(|e| ConcheckError::fetch(url.as_str(), e))?;

        let text = resp
            .text()
            .await
            .map_err(|e| ConcheckError::fetch(url.as_str(), e))?;

        log::debug!("Fetched {} bytes from {} ({})", text.len(), url, status);
        Ok(text)
    }
}

/// Data piped into the process, if any
pub trait PipedInput: Send {
    /// Returns `None` when nothing is piped (e.g. stdin is a terminal)
    fn read_piped(&mut self) -> std::io::Result<Option<String>>;
}

/// The process's standard input; skipped entirely when it is a terminal
pub struct StdinInput;

impl PipedInput for StdinInput {
    fn read_piped(&mut self) -> std::io::Result<Option<String>> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            log::debug!("stdin is a terminal, not reading piped input");
            return Ok(None);
        }

        let mut text = String::new();
        stdin.lock().read_to_string(&mut text)?;
        Ok(Some(text))
    }
}

/// Pick the markup for this run.
///
/// Lower-precedence sources supplied alongside a higher one are ignored.
pub async fn resolve(
    text: Option<String>,
    url: Option<&Url>,
    fetcher: &dyn PageFetcher,
    piped: &mut dyn PipedInput,
) -> Result<RawDocument> {
    if let Some(raw) = text.and_then(RawDocument::literal) {
        if let Some(url) = url {
            log::debug!("Literal text given, ignoring --url {}", url);
        }
        return Ok(raw);
    }

    if let Some(url) = url {
        let body = fetcher.fetch(url).await?;
        return RawDocument::new(body, Origin::Url(url.clone()))
            .ok_or_else(|| ConcheckError::config(format!("The page at {} is empty", url)));
    }

    let piped = piped.read_piped()?;
    piped
        .and_then(|text| RawDocument::new(text, Origin::Piped))
        .ok_or_else(|| {
            ConcheckError::config(
                "You must either pass directly the content of the webpage you want to check \
                 or the URL to obtain the content (--url)",
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock fetcher that serves a fixed body and counts calls
    struct MockFetcher {
        body: String,
        calls: AtomicUsize,
    }

    impl MockFetcher {
        fn new(body: &str) -> Self {
            Self {
                body: body.to_string(),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageFetcher for MockFetcher {
        async fn fetch(&self, _url: &Url) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }
    }

    /// Piped input with fixed content that records whether it was read
    struct MockPiped {
        text: Option<String>,
        read: bool,
    }

    impl MockPiped {
        fn new(text: Option<&str>) -> Self {
            Self {
                text: text.map(str::to_string),
                read: false,
            }
        }
    }

    impl PipedInput for MockPiped {
        fn read_piped(&mut self) -> std::io::Result<Option<String>> {
            self.read = true;
            Ok(self.text.clone())
        }
    }

    fn url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    #[test]
    fn test_raw_document_rejects_blank() {
        assert!(RawDocument::literal("").is_none());
        assert!(RawDocument::literal(" \n\t ").is_none());
        assert!(RawDocument::literal("<p>").is_some());
    }

    #[tokio::test]
    async fn test_literal_wins_over_url_and_piped() {
        let fetcher = MockFetcher::new("<p>from url</p>");
        let mut piped = MockPiped::new(Some("<p>from stdin</p>"));

        let raw = resolve(
            Some("<p>literal</p>".to_string()),
            Some(&url()),
            &fetcher,
            &mut piped,
        )
        .await
        .unwrap();

        assert_eq!(raw.text(), "<p>literal</p>");
        assert_eq!(raw.origin(), &Origin::Literal);
        assert_eq!(fetcher.calls(), 0);
        assert!(!piped.read);
    }

    #[tokio::test]
    async fn test_url_wins_over_piped() {
        let fetcher = MockFetcher::new("<p>from url</p>");
        let mut piped = MockPiped::new(Some("<p>from stdin</p>"));

        let raw = resolve(None, Some(&url()), &fetcher, &mut piped)
            .await
            .unwrap();

        assert_eq!(raw.text(), "<p>from url</p>");
        assert_eq!(raw.origin(), &Origin::Url(url()));
        assert_eq!(fetcher.calls(), 1);
        assert!(!piped.read);
    }

    #[tokio::test]
    async fn test_blank_literal_falls_through_to_url() {
        let fetcher = MockFetcher::new("<p>from url</p>");
        let mut piped = MockPiped::new(None);

        let raw = resolve(Some("   ".to_string()), Some(&url()), &fetcher, &mut piped)
            .await
            .unwrap();

        assert_eq!(raw.text(), "<p>from url</p>");
    }

    #[tokio::test]
    async fn test_piped_used_last() {
        let fetcher = MockFetcher::new("unused");
        let mut piped = MockPiped::new(Some("<p>from stdin</p>"));

        let raw = resolve(None, None, &fetcher, &mut piped).await.unwrap();

        assert_eq!(raw.text(), "<p>from stdin</p>");
        assert_eq!(raw.origin(), &Origin::Piped);
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_fetched_page_is_config_error() {
        let fetcher = MockFetcher::new("");
        let mut piped = MockPiped::new(Some("<p>from stdin</p>"));

        let err = resolve(None, Some(&url()), &fetcher, &mut piped)
            .await
            .unwrap_err();

        assert!(matches!(err, ConcheckError::Config(_)));
        assert!(!piped.read);
    }

    #[tokio::test]
    async fn test_no_source_is_config_error() {
        let fetcher = MockFetcher::new("unused");
        let mut piped = MockPiped::new(None);

        let err = resolve(None, None, &fetcher, &mut piped).await.unwrap_err();

        assert!(matches!(err, ConcheckError::Config(_)));
        assert!(piped.read);
    }

    #[tokio::test]
    async fn test_empty_pipe_is_config_error() {
        let fetcher = MockFetcher::new("unused");
        let mut piped = MockPiped::new(Some(""));

        let err = resolve(None, None, &fetcher, &mut piped).await.unwrap_err();

        assert!(matches!(err, ConcheckError::Config(_)));
    }

    #[test]
    fn test_origin_display() {
        assert_eq!(Origin::Literal.to_string(), "literal text");
        assert_eq!(Origin::Piped.to_string(), "standard input");
        assert_eq!(Origin::Url(url()).to_string(), "https://example.com/page");
    }
}
