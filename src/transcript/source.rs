//! Loading timed text from a URL or a local file.
//!
//! Loading never fails outright: when the source cannot be read, or yields
//! no segments, the built-in transcript is substituted.

use super::{default_segments, parse, TimedTextFormat, TranscriptSegment};
use crate::error::{LearnBuddyError, Result};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Where a loaded transcript came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptOrigin {
    Remote(String),
    File(String),
    BuiltIn,
}

impl std::fmt::Display for TranscriptOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptOrigin::Remote(url) => write!(f, "{}", url),
            TranscriptOrigin::File(path) => write!(f, "{}", path),
            TranscriptOrigin::BuiltIn => write!(f, "built-in sample"),
        }
    }
}

/// A loaded transcript and its origin.
#[derive(Debug, Clone)]
pub struct LoadedTranscript {
    pub origin: TranscriptOrigin,
    pub segments: Vec<TranscriptSegment>,
}

impl LoadedTranscript {
    /// Whether the built-in transcript was substituted.
    pub fn is_fallback(&self) -> bool {
        self.origin == TranscriptOrigin::BuiltIn
    }
}

/// Load segments from `source`, or the built-in transcript when `source` is
/// `None` or unusable.
#[instrument(skip(timeout))]
pub async fn load_transcript(source: Option<&str>, timeout: Duration) -> LoadedTranscript {
    let Some(source) = source else {
        debug!("No transcript source configured, using built-in sample");
        return built_in();
    };

    match read_source(source, timeout).await {
        Ok((origin, text)) => {
            let format = TimedTextFormat::from_path(source).unwrap_or_else(|| TimedTextFormat::sniff(&text));
            let segments = parse(&text, format);
            if segments.is_empty() {
                warn!("Transcript at {} has no readable cues, using built-in sample", source);
                return built_in();
            }
            info!("Loaded {} segments from {}", segments.len(), origin);
            LoadedTranscript { origin, segments }
        }
        Err(e) => {
            warn!("Failed to load transcript from {}: {}. Using built-in sample", source, e);
            built_in()
        }
    }
}

/// Fetch or read the raw timed text.
async fn read_source(source: &str, timeout: Duration) -> Result<(TranscriptOrigin, String)> {
    if let Some(url) = remote_url(source) {
        let text = fetch(&url, timeout).await?;
        return Ok((TranscriptOrigin::Remote(url.to_string()), text));
    }

    let path = Path::new(source);
    if !path.exists() {
        return Err(LearnBuddyError::TranscriptSource(format!("File not found: {}", source)));
    }
    let text = tokio::fs::read_to_string(path).await?;
    Ok((TranscriptOrigin::File(source.to_string()), text))
}

async fn fetch(url: &Url, timeout: Duration) -> Result<String> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let response = client.get(url.clone()).send().await?;

    if !response.status().is_success() {
        return Err(LearnBuddyError::TranscriptSource(format!(
            "{} returned HTTP {}",
            url,
            response.status()
        )));
    }

    Ok(response.text().await?)
}

/// Parse `source` as an http(s) URL.
fn remote_url(source: &str) -> Option<Url> {
    Url::parse(source)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
}

fn built_in() -> LoadedTranscript {
    LoadedTranscript {
        origin: TranscriptOrigin::BuiltIn,
        segments: default_segments(),
    }
}
