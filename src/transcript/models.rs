//! Data models for timed transcripts.

use serde::{Deserialize, Serialize};

/// A single time-stamped span of transcript text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Caption text, lines joined with single spaces.
    pub text: String,
}

impl TranscriptSegment {
    /// Create a new transcript segment.
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Duration of this segment in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether `t` falls inside this segment, bounds included.
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t <= self.end
    }

    /// Distance from `t` to the closer of the two boundaries.
    pub fn distance_to(&self, t: f64) -> f64 {
        (t - self.start).abs().min((t - self.end).abs())
    }

    /// A segment is well formed when it has a positive span and some text.
    pub fn is_well_formed(&self) -> bool {
        self.start >= 0.0 && self.end > self.start && !self.text.trim().is_empty()
    }
}

/// A complete transcript for one video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Video ID this transcript belongs to.
    pub video_id: String,
    /// Segments in chronological order.
    pub segments: Vec<TranscriptSegment>,
    /// Full transcript text (concatenated segments).
    pub full_text: String,
    /// End of the last segment, in seconds.
    pub duration_seconds: f64,
}

impl Transcript {
    /// Create a new transcript from segments.
    pub fn new(video_id: impl Into<String>, segments: Vec<TranscriptSegment>) -> Self {
        let full_text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let duration_seconds = segments
            .iter()
            .map(|s| s.end)
            .fold(0.0f64, f64::max);

        Self {
            video_id: video_id.into(),
            segments,
            full_text,
            duration_seconds,
        }
    }

    /// Format the transcript with timestamps for display.
    pub fn format_with_timestamps(&self) -> String {
        self.segments
            .iter()
            .map(|s| format!("[{} - {}] {}", format_timestamp(s.start), format_timestamp(s.end), s.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Format seconds as MM:SS or HH:MM:SS.
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0) as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}
