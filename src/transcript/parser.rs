//! Timed-text parsing for WebVTT-style and SubRip-style captions.
//!
//! Both parsers are lenient: cues that cannot be read are skipped and the
//! result holds whatever well-formed segments were found, possibly none.

use super::TranscriptSegment;
use regex::Regex;
use std::sync::LazyLock;

/// Time range on the second line of a SubRip block, comma or dot decimals.
static SRT_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2}:\d{2}:\d{2}(?:[,.]\d{1,3})?)\s*-->\s*(\d{1,2}:\d{2}:\d{2}(?:[,.]\d{1,3})?)")
        .expect("valid SRT range pattern")
});

/// Supported timed-text formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimedTextFormat {
    /// WebVTT-style cues (`00:00:07.000 --> 00:00:15.000`).
    Vtt,
    /// SubRip-style numbered blocks (`00:00:07,000 --> 00:00:15,000`).
    Srt,
}

impl TimedTextFormat {
    /// Pick a format from a file name or URL path.
    pub fn from_path(path: &str) -> Option<Self> {
        let lower = path.to_lowercase();
        if lower.ends_with(".srt") {
            Some(TimedTextFormat::Srt)
        } else if lower.ends_with(".vtt") {
            Some(TimedTextFormat::Vtt)
        } else {
            None
        }
    }

    /// Guess the format from content: SubRip puts a comma-decimal range on
    /// the second line of its first block.
    pub fn sniff(text: &str) -> Self {
        let second_line = text
            .trim_start()
            .lines()
            .nth(1)
            .unwrap_or_default();

        if second_line.contains("-->") && second_line.contains(',') {
            TimedTextFormat::Srt
        } else {
            TimedTextFormat::Vtt
        }
    }
}

impl std::str::FromStr for TimedTextFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vtt" | "webvtt" => Ok(TimedTextFormat::Vtt),
            "srt" | "subrip" => Ok(TimedTextFormat::Srt),
            _ => Err(format!("Unknown timed-text format: {}. Use vtt or srt.", s)),
        }
    }
}

/// Parse text in the given format.
pub fn parse(text: &str, format: TimedTextFormat) -> Vec<TranscriptSegment> {
    match format {
        TimedTextFormat::Vtt => parse_vtt(text),
        TimedTextFormat::Srt => parse_srt(text),
    }
}

/// Parse WebVTT-style cues.
///
/// Every line holding a `-->` marker opens a cue; the non-blank lines that
/// follow, up to a blank line or the end of input, are joined with single
/// spaces to form the cue text.
pub fn parse_vtt(text: &str) -> Vec<TranscriptSegment> {
    let lines: Vec<&str> = text.lines().collect();
    let mut segments = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        i += 1;

        if !line.contains("-->") {
            continue;
        }

        let mut text_lines = Vec::new();
        while i < lines.len() && !lines[i].trim().is_empty() {
            text_lines.push(lines[i].trim());
            i += 1;
        }

        let Some((start, end)) = parse_range(line) else {
            continue;
        };

        let segment = TranscriptSegment::new(start, end, text_lines.join(" "));
        if segment.is_well_formed() {
            segments.push(segment);
        }
    }

    segments
}

/// Parse SubRip-style blocks.
///
/// Blocks are separated by blank lines. The second line of each block must
/// hold the time range; the remaining lines are joined as the text. Blocks
/// without a readable range are skipped.
pub fn parse_srt(text: &str) -> Vec<TranscriptSegment> {
    let mut segments = Vec::new();

    for block in split_blocks(text) {
        let lines: Vec<&str> = block.iter().map(|l| l.trim()).collect();
        if lines.len() < 2 {
            continue;
        }

        let Some(caps) = SRT_RANGE.captures(lines[1]) else {
            continue;
        };

        let (Some(start), Some(end)) = (parse_timestamp(&caps[1]), parse_timestamp(&caps[2])) else {
            continue;
        };

        let segment = TranscriptSegment::new(start, end, lines[2..].join(" "));
        if segment.is_well_formed() {
            segments.push(segment);
        }
    }

    segments
}

/// Convert `H:MM:SS.mmm`, `MM:SS.mmm` or `SS.mmm` into seconds.
///
/// A comma is accepted as the decimal separator. Returns `None` for anything
/// that is not a non-negative finite time.
pub fn parse_timestamp(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    let parts: Vec<&str> = normalized.split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }

    let (last, leading) = parts.split_last()?;
    let mut total = 0.0;
    for part in leading {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        total = total * 60.0 + part.parse::<f64>().ok()?;
    }

    if last.is_empty() || !last.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    let seconds: f64 = last.parse().ok()?;
    let total = total * 60.0 + seconds;

    (total.is_finite() && total >= 0.0).then_some(total)
}

/// Parse a `start --> end [cue settings]` line.
fn parse_range(line: &str) -> Option<(f64, f64)> {
    let (start, rest) = line.split_once("-->")?;
    let end = rest.split_whitespace().next()?;
    Some((parse_timestamp(start)?, parse_timestamp(end)?))
}

/// Split text into groups of non-blank lines.
fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("00:00:07.000"), Some(7.0));
        assert_eq!(parse_timestamp("00:07.000"), Some(7.0));
        assert_eq!(parse_timestamp("1:02:03.500"), Some(3723.5));
        assert_eq!(parse_timestamp("00:01:01,250"), Some(61.25));
        assert_eq!(parse_timestamp("12"), Some(12.0));
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("aa:bb:cc"), None);
        assert_eq!(parse_timestamp("1:2:3:4"), None);
        assert_eq!(parse_timestamp("-1:00"), None);
        assert_eq!(parse_timestamp("00:xx.5"), None);
    }

    #[test]
    fn test_parse_vtt() {
        let vtt = "WEBVTT\n\n1\n00:00:00.000 --> 00:00:07.000\nHello there.\nSecond line.\n\n2\n00:00:07.000 --> 00:00:15.500 align:start\nNext cue.\n";
        let segments = parse_vtt(vtt);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start, 0.0);
        assert_eq!(segments[0].end, 7.0);
        assert_eq!(segments[0].text, "Hello there. Second line.");
        assert_eq!(segments[1].start, 7.0);
        assert_eq!(segments[1].end, 15.5);
        assert_eq!(segments[1].text, "Next cue.");
    }

    #[test]
    fn test_parse_vtt_short_timestamps_and_crlf() {
        let vtt = "WEBVTT\r\n\r\n00:07.000 --> 00:15.000\r\nShort form.\r\n";
        let segments = parse_vtt(vtt);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start, 7.0);
        assert_eq!(segments[0].end, 15.0);
        assert_eq!(segments[0].text, "Short form.");
    }

    #[test]
    fn test_parse_vtt_drops_malformed_cues() {
        let vtt = "WEBVTT\n\nnonsense --> 00:00:02.000\nBad start.\n\n00:00:05.000 --> 00:00:03.000\nBackwards.\n\n00:00:06.000 --> 00:00:08.000\n\n00:00:09.000 --> 00:00:10.000\nGood.\n";
        let segments = parse_vtt(vtt);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "Good.");
    }

    #[test]
    fn test_parse_vtt_garbage_is_empty() {
        assert!(parse_vtt("").is_empty());
        assert!(parse_vtt("just some words\nwith no cues").is_empty());
    }

    #[test]
    fn test_parse_srt() {
        let srt = "1\n00:00:01,000 --> 00:00:04,500\nFirst line\ncontinued\n\n2\n00:00:05,000 --> 00:00:09,000\nSecond\n";
        let segments = parse_srt(srt);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start, 1.0);
        assert_eq!(segments[0].end, 4.5);
        assert_eq!(segments[0].text, "First line continued");
        assert_eq!(segments[1].text, "Second");
    }

    #[test]
    fn test_parse_srt_skips_blocks_without_range() {
        let srt = "1\nnot a range\nText\n\n2\n00:00:05,000 --> 00:00:09,000\nKept\n\n3\n";
        let segments = parse_srt(srt);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "Kept");
    }

    #[test]
    fn test_sniff_format() {
        assert_eq!(TimedTextFormat::sniff("1\n00:00:01,000 --> 00:00:02,000\nx"), TimedTextFormat::Srt);
        assert_eq!(TimedTextFormat::sniff("WEBVTT\n\n00:00.000 --> 00:01.000\nx"), TimedTextFormat::Vtt);
        assert_eq!(TimedTextFormat::from_path("talk.SRT"), Some(TimedTextFormat::Srt));
        assert_eq!(TimedTextFormat::from_path("https://x/sample.vtt"), Some(TimedTextFormat::Vtt));
        assert_eq!(TimedTextFormat::from_path("notes.txt"), None);
    }
}
