//! Timed transcripts: parsing, lookup, export and loading.

mod default;
mod format;
mod locator;
mod models;
mod parser;
mod source;

pub use default::{default_segments, DEFAULT_TRANSCRIPT_VTT};
pub use format::{format_transcript, OutputFormat, TranscriptExport};
pub use locator::locate;
pub use models::{format_timestamp, Transcript, TranscriptSegment};
pub use parser::{parse, parse_srt, parse_timestamp, parse_vtt, TimedTextFormat};
pub use source::{load_transcript, LoadedTranscript, TranscriptOrigin};
