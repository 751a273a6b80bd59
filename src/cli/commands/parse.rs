//! Parse command implementation.

use super::load_segments;
use crate::cli::Output;
use crate::config::Settings;
use crate::transcript::{format_transcript, OutputFormat, Transcript};
use anyhow::Result;

/// Run the parse command.
pub async fn run_parse(
    input: Option<&str>,
    format: &str,
    output: Option<String>,
    settings: Settings,
) -> Result<()> {
    let output_format: OutputFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let loaded = load_segments(input, &settings).await;
    let video_id = loaded.origin.to_string();
    let transcript = Transcript::new(video_id, loaded.segments);

    if output_format == OutputFormat::Text && output.is_none() {
        Output::header(&format!("Transcript: {}", loaded.origin));
        Output::kv("Segments", &transcript.segments.len().to_string());
        Output::kv("Duration", &format!("{:.1}s", transcript.duration_seconds));
        println!();
        for seg in &transcript.segments {
            Output::segment(seg.start, seg.end, &seg.text);
        }
        return Ok(());
    }

    let output_str = format_transcript(&transcript, output_format);

    match output {
        Some(path) if path != "-" => {
            std::fs::write(&path, &output_str)?;
            Output::success(&format!(
                "Wrote {} segments to {}",
                transcript.segments.len(),
                path
            ));
        }
        _ => {
            println!("{}", output_str);
        }
    }

    Ok(())
}
