//! CLI output formatting utilities.

use crate::quiz::Question;
use crate::transcript::format_timestamp;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Print a transcript segment.
    pub fn segment(start: f64, end: f64, text: &str) {
        println!(
            "  {} {}",
            style(format!("[{} - {}]", format_timestamp(start), format_timestamp(end))).cyan(),
            content_preview(text, 120)
        );
    }

    /// Print a question with numbered options.
    pub fn question(number: usize, question: &Question) {
        println!("\n{} {}", style(format!("Q{}.", number)).bold(), question.prompt());
        if let Question::Mcq { options, .. } = question {
            for (i, option) in options.iter().enumerate() {
                println!("   {} {}", style(format!("{})", i + 1)).cyan(), option);
            }
        }
    }

    /// Print a timestamped simulation line.
    pub fn event(at: f64, kind: &str, detail: &str) {
        println!(
            "{} {} {}",
            style(format!("{:>7.1}s", at)).dim(),
            style(kind).yellow().bold(),
            detail
        );
    }

    /// Print a score out of 100.
    pub fn score(label: &str, score: u8) {
        let styled = match score {
            80..=100 => style(score.to_string()).green().bold(),
            50..=79 => style(score.to_string()).yellow().bold(),
            _ => style(score.to_string()).red().bold(),
        };
        println!("  {}: {}/100", style(label).dim(), styled);
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Truncate content with ellipsis.
fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        let cut: String = content.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_preview() {
        assert_eq!(content_preview("short\ntext", 20), "short text");
        assert_eq!(content_preview("abcdef", 3), "abc...");
        assert_eq!(content_preview("ééééé", 2), "éé...");
    }
}
