//! Terminal rendering for timeblocks.

use anyhow::Result;
use owo_colors::OwoColorize;
use timeblock_core::Timeblock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Timeblock {
    fn render(&self) -> String {
        let minutes = self.duration().num_minutes().max(0);
        let length = format!("({}h{:02})", minutes / 60, minutes % 60);

        format!("  {} - {} {}", self.start_time, self.end_time, length.dimmed())
    }
}

/// Blocks grouped under a bold date heading, one line per block.
pub fn render_blocks(blocks: &[Timeblock]) -> String {
    if blocks.is_empty() {
        return "No timeblocks".dimmed().to_string();
    }

    let mut lines = Vec::new();
    let mut current_date = None;

    for block in blocks {
        if current_date != Some(block.date) {
            if current_date.is_some() {
                lines.push(String::new());
            }
            lines.push(block.date.format("%a %Y-%m-%d").to_string().bold().to_string());
            current_date = Some(block.date);
        }
        lines.push(block.render());
    }

    lines.join("\n")
}

pub fn print_blocks(blocks: &[Timeblock], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(blocks)?),
        OutputFormat::Text => println!("{}", render_blocks(blocks)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_blocks_by_date() {
        let blocks = vec![
            Timeblock::parse("2024-01-01", "09:00:00+00", "10:30:00+00").unwrap(),
            Timeblock::parse("2024-01-01", "13:00:00+00", "14:00:00+00").unwrap(),
            Timeblock::parse("2024-01-02", "09:00:00+00", "09:15:00+00").unwrap(),
        ];

        let out = render_blocks(&blocks);

        assert_eq!(out.matches("2024-01-01").count(), 1);
        assert_eq!(out.matches("2024-01-02").count(), 1);
        assert!(out.contains("09:00:00+00 - 10:30:00+00"));
        assert!(out.contains("1h30"));
        assert!(out.contains("0h15"));
    }

    #[test]
    fn evening_block_shows_time_to_midnight() {
        let evening = Timeblock::parse("2024-01-01", "22:30:00+00", "00:00:00+00").unwrap();
        let whole_day = Timeblock::parse("2024-01-02", "00:00:00+00", "00:00:00+00").unwrap();

        assert!(evening.render().contains("1h30"));
        assert!(whole_day.render().contains("24h00"));
    }

    #[test]
    fn empty_list_says_so() {
        assert!(render_blocks(&[]).contains("No timeblocks"));
    }
}
