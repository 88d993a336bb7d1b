use std::io::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::{Report, Segment};

/// Report formats the emitter can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Full report as pretty JSON
    #[serde(alias = "json")]
    #[value(alias = "json")]
    Structured,
    /// Segment table as CSV
    #[serde(alias = "csv")]
    #[value(alias = "csv")]
    Tabular,
    /// Speaker-grouped, timestamped text
    #[serde(alias = "txt")]
    #[value(alias = "txt")]
    Transcript,
    /// Segment text only
    Plain,
}

impl OutputFormat {
    /// File name suffix appended to the run's file stem
    pub fn file_suffix(&self) -> &'static str {
        match self {
            OutputFormat::Structured => "report.json",
            OutputFormat::Tabular => "segments.csv",
            OutputFormat::Transcript => "transcript.txt",
            OutputFormat::Plain => "plain.txt",
        }
    }
}

/// Tabular column order
pub const TABULAR_COLUMNS: [&str; 5] = ["start", "end", "speaker_id", "text", "original_text"];

/// Write the full report as JSON; field order follows the report types
pub fn write_structured(report: &Report, writer: &mut dyn Write) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writer.write_all(b"\n")
}

/// Write segments as CSV with a fixed header; unknown bounds are empty cells
pub fn write_tabular(segments: &[Segment], writer: &mut dyn Write) -> std::io::Result<()> {
    writeln!(writer, "{}", TABULAR_COLUMNS.join(","))?;
    for segment in segments {
        let row = [
            format_seconds(segment.start),
            format_seconds(segment.end),
            csv_field(&segment.speaker_id),
            csv_field(&segment.text),
            csv_field(&segment.original_text),
        ];
        writeln!(writer, "{}", row.join(","))?;
    }
    Ok(())
}

/// Write a readable transcript, grouping consecutive segments of the same speaker
pub fn write_transcript(
    segments: &[Segment],
    writer: &mut dyn Write,
    wrap_width: usize,
) -> std::io::Result<()> {
    for block in group_by_speaker(segments) {
        writeln!(
            writer,
            "[{} - {}] {}:",
            format_timestamp(block.start),
            format_timestamp(block.end),
            block.speaker_id
        )?;
        writeln!(writer, "{}", wrap_text(&block.texts.join(" "), wrap_width))?;
        writeln!(writer)?;
    }
    Ok(())
}

/// Write all non-empty segment text as one paragraph
pub fn write_plain(segments: &[Segment], writer: &mut dyn Write) -> std::io::Result<()> {
    let text: Vec<&str> = segments
        .iter()
        .map(|s| s.text.trim())
        .filter(|t| !t.is_empty())
        .collect();
    writeln!(writer, "{}", text.join(" "))
}

/// Consecutive segments of one speaker
#[derive(Debug)]
struct SpeakerBlock<'a> {
    speaker_id: &'a str,
    start: Option<f64>,
    end: Option<f64>,
    texts: Vec<&'a str>,
}

fn group_by_speaker(segments: &[Segment]) -> Vec<SpeakerBlock<'_>> {
    let mut blocks: Vec<SpeakerBlock> = Vec::new();

    for segment in segments.iter().filter(|s| !s.text.trim().is_empty()) {
        let (start, end) = match segment.interval().bounds() {
            Some((start, end)) => (Some(start), Some(end)),
            None => (None, None),
        };

        match blocks.last_mut() {
            Some(block) if block.speaker_id == segment.speaker_id => {
                block.start = block.start.or(start);
                block.end = match (block.end, end) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    (a, b) => a.or(b),
                };
                block.texts.push(segment.text.trim());
            }
            _ => blocks.push(SpeakerBlock {
                speaker_id: &segment.speaker_id,
                start,
                end,
                texts: vec![segment.text.trim()],
            }),
        }
    }

    blocks
}

/// Seconds with millisecond precision; empty when unknown
fn format_seconds(seconds: Option<f64>) -> String {
    seconds.map(|s| format!("{:.3}", s)).unwrap_or_default()
}

/// Quote a CSV field when it contains a delimiter, quote or line break
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Format seconds as HH:MM:SS
fn format_timestamp(seconds: Option<f64>) -> String {
    match seconds {
        Some(seconds) => {
            let total = seconds.max(0.0) as u64;
            format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
        }
        None => "--:--:--".to_string(),
    }
}

/// Greedy word wrap; a word longer than `width` gets a line of its own
fn wrap_text(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let fits = current.chars().count() + 1 + word.chars().count() <= width;
        if !current.is_empty() && !fits {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TimeInterval, UNKNOWN_SPEAKER};

    fn segments() -> Vec<Segment> {
        let mut first = Segment::new(0, TimeInterval::known(0.0, 4.0), "A", "um hello there");
        first.text = "hello there".to_string();
        vec![
            first,
            Segment::new(1, TimeInterval::known(4.5, 5.0), "A", "again"),
            Segment::new(2, TimeInterval::known(6.0, 9.0), "B", "how are you, \"friend\""),
            Segment::new(3, TimeInterval::new(None, None), UNKNOWN_SPEAKER, "lost"),
        ]
    }

    fn render(f: impl FnOnce(&mut dyn Write) -> std::io::Result<()>) -> String {
        let mut buffer: Vec<u8> = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(Some(0.0)), "00:00:00");
        assert_eq!(format_timestamp(Some(65.9)), "00:01:05");
        assert_eq!(format_timestamp(Some(3661.0)), "01:01:01");
        assert_eq!(format_timestamp(None), "--:--:--");
    }

    #[test]
    fn test_tabular_layout() {
        let csv = render(|w| write_tabular(&segments(), w));
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "start,end,speaker_id,text,original_text");
        assert_eq!(lines[1], "0.000,4.000,A,hello there,um hello there");
        assert_eq!(
            lines[3],
            r#"6.000,9.000,B,"how are you, ""friend""","how are you, ""friend""""#
        );
        assert_eq!(lines[4], ",,UNKNOWN,lost,lost");
    }

    #[test]
    fn test_tabular_is_byte_stable() {
        let first = render(|w| write_tabular(&segments(), w));
        let second = render(|w| write_tabular(&segments(), w));
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_transcript_groups_consecutive_speaker_segments() {
        let text = render(|w| write_transcript(&segments(), w, 80));
        assert_eq!(
            text,
            "[00:00:00 - 00:00:05] A:\nhello there again\n\n\
             [00:00:06 - 00:00:09] B:\nhow are you, \"friend\"\n\n\
             [--:--:-- - --:--:--] UNKNOWN:\nlost\n\n"
        );
    }

    #[test]
    fn test_plain_skips_empty_text() {
        let mut segs = segments();
        segs[1].text.clear();
        let text = render(|w| write_plain(&segs, w));
        assert_eq!(text, "hello there how are you, \"friend\" lost\n");
    }

    #[test]
    fn test_transcript_wraps_speaker_block() {
        let segs = vec![
            Segment::new(0, TimeInterval::known(0.0, 4.0), "A", "the brake pads squeal"),
            Segment::new(1, TimeInterval::known(4.0, 7.0), "A", "on cold mornings"),
            Segment::new(2, TimeInterval::known(7.0, 8.0), "B", "transmission fluid"),
        ];
        let text = render(|w| write_transcript(&segs, w, 16));
        assert_eq!(
            text,
            "[00:00:00 - 00:00:07] A:\nthe brake pads\nsqueal on cold\nmornings\n\n\
             [00:00:07 - 00:00:08] B:\ntransmission\nfluid\n\n"
        );
        assert_eq!(wrap_text("transmission fluid", 5), "transmission\nfluid");
    }

    #[test]
    fn test_format_aliases() {
        let formats: Vec<OutputFormat> = serde_json::from_str(r#"["json", "tabular", "txt", "plain"]"#).unwrap();
        assert_eq!(
            formats,
            vec![
                OutputFormat::Structured,
                OutputFormat::Tabular,
                OutputFormat::Transcript,
                OutputFormat::Plain
            ]
        );
    }
}
