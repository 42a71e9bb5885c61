use std::fmt;
use std::fs;
use std::mem;
use std::path::Path;
use anyhow::{Result, Context};
use log::warn;

use crate::errors::SubtitleError;

// @module: Timed-text cue parsing

// @const: Token marking a timestamp line in SRT/WebVTT-style timed text
pub const TIMESTAMP_SEPARATOR: &str = "-->";

// @struct: Single caption cue
#[derive(Debug, Clone)]
pub struct SubtitleCue {
    // @field: Sequence number from the cue's index line
    pub index: usize,

    // @field: Start timestamp, verbatim HH:MM:SS,mmm text
    pub start: String,

    // @field: End timestamp, verbatim text
    pub end: String,

    // @field: Non-blank body lines in source order
    pub lines: Vec<String>,
}

impl SubtitleCue {
    /// Creates a new cue - used by tests and external consumers
    #[allow(dead_code)]
    pub fn new(index: usize, start: String, end: String, lines: Vec<String>) -> Self {
        SubtitleCue {
            index,
            start,
            end,
            lines,
        }
    }
}

impl fmt::Display for SubtitleCue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} {} {}", self.start, TIMESTAMP_SEPARATOR, self.end)?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)
    }
}

/// A cue whose index and timestamps are known but whose body is still
/// being accumulated. Becomes a [`SubtitleCue`] only once the next
/// timestamp line (or end of input) closes it.
#[derive(Debug)]
struct OpenCue {
    index: usize,
    start: String,
    end: String,
}

impl OpenCue {
    fn into_cue(self, lines: Vec<String>) -> SubtitleCue {
        SubtitleCue {
            index: self.index,
            start: self.start,
            end: self.end,
            lines,
        }
    }
}

/// Parser for timed-text input where every record is an index line, a
/// timestamp line and one or more body lines, records separated by
/// blank lines, with a format marker on the first line.
pub struct CueParser;

impl CueParser {
    /// Parse a timed-text file into cues
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<SubtitleCue>> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read subtitle file: {:?}", path.as_ref()))?;
        Self::parse_str(&content)
    }

    /// Parse timed-text content into an ordered cue sequence.
    ///
    /// The scan keys on timestamp lines: seeing one reinterprets the most
    /// recently buffered non-blank line as the next cue's index, closes the
    /// cue in progress with the remaining buffer as its body, and opens a
    /// new cue. The cue still open at end of input is flushed. A non-integer
    /// index line fails the whole parse.
    pub fn parse_str(content: &str) -> Result<Vec<SubtitleCue>> {
        let mut cues: Vec<SubtitleCue> = Vec::new();

        // State for the scan: the cue whose body is being accumulated,
        // the buffered non-blank lines seen since its timestamp line, and
        // the line number of the most recently buffered line.
        let mut open: Option<OpenCue> = None;
        let mut buffer: Vec<String> = Vec::new();
        let mut last_buffered_line = 0;
        let mut last_index: Option<usize> = None;

        // The first line is always a format marker (WEBVTT etc.), never a cue
        for (line_number, line) in content.lines().enumerate().skip(1) {
            let line_number = line_number + 1;

            if line.contains(TIMESTAMP_SEPARATOR) {
                // The buffered line just before a timestamp line is the new
                // cue's index, not body text of the cue being closed
                let index_line = buffer.pop().ok_or(SubtitleError::MissingCueIndex {
                    line: line_number,
                })?;

                let index = index_line.trim().parse::<usize>().map_err(|_| {
                    SubtitleError::MalformedCueIndex {
                        line: last_buffered_line,
                        content: index_line.trim().to_string(),
                    }
                })?;

                if let Some(previous) = last_index {
                    if index <= previous {
                        warn!(
                            "Cue index {} at line {} does not increase (previous was {})",
                            index, last_buffered_line, previous
                        );
                    }
                }
                last_index = Some(index);

                match open.take() {
                    Some(current) => cues.push(current.into_cue(mem::take(&mut buffer))),
                    None => {
                        if !buffer.is_empty() {
                            warn!(
                                "Discarding {} line(s) found before the first cue",
                                buffer.len()
                            );
                            buffer.clear();
                        }
                    }
                }

                let (start, end) = match line.split_once(TIMESTAMP_SEPARATOR) {
                    Some((start, end)) => (start.trim().to_string(), end.trim().to_string()),
                    // Unreachable: the separator was just found in the line
                    None => (line.trim().to_string(), String::new()),
                };
                open = Some(OpenCue { index, start, end });
            } else if !line.trim().is_empty() {
                // Body text, kept verbatim; blank lines are structural
                // separators and never enter a cue body
                buffer.push(line.to_string());
                last_buffered_line = line_number;
            }
        }

        // The final cue has no following timestamp line to close it
        if let Some(current) = open.take() {
            cues.push(current.into_cue(buffer));
        } else if !buffer.is_empty() {
            warn!("Input contained {} line(s) but no timestamp line", buffer.len());
        }

        Ok(cues)
    }
}
