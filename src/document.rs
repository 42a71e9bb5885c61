use std::path::{Path, PathBuf};
use anyhow::Result;

use crate::file_utils::FileManager;
use crate::subtitle_processor::SubtitleCue;

// @module: Chapter grouping and org document assembly

// @const: Extension of the generated document file
pub const DOCUMENT_EXTENSION: &str = "org";

// @const: Extension of per-chapter still frames
pub const IMAGE_EXTENSION: &str = "jpg";

/// One section of the output document, built from exactly one cue.
///
/// Chapters are immutable once built: the capture step reads them, it
/// never writes them back.
#[derive(Debug, Clone)]
pub struct Chapter {
    // @field: Chapter number, taken from the owning cue's index
    pub number: usize,

    // @field: Verbatim cue start timestamp, drives frame capture
    pub start_time: String,

    // @field: Cue body lines joined in source order
    pub body: String,

    // @field: Destination of the chapter's still frame
    pub image_path: PathBuf,
}

impl Chapter {
    /// Build a chapter from a cue. The image path is deterministic:
    /// `<output_dir>/<number>.jpg`, so distinct cue indices never collide.
    pub fn from_cue(cue: SubtitleCue, output_dir: &Path) -> Self {
        let image_path = output_dir.join(format!("{}.{}", cue.index, IMAGE_EXTENSION));
        Chapter {
            number: cue.index,
            start_time: cue.start,
            body: cue.lines.join("\n"),
            image_path,
        }
    }

    /// Map an ordered cue sequence 1:1 to chapters. No filtering, merging
    /// or reordering: cardinality and order are preserved exactly.
    pub fn from_cues(cues: Vec<SubtitleCue>, output_dir: &Path) -> Vec<Chapter> {
        cues.into_iter()
            .map(|cue| Self::from_cue(cue, output_dir))
            .collect()
    }

    /// Image reference as rendered into the document: the filename only,
    /// relative to the output directory
    pub fn image_file_name(&self) -> String {
        self.image_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// The final artifact: a title plus the ordered chapter sequence.
/// Assembled once, written once.
#[derive(Debug)]
pub struct Document {
    /// Document title, the video file's base name
    pub title: String,

    /// Chapters in input cue order
    pub chapters: Vec<Chapter>,
}

impl Document {
    /// Create a new document
    pub fn new<S: Into<String>>(title: S, chapters: Vec<Chapter>) -> Self {
        Document {
            title: title.into(),
            chapters,
        }
    }

    /// Derive the document title from the video file's base name
    pub fn title_for_video(video_path: &Path) -> String {
        video_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string())
    }

    /// Path of the document file inside the output directory
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.{}", self.title, DOCUMENT_EXTENSION))
    }

    /// Render the document as org text: a title header, then per chapter a
    /// numbered heading, an image link and the body verbatim. Purely
    /// structural: no reflowing, wrapping or escaping of body text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("#+TITLE:{}\n\n", self.title));

        for chapter in &self.chapters {
            out.push_str(&format!("* {}\n\n", chapter.number));
            out.push_str(&format!("[[file:{}]]\n\n", chapter.image_file_name()));
            if !chapter.body.is_empty() {
                out.push_str(&chapter.body);
                out.push('\n');
            }
        }

        out
    }

    /// Write the rendering to a file, replacing any previous document.
    /// The write is best-effort, not atomic.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        FileManager::write_to_file(path, &self.render())
    }
}
