use std::path::Path;
use log::debug;
use tokio::process::Command;

use crate::app_config::CaptureConfig;
use crate::document::Chapter;
use crate::errors::CaptureError;

// @module: Still-frame capture through the external ffmpeg tool

// @const: Seek positions keep seconds-and-milliseconds precision, the
// first 12 characters of an HH:MM:SS,mmm timestamp
const SEEK_PRECISION: usize = 12;

/// Outcome of one capture attempt. Capture never raises: a chapter whose
/// frame could not be produced still appears in the document, its image
/// reference dangling.
#[derive(Debug)]
pub enum CaptureOutcome {
    /// A new frame was written to the chapter's image path
    Captured,

    /// The image already existed and was left untouched
    AlreadyExists,

    /// The capture tool could not produce a frame
    Failed(CaptureError),
}

impl CaptureOutcome {
    /// Whether this outcome should be surfaced as a warning
    pub fn is_failure(&self) -> bool {
        matches!(self, CaptureOutcome::Failed(_))
    }
}

/// Captures one still frame per chapter by invoking ffmpeg once per
/// chapter, in chapter order, awaiting each invocation before issuing
/// the next. There is no timeout: a hung tool stalls the run.
pub struct FrameExtractor {
    config: CaptureConfig,
}

impl FrameExtractor {
    /// Create an extractor from capture settings
    pub fn new(config: CaptureConfig) -> Self {
        FrameExtractor { config }
    }

    /// Seek position for a chapter: its verbatim start timestamp truncated
    /// to HH:MM:SS,mmm - used by tests and the capture call.
    /// Capturing at the start of the cue interval rather than its middle is
    /// a deliberate simplification.
    pub fn seek_position(start_time: &str) -> &str {
        start_time.get(..SEEK_PRECISION).unwrap_or(start_time)
    }

    /// Request exactly one still frame at the chapter's start timestamp.
    ///
    /// No-overwrite semantics: when the image path already exists the call
    /// is a no-op that leaves the file untouched, which makes re-runs over
    /// a partially captured output directory cheap. Tool failures are
    /// returned, never raised, and nothing is retried.
    pub async fn capture(&self, video_path: &Path, chapter: &Chapter) -> CaptureOutcome {
        if chapter.image_path.exists() {
            debug!("Frame {} already captured, skipping", chapter.image_file_name());
            return CaptureOutcome::AlreadyExists;
        }

        let seek = Self::seek_position(&chapter.start_time);
        let quality = self.config.image_quality.to_string();

        // -n makes ffmpeg itself refuse to overwrite the destination,
        // backing the existence check above
        let output = Command::new(&self.config.ffmpeg_path)
            .args([
                "-ss", seek,
                "-n",
                "-i", video_path.to_str().unwrap_or_default(),
                "-vframes", "1",
                "-q:v", quality.as_str(),
                chapter.image_path.to_str().unwrap_or_default(),
            ])
            .output()
            .await;

        match output {
            Err(e) => CaptureOutcome::Failed(CaptureError::Launch(e.to_string())),
            Ok(result) if !result.status.success() => {
                let stderr = String::from_utf8_lossy(&result.stderr);
                CaptureOutcome::Failed(CaptureError::Tool(Self::filter_ffmpeg_stderr(&stderr)))
            }
            Ok(_) => {
                debug!("Captured frame {} at {}", chapter.image_file_name(), seek);
                CaptureOutcome::Captured
            }
        }
    }

    /// Filter ffmpeg stderr to only show meaningful error lines, stripping the
    /// version banner, build configuration, and stream metadata noise.
    fn filter_ffmpeg_stderr(stderr: &str) -> String {
        let dominated_prefixes = [
            "ffmpeg version",
            "  built with",
            "  configuration:",
            "  lib",
            "Input #",
            "  Metadata:",
            "  Duration:",
            "  Stream #",
            "      Metadata:",
            "Output #",
            "Stream mapping:",
            "Press [q]",
        ];

        let meaningful: Vec<&str> = stderr
            .lines()
            .filter(|line| {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    return false;
                }
                !dominated_prefixes.iter().any(|p| line.starts_with(p) || trimmed.starts_with(p))
            })
            .collect();

        if meaningful.is_empty() {
            "unknown ffmpeg error (stderr was empty after filtering)".to_string()
        } else {
            meaningful.join("\n")
        }
    }
}
