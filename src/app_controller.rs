use anyhow::{Result, Context};
use log::{warn, info, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::document::{Chapter, Document};
use crate::file_utils::{FileManager, FileType};
use crate::frame_extractor::{CaptureOutcome, FrameExtractor};
use crate::subtitle_processor::CueParser;

// @module: Application controller for document generation

// @const: Per-run diagnostics file written next to the generated document
const ISSUES_LOG_NAME: &str = "videobook.issues.log";

/// Main application controller driving the conversion pipeline:
/// parse cues, build chapters, capture one frame per chapter, assemble
/// and write the document. One linear batch run, no retries.
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Run the main workflow: one video, one subtitle file, one output
    /// directory. Input errors abort the run before the document is
    /// written; capture errors are reported and swallowed.
    pub async fn run(&self, video_path: PathBuf, subtitle_path: PathBuf, output_dir: PathBuf) -> Result<()> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        if !video_path.exists() {
            return Err(anyhow::anyhow!("Video file does not exist: {:?}", video_path));
        }
        if !subtitle_path.exists() {
            return Err(anyhow::anyhow!("Subtitle file does not exist: {:?}", subtitle_path));
        }

        // Catch swapped arguments early; the detection is advisory only
        if let Ok(FileType::Video) = FileManager::detect_file_type(&subtitle_path) {
            warn!(
                "Subtitle input {:?} looks like a video file, arguments may be swapped",
                subtitle_path
            );
        }

        // Ensure the output directory exists
        FileManager::ensure_dir(&output_dir)?;

        // Parse the timed-text input
        let content = FileManager::read_to_string(&subtitle_path)?;
        let cues = CueParser::parse_str(&content)
            .with_context(|| format!("Failed to parse subtitle file: {:?}", subtitle_path))?;
        info!("Parsed {} cue(s) from {:?}", cues.len(), subtitle_path);

        let chapters = Chapter::from_cues(cues, &output_dir);

        // Capture stills, one per chapter, in cue order
        let failures = self.capture_frames(&video_path, &chapters).await;

        // Report failed captures once the progress bar is gone; the
        // document keeps referencing the missing images
        for (number, message) in &failures {
            warn!("Frame capture failed for chapter {}: {}", number, message);
        }
        if !failures.is_empty() {
            let issues_log = output_dir.join(ISSUES_LOG_NAME);
            for (number, message) in &failures {
                if let Err(e) = FileManager::append_to_log_file(&issues_log, &format!("chapter {}: {}", number, message)) {
                    debug!("Could not write issues log: {}", e);
                    break;
                }
            }
            warn!(
                "{} chapter image(s) could not be captured, see {}",
                failures.len(),
                issues_log.display()
            );
        }

        // Assemble and write the document, replacing any previous run's file
        let document = Document::new(Document::title_for_video(&video_path), chapters);
        let document_path = document.output_path(&output_dir);
        document.write_to_file(&document_path)?;

        let elapsed = start_time.elapsed();
        info!(
            "Success: {} ({} chapters, {})",
            document_path.display(),
            document.chapters.len(),
            Self::format_duration(elapsed)
        );

        Ok(())
    }

    /// Capture frames sequentially behind a progress bar. Returns the
    /// chapter numbers and diagnostics of failed captures.
    async fn capture_frames(&self, video_path: &Path, chapters: &[Chapter]) -> Vec<(usize, String)> {
        let extractor = FrameExtractor::new(self.config.capture.clone());

        let progress_bar = ProgressBar::new(chapters.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar.set_message("Capturing");

        let mut failures = Vec::new();
        for chapter in chapters {
            match extractor.capture(video_path, chapter).await {
                CaptureOutcome::Captured | CaptureOutcome::AlreadyExists => {}
                CaptureOutcome::Failed(error) => {
                    failures.push((chapter.number, error.to_string()));
                }
            }
            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();
        failures
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
