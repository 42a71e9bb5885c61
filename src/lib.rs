/*!
 * # videobook - Captioned Video to Illustrated Document Converter
 *
 * A Rust library for turning a captioned video into a paginated org-mode
 * document: every subtitle cue becomes a chapter, illustrated by a still
 * frame captured from the video at the cue's start timestamp.
 *
 * ## Features
 *
 * - Parse SRT/WebVTT-style timed text into cues
 * - Map cues 1:1 to document chapters, preserving input order
 * - Capture one still frame per chapter via ffmpeg, never overwriting
 *   frames from a previous run
 * - Assemble a single org document with headings, image links and
 *   verbatim cue text
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: Timed-text cue parsing
 * - `document`: Chapter grouping and document assembly
 * - `frame_extractor`: Still-frame capture through ffmpeg
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod subtitle_processor;
pub mod document;
pub mod frame_extractor;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use subtitle_processor::{CueParser, SubtitleCue};
pub use document::{Chapter, Document};
pub use frame_extractor::{CaptureOutcome, FrameExtractor};
pub use app_controller::Controller;
pub use errors::{AppError, CaptureError, SubtitleError};
