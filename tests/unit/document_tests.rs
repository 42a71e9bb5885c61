/*!
 * Tests for chapter grouping and document assembly
 */

use std::collections::HashSet;
use std::path::Path;
use anyhow::Result;
use videobook::document::{Chapter, Document, DOCUMENT_EXTENSION};
use videobook::subtitle_processor::SubtitleCue;
use crate::common;

fn sample_cue(index: usize, start: &str, lines: &[&str]) -> SubtitleCue {
    SubtitleCue::new(
        index,
        start.to_string(),
        "00:00:59,000".to_string(),
        lines.iter().map(|l| l.to_string()).collect(),
    )
}

/// Test that cues map 1:1 to chapters in order
#[test]
fn test_from_cues_withCueSequence_shouldMapOneToOne() {
    let output_dir = Path::new("/tmp/out");
    let cues = vec![
        sample_cue(1, "00:00:01,000", &["Hello world"]),
        sample_cue(2, "00:00:05,000", &["Second line"]),
        sample_cue(3, "00:00:09,000", &["Third", "and fourth"]),
    ];

    let chapters = Chapter::from_cues(cues, output_dir);

    assert_eq!(chapters.len(), 3);
    assert_eq!(chapters[0].number, 1);
    assert_eq!(chapters[1].number, 2);
    assert_eq!(chapters[2].number, 3);

    // Body is the cue lines joined in source order
    assert_eq!(chapters[0].body, "Hello world");
    assert_eq!(chapters[2].body, "Third\nand fourth");

    // Start timestamps carry over verbatim for the capture step
    assert_eq!(chapters[1].start_time, "00:00:05,000");
}

/// Test that image paths are deterministic and collision-free
#[test]
fn test_from_cues_withDistinctIndices_shouldDeriveDistinctImagePaths() {
    let output_dir = Path::new("out");
    let cues = vec![
        sample_cue(1, "00:00:01,000", &["a"]),
        sample_cue(2, "00:00:02,000", &["b"]),
        sample_cue(10, "00:00:03,000", &["c"]),
    ];

    let chapters = Chapter::from_cues(cues, output_dir);

    let names: Vec<String> = chapters.iter().map(|c| c.image_file_name()).collect();
    assert_eq!(names, vec!["1.jpg", "2.jpg", "10.jpg"]);

    let distinct: HashSet<&String> = names.iter().collect();
    assert_eq!(distinct.len(), chapters.len());

    assert_eq!(chapters[0].image_path, output_dir.join("1.jpg"));
}

/// Test document title derivation from the video file name
#[test]
fn test_title_for_video_withExtension_shouldUseBaseName() {
    assert_eq!(Document::title_for_video(Path::new("/videos/lecture.mkv")), "lecture");
    assert_eq!(Document::title_for_video(Path::new("talk.part1.mp4")), "talk.part1");
}

/// Test document output path derivation
#[test]
fn test_output_path_withTitle_shouldJoinOutputDir() {
    let document = Document::new("lecture", Vec::new());
    let path = document.output_path(Path::new("out"));
    assert_eq!(path, Path::new("out").join(format!("lecture.{}", DOCUMENT_EXTENSION)));
}

/// Test the full rendering layout: title, then per chapter a heading,
/// an image link and the body, in cue order
#[test]
fn test_render_withTwoChapters_shouldOrderHeadingImageBody() {
    let output_dir = Path::new("out");
    let cues = vec![
        sample_cue(1, "00:00:01,000", &["Hello world"]),
        sample_cue(2, "00:00:05,000", &["Second line"]),
    ];
    let document = Document::new("video", Chapter::from_cues(cues, output_dir));

    let rendered = document.render();

    assert!(rendered.starts_with("#+TITLE:video\n"));

    let title_pos = rendered.find("#+TITLE:video").unwrap();
    let heading_one = rendered.find("* 1\n").unwrap();
    let image_one = rendered.find("[[file:1.jpg]]").unwrap();
    let body_one = rendered.find("Hello world").unwrap();
    let heading_two = rendered.find("* 2\n").unwrap();
    let image_two = rendered.find("[[file:2.jpg]]").unwrap();
    let body_two = rendered.find("Second line").unwrap();

    assert!(title_pos < heading_one);
    assert!(heading_one < image_one);
    assert!(image_one < body_one);
    assert!(body_one < heading_two);
    assert!(heading_two < image_two);
    assert!(image_two < body_two);

    // Image references are filenames only, relative to the output directory
    assert!(!rendered.contains("[[file:out"));
}

/// Test that body text is rendered verbatim, without escaping
#[test]
fn test_render_withMarkupInBody_shouldNotEscape() {
    let cues = vec![sample_cue(1, "00:00:01,000", &["*stars* and [brackets]"])];
    let document = Document::new("video", Chapter::from_cues(cues, Path::new("out")));

    assert!(document.render().contains("*stars* and [brackets]"));
}

/// Test rendering a chapter whose cue had no body lines
#[test]
fn test_render_withEmptyBody_shouldStillRenderHeadingAndImage() {
    let cues = vec![sample_cue(4, "00:00:01,000", &[])];
    let document = Document::new("video", Chapter::from_cues(cues, Path::new("out")));

    let rendered = document.render();
    assert!(rendered.contains("* 4\n"));
    assert!(rendered.contains("[[file:4.jpg]]"));
}

/// Test writing the rendered document to disk
#[test]
fn test_write_to_file_withChapters_shouldPersistRendering() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_dir = temp_dir.path().to_path_buf();

    let cues = vec![sample_cue(1, "00:00:01,000", &["Hello world"])];
    let document = Document::new("video", Chapter::from_cues(cues, &output_dir));

    let document_path = document.output_path(&output_dir);
    document.write_to_file(&document_path)?;

    assert!(document_path.exists(), "Document file should exist");
    let written = std::fs::read_to_string(&document_path)?;
    assert_eq!(written, document.render());

    Ok(())
}
