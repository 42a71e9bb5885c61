/*!
 * Tests for file system utilities
 */

use anyhow::Result;
use videobook::file_utils::{FileManager, FileType};
use crate::common;

/// Test file existence checks
#[test]
fn test_file_exists_withFileAndDir_shouldDistinguish() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir_path = temp_dir.path().to_path_buf();
    let file_path = common::create_test_file(&dir_path, "a.txt", "content")?;

    assert!(FileManager::file_exists(&file_path));
    assert!(!FileManager::file_exists(&dir_path));
    assert!(FileManager::dir_exists(&dir_path));
    assert!(!FileManager::dir_exists(&file_path));
    assert!(!FileManager::file_exists(dir_path.join("missing.txt")));

    Ok(())
}

/// Test directory creation including parents
#[test]
fn test_ensure_dir_withNestedPath_shouldCreateAll() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b").join("c");

    FileManager::ensure_dir(&nested)?;
    assert!(FileManager::dir_exists(&nested));

    // Idempotent on an existing directory
    FileManager::ensure_dir(&nested)?;

    Ok(())
}

/// Test write/read round trip, creating the parent directory on demand
#[test]
fn test_write_to_file_withNewParent_shouldWriteAndReadBack() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file_path = temp_dir.path().join("sub").join("doc.org");

    FileManager::write_to_file(&file_path, "#+TITLE:test\n")?;

    let content = FileManager::read_to_string(&file_path)?;
    assert_eq!(content, "#+TITLE:test\n");

    Ok(())
}

/// Test reading a missing file reports an error
#[test]
fn test_read_to_string_withMissingFile_shouldFail() {
    let result = FileManager::read_to_string("definitely_missing.org");
    assert!(result.is_err());
}

/// Test appending timestamped lines to a log file
#[test]
fn test_append_to_log_file_withTwoEntries_shouldAccumulate() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let log_path = temp_dir.path().join("issues.log");

    FileManager::append_to_log_file(&log_path, "chapter 2: capture failed")?;
    FileManager::append_to_log_file(&log_path, "chapter 5: capture failed")?;

    let content = FileManager::read_to_string(&log_path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("chapter 2: capture failed"));
    assert!(lines[1].contains("chapter 5: capture failed"));
    assert!(lines[0].starts_with('['), "Entries should carry a timestamp");

    Ok(())
}

/// Test file type detection by extension
#[test]
fn test_detect_file_type_withKnownExtensions_shouldClassify() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let subtitle = common::create_test_file(&dir, "movie.srt", "1\n00:00:01,000 --> 00:00:02,000\nHi\n")?;
    let vtt = common::create_test_file(&dir, "movie.vtt", "WEBVTT\n")?;
    let video = common::create_test_file(&dir, "movie.mkv", "fake")?;

    assert_eq!(FileManager::detect_file_type(&subtitle)?, FileType::Subtitle);
    assert_eq!(FileManager::detect_file_type(&vtt)?, FileType::Subtitle);
    assert_eq!(FileManager::detect_file_type(&video)?, FileType::Video);

    Ok(())
}

/// Test file type detection falls back to content sniffing
#[test]
fn test_detect_file_type_withTimedTextContent_shouldSniffSubtitle() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let content = "1\n00:00:01,000 --> 00:00:02,000\nHi\n";
    let unlabeled = common::create_test_file(&dir, "captions", content)?;

    assert_eq!(FileManager::detect_file_type(&unlabeled)?, FileType::Subtitle);

    Ok(())
}

/// Test file type detection of a missing file
#[test]
fn test_detect_file_type_withMissingFile_shouldFail() {
    assert!(FileManager::detect_file_type("missing.bin").is_err());
}
