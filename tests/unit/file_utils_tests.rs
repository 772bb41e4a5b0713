/*!
 * Tests for file utility functions
 */

use std::fs;
use std::path::Path;

use anyhow::Result;
use text2video::file_utils::{FileManager, FileType};
use crate::common;

#[test]
fn test_generateOutputPath_withTextFile_shouldSwapExtension() {
    let output = FileManager::generate_output_path(Path::new("/stories/fox.txt"), Path::new("/videos"), "mp4");
    assert_eq!(output, Path::new("/videos/fox.mp4"));

    let dotted = FileManager::generate_output_path(Path::new("fox.md"), Path::new("out"), ".srt");
    assert_eq!(dotted, Path::new("out/fox.srt"));
}

#[test]
fn test_findTextFiles_withMixedFiles_shouldReturnSortedTexts() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    fs::create_dir(root.join("nested"))?;

    common::create_test_file(root, "b.txt", "B.")?;
    common::create_test_file(root, "a.TXT", "A.")?;
    common::create_test_file(root, "clip.mp4", "")?;
    common::create_test_file(&root.join("nested"), "c.md", "C.")?;

    let files = FileManager::find_text_files(root)?;
    let names: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(names, vec!["a.TXT", "b.txt", "nested/c.md"]);
    Ok(())
}

#[test]
fn test_detectFileType_withKnownExtensions_shouldClassify() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let text = common::create_test_file(temp_dir.path(), "story.txt", "Once.")?;
    let video = common::create_test_background(temp_dir.path())?;
    let other = common::create_test_file(temp_dir.path(), "notes.xyz", "")?;

    assert_eq!(FileManager::detect_file_type(&text)?, FileType::Text);
    assert_eq!(FileManager::detect_file_type(&video)?, FileType::Video);
    assert_eq!(FileManager::detect_file_type(&other)?, FileType::Unknown);
    assert!(FileManager::detect_file_type(temp_dir.path().join("gone.mp4")).is_err());
    Ok(())
}

#[test]
fn test_ensureParentDir_withNestedPath_shouldCreateDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("a").join("b").join("out.srt");

    FileManager::ensure_parent_dir(&target)?;

    assert!(FileManager::dir_exists(temp_dir.path().join("a").join("b")));
    assert!(!FileManager::file_exists(&target));
    Ok(())
}
