// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for gallery listing order and filtering

use prompt_canvas::gallery::{image_entries, list_images};
use tempfile::TempDir;

use crate::support::write_aged;

#[test]
fn test_missing_dir_is_empty_not_error() {
    let tmp = TempDir::new().unwrap();
    let images = list_images(&tmp.path().join("does-not-exist")).unwrap();
    assert!(images.is_empty());
}

#[test]
fn test_newer_file_listed_first() {
    let tmp = TempDir::new().unwrap();
    write_aged(tmp.path(), "a.png", 100);
    write_aged(tmp.path(), "b.png", 10);

    assert_eq!(list_images(tmp.path()).unwrap(), vec!["b.png", "a.png"]);
}

#[test]
fn test_order_is_by_mtime_not_name_or_creation() {
    let tmp = TempDir::new().unwrap();
    // Written first, but given the most recent mtime
    write_aged(tmp.path(), "zzz.png", 0);
    write_aged(tmp.path(), "aaa.png", 500);
    write_aged(tmp.path(), "mmm.jpg", 250);

    assert_eq!(
        list_images(tmp.path()).unwrap(),
        vec!["zzz.png", "mmm.jpg", "aaa.png"]
    );
}

#[test]
fn test_only_image_files_listed() {
    let tmp = TempDir::new().unwrap();
    write_aged(tmp.path(), "keep.PNG", 30);
    write_aged(tmp.path(), "keep.jpeg", 20);
    std::fs::write(tmp.path().join("readme.txt"), b"text").unwrap();
    std::fs::write(tmp.path().join("anim.gif"), b"gif").unwrap();
    std::fs::create_dir(tmp.path().join("folder.png")).unwrap();

    assert_eq!(
        list_images(tmp.path()).unwrap(),
        vec!["keep.jpeg", "keep.PNG"]
    );
}

#[test]
fn test_entries_carry_mtimes_descending() {
    let tmp = TempDir::new().unwrap();
    write_aged(tmp.path(), "one.png", 300);
    write_aged(tmp.path(), "two.png", 200);
    write_aged(tmp.path(), "three.png", 100);

    let entries = image_entries(tmp.path()).unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries
        .windows(2)
        .all(|pair| pair[0].modified >= pair[1].modified));
}
