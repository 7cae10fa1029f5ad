// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Listing of generated images in the output directory

pub mod retention;

use std::io;
use std::path::Path;
use std::time::SystemTime;

pub use retention::{apply_retention, RetentionPolicy};

/// Extensions listed by the gallery, compared case-insensitively
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// An image file with its modification time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub name: String,
    pub modified: SystemTime,
}

/// Whether `name` carries one of [`IMAGE_EXTENSIONS`]
pub fn is_image_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Image files in `dir`, newest first. A missing directory yields nothing.
pub fn image_entries(dir: &Path) -> io::Result<Vec<ImageEntry>> {
    let read_dir = match std::fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !is_image_file(&name) {
            continue;
        }
        // Entries can vanish between listing and stat
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }
        entries.push(ImageEntry {
            name,
            modified: metadata.modified()?,
        });
    }

    entries.sort_by(|a, b| b.modified.cmp(&a.modified));
    Ok(entries)
}

/// Image filenames in `dir`, most recently modified first
pub fn list_images(dir: &Path) -> io::Result<Vec<String>> {
    Ok(image_entries(dir)?
        .into_iter()
        .map(|entry| entry.name)
        .collect())
}
