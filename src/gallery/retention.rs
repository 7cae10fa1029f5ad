// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Output Directory Retention Policy
//!
//! Bounds how many generated images stay on disk and for how long.
//!
//! | Limit        | Default   | Effect                                  |
//! |--------------|-----------|-----------------------------------------|
//! | `max_images` | unlimited | Oldest images beyond the count removed  |
//! | `max_age`    | unlimited | Images at least this old removed        |
//!
//! With both limits unset nothing is ever deleted.

use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime};

use super::image_entries;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Maximum number of images kept
    pub max_images: Option<usize>,

    /// Maximum age of a kept image
    pub max_age: Option<Duration>,
}

impl RetentionPolicy {
    /// Keep everything forever
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_images.is_none() && self.max_age.is_none()
    }

    /// Pick the names to delete.
    ///
    /// `entries` are `(name, age)` pairs ordered newest first. The entry named
    /// `keep` is never selected and takes the first `max_images` slot.
    pub fn select_expired(&self, entries: &[(String, Duration)], keep: Option<&str>) -> Vec<String> {
        let is_keep = |name: &str| keep == Some(name);
        let mut retained = entries.iter().filter(|(name, _)| is_keep(name)).count();
        let mut expired = Vec::new();

        for (name, age) in entries {
            if is_keep(name) {
                continue;
            }
            let too_old = self.max_age.map_or(false, |max_age| *age >= max_age);
            let over_count = self.max_images.map_or(false, |max| retained >= max);
            if too_old || over_count {
                expired.push(name.clone());
            } else {
                retained += 1;
            }
        }

        expired
    }
}

/// Delete images in `dir` that fall outside `policy`. Returns removed names.
pub fn apply_retention(
    dir: &Path,
    policy: &RetentionPolicy,
    keep: Option<&str>,
) -> io::Result<Vec<String>> {
    if policy.is_unbounded() {
        return Ok(Vec::new());
    }

    let now = SystemTime::now();
    let entries: Vec<(String, Duration)> = image_entries(dir)?
        .into_iter()
        .map(|entry| {
            // Clock skew can put mtimes in the future; treat those as brand new
            let age = now.duration_since(entry.modified).unwrap_or(Duration::ZERO);
            (entry.name, age)
        })
        .collect();

    let expired = policy.select_expired(&entries, keep);
    let mut removed = Vec::with_capacity(expired.len());
    for name in expired {
        match std::fs::remove_file(dir.join(&name)) {
            Ok(()) => removed.push(name),
            // Another request may have removed it first
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }

    Ok(removed)
}
