//! On-disk layout of persisted crops
//!
//! Crops live next to their source image as `<stem>_<index>.jpg`. Callers
//! rely on that convention to tell the original upload ("large picture")
//! apart from its crops ("small pictures").

use crate::error::LprError;
use image::{DynamicImage, ImageFormat};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Extension used for every persisted crop
pub const CROP_EXTENSION: &str = "jpg";

/// Directory and file stem crops of `source` are named after
pub fn crop_location(source: &Path) -> (PathBuf, String) {
    let dir = match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    (dir, stem)
}

/// Path of the crop with the given rank for `source`
pub fn crop_path(source: &Path, index: usize) -> PathBuf {
    let (dir, stem) = crop_location(source);
    dir.join(format!("{}_{}.{}", stem, index, CROP_EXTENSION))
}

/// Write a crop as JPEG, creating the directory if needed
pub fn save_crop(image: &DynamicImage, path: &Path) -> Result<(), LprError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| LprError::StorageError {
            path: path.to_path_buf(),
            reason: format!("Failed to create directory: {}", e),
        })?;
    }

    // JPEG has no alpha channel
    image
        .to_rgb8()
        .save_with_format(path, ImageFormat::Jpeg)
        .map_err(|e| LprError::StorageError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    tracing::debug!("Saved crop to {:?}", path);
    Ok(())
}

/// An uploaded picture and the crops previously persisted for it
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PictureSet {
    /// The source image itself, if it is still present
    pub large_picture: Option<PathBuf>,
    /// Persisted crops, ordered by candidate rank
    pub small_pictures: Vec<PathBuf>,
}

/// Re-discover the source image and its crops by filename pattern
pub fn discover(source: &Path) -> Result<PictureSet, LprError> {
    let (dir, stem) = crop_location(source);
    let entries = std::fs::read_dir(&dir).map_err(|e| LprError::StorageError {
        path: dir.clone(),
        reason: format!("Failed to list directory: {}", e),
    })?;

    let mut set = PictureSet::default();
    let mut crops: Vec<(usize, PathBuf)> = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };

        if file_stem == stem {
            set.large_picture = Some(path);
        } else if let Some(index) = crop_index(&file_stem, &stem, &path) {
            crops.push((index, path));
        }
    }

    crops.sort_by_key(|(index, _)| *index);
    set.small_pictures = crops.into_iter().map(|(_, path)| path).collect();
    Ok(set)
}

/// Rank encoded in a crop filename, if `path` is a crop of `stem`
fn crop_index(file_stem: &str, stem: &str, path: &Path) -> Option<usize> {
    let is_jpeg = path
        .extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(CROP_EXTENSION))
        .unwrap_or(false);
    if !is_jpeg {
        return None;
    }
    let suffix = file_stem.strip_prefix(stem)?.strip_prefix('_')?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}
