//! Image discovery and header-only dimension reads.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::Yolo2CocoError;

/// File name suffixes accepted as images. Matching is case-sensitive.
pub const IMAGE_SUFFIXES: [&str; 3] = [".png", ".jpg", ".jpeg"];

const LABEL_EXTENSION: &str = "txt";

/// An image file found directly inside the image directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageEntry {
    pub path: PathBuf,
    /// Name written to the COCO `file_name` field. Names that are not valid
    /// UTF-8 are converted lossily.
    pub file_name: String,
}

impl ImageEntry {
    /// Path of the label file that belongs to this image.
    ///
    /// Derived from the on-disk name, so it is exact even when
    /// [`ImageEntry::file_name`] is lossy.
    pub fn label_path(&self, label_dir: &Path) -> PathBuf {
        match self.path.file_name() {
            Some(name) => label_path_for(label_dir, name),
            None => label_path_for(label_dir, &self.file_name),
        }
    }
}

/// True when `file_name` ends in one of [`IMAGE_SUFFIXES`].
///
/// Compares raw bytes, so names that are not valid UTF-8 still match.
pub fn is_accepted_image(file_name: impl AsRef<OsStr>) -> bool {
    let bytes = file_name.as_ref().as_encoded_bytes();
    IMAGE_SUFFIXES
        .iter()
        .any(|suffix| bytes.ends_with(suffix.as_bytes()))
}

/// Lists the accepted image files in `dir`, sorted by file name.
///
/// Subdirectories are not descended into. Symlinks are followed.
pub fn list_images(dir: &Path) -> Result<Vec<ImageEntry>, Yolo2CocoError> {
    let mut images = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|source| Yolo2CocoError::DirectoryList {
            path: dir.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let raw_name = entry.file_name();
        if !is_accepted_image(raw_name) {
            debug!(
                "skipping {}: not a .png/.jpg/.jpeg file",
                raw_name.to_string_lossy()
            );
            continue;
        }

        let file_name = match raw_name.to_str() {
            Some(name) => name.to_string(),
            None => {
                let lossy = raw_name.to_string_lossy().into_owned();
                warn!(
                    "{}: file name is not valid UTF-8; recorded as {lossy:?}",
                    entry.path().display()
                );
                lossy
            }
        };

        images.push(ImageEntry {
            path: entry.path().to_path_buf(),
            file_name,
        });
    }

    Ok(images)
}

/// Reads `(width, height)` from the image header without decoding pixels.
pub fn read_image_dimensions(path: &Path) -> Result<(u32, u32), Yolo2CocoError> {
    let size = imagesize::size(path).map_err(|source| Yolo2CocoError::ImageDimensionRead {
        path: path.to_path_buf(),
        source,
    })?;

    let width: u32 = size
        .width
        .try_into()
        .map_err(|_| Yolo2CocoError::ImageDimensionInvalid {
            path: path.to_path_buf(),
            message: format!("width {} does not fit in u32", size.width),
        })?;

    let height: u32 = size
        .height
        .try_into()
        .map_err(|_| Yolo2CocoError::ImageDimensionInvalid {
            path: path.to_path_buf(),
            message: format!("height {} does not fit in u32", size.height),
        })?;

    Ok((width, height))
}

/// Smallest PNG header `imagesize` accepts, for tests that need real
/// dimensions on disk.
#[cfg(test)]
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"\x89PNG\r\n\x1a\n");
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 2, 0, 0, 0]);
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes
}

/// `label_dir/<stem>.txt`, where the stem drops only the last extension.
pub fn label_path_for(label_dir: &Path, image_file_name: impl AsRef<OsStr>) -> PathBuf {
    let image_file_name = image_file_name.as_ref();
    let stem = Path::new(image_file_name)
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_else(|| OsString::from(image_file_name));

    let mut label_name = stem;
    label_name.push(".");
    label_name.push(LABEL_EXTENSION);
    label_dir.join(label_name)
}
