//! COCO JSON writer.
//!
//! Output is pretty-printed with 4-space indentation. The whole document is
//! encoded into memory first and the file is only created once encoding has
//! succeeded, so a failed run never leaves a truncated file behind.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::model::Dataset;
use crate::error::Yolo2CocoError;

const INDENT: &[u8] = b"    ";

/// Writes `dataset` to `path`, creating or truncating the file.
///
/// # Errors
/// [`Yolo2CocoError::CocoJsonWrite`] if encoding fails and
/// [`Yolo2CocoError::OutputWrite`] if the file cannot be created or written.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use yolo2coco::coco::{io_coco_json::write_coco_json, Dataset};
///
/// write_coco_json(Path::new("coco_annotations.json"), &Dataset::default())?;
/// # Ok::<(), yolo2coco::Yolo2CocoError>(())
/// ```
pub fn write_coco_json(path: &Path, dataset: &Dataset) -> Result<(), Yolo2CocoError> {
    let bytes = to_coco_vec(dataset).map_err(|source| Yolo2CocoError::CocoJsonWrite {
        path: path.to_path_buf(),
        source,
    })?;

    let output_err = |source| Yolo2CocoError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(output_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes).map_err(output_err)?;
    writer.write_all(b"\n").map_err(output_err)?;
    writer.flush().map_err(output_err)
}

/// Encodes `dataset` as an indented COCO JSON string.
pub fn to_coco_string(dataset: &Dataset) -> Result<String, serde_json::Error> {
    let bytes = to_coco_vec(dataset)?;
    // serde_json only emits UTF-8
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parses a COCO JSON document produced by this crate.
pub fn from_coco_str(json: &str) -> Result<Dataset, serde_json::Error> {
    serde_json::from_str(json)
}

fn to_coco_vec(dataset: &Dataset) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    dataset.serialize(&mut serializer)?;
    Ok(buf)
}
