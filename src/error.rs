use std::error::Error as StdError;
use std::fmt::Write as _;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for yolo2coco operations.
///
/// Every variant aborts the conversion; nothing is written when one is
/// returned before the output stage.
#[derive(Debug, Error)]
pub enum Yolo2CocoError {
    #[error("{role} not found: {}", path.display())]
    InputNotFound { role: &'static str, path: PathBuf },

    #[error("Failed to read class list {}: {source}", path.display())]
    ClassesRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list image directory {}: {source}", path.display())]
    DirectoryList {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read label file {}: {source}", path.display())]
    LabelRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YOLO label {}:{line}: {message}", path.display())]
    LabelParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Failed to read image dimensions from {}: {source}", path.display())]
    ImageDimensionRead {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },

    #[error("Invalid image dimensions in {}: {message}", path.display())]
    ImageDimensionInvalid { path: PathBuf, message: String },

    #[error("Failed to write output {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode COCO JSON to {}: {source}", path.display())]
    CocoJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Renders `err` and its `source()` chain for the terminal.
///
/// A cause whose text already appears in the line above it is skipped, since
/// most variants embed their direct source in their own message.
pub fn render_error_chain(err: &dyn StdError) -> String {
    let mut out = format!("Error: {err}");
    let mut previous = err.to_string();
    let mut cause = err.source();
    while let Some(current) = cause {
        let text = current.to_string();
        if !previous.contains(&text) {
            let _ = write!(out, "\n  caused by: {text}");
        }
        previous = text;
        cause = current.source();
    }
    out
}
