//! YOLO label file parsing.
//!
//! Each non-blank line is `class_id x_center y_center width height`, the
//! last four normalized to the image size.

use std::fs;
use std::path::Path;

use crate::coco::{BBoxXYWH, CategoryId, Normalized};
use crate::error::Yolo2CocoError;

const FIELD_COUNT: usize = 5;

/// One parsed label row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YoloLabelRow {
    /// Class index after truncation toward zero. Not checked against the
    /// class list; negative values are kept.
    pub class_id: i64,
    pub cx: f64,
    pub cy: f64,
    pub w: f64,
    pub h: f64,
}

impl YoloLabelRow {
    pub fn category_id(&self) -> CategoryId {
        CategoryId::from_class_index(self.class_id)
    }

    pub fn bbox(&self) -> BBoxXYWH<Normalized> {
        BBoxXYWH::from_cxcywh(self.cx, self.cy, self.w, self.h)
    }
}

/// Reads every row of a label file, skipping blank lines.
pub fn read_label_file(path: &Path) -> Result<Vec<YoloLabelRow>, Yolo2CocoError> {
    let content = fs::read_to_string(path).map_err(|source| Yolo2CocoError::LabelRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows = Vec::new();
    for (line_idx, line) in content.lines().enumerate() {
        if let Some(row) = parse_label_line(line, path, line_idx + 1)? {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Parses a single label line.
///
/// Returns `Ok(None)` for blank lines. `line_num` is 1-based and only used
/// in error messages.
pub fn parse_label_line(
    line: &str,
    file_path: &Path,
    line_num: usize,
) -> Result<Option<YoloLabelRow>, Yolo2CocoError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parse_err = |message: String| Yolo2CocoError::LabelParse {
        path: file_path.to_path_buf(),
        line: line_num,
        message,
    };

    // One extra token is enough to tell "too many" apart.
    let tokens: Vec<&str> = trimmed.split_whitespace().take(FIELD_COUNT + 1).collect();
    match tokens.len() {
        FIELD_COUNT => {}
        n if n < FIELD_COUNT => {
            return Err(parse_err(format!(
                "expected {FIELD_COUNT} tokens, found {n}"
            )));
        }
        _ => {
            return Err(parse_err(format!(
                "expected {FIELD_COUNT} tokens, found more; segmentation and pose rows are not supported"
            )));
        }
    }

    let class_raw = parse_f64_token(tokens[0], "class_id", file_path, line_num)?;
    let class_id = truncate_class_id(class_raw).map_err(parse_err)?;

    Ok(Some(YoloLabelRow {
        class_id,
        cx: parse_f64_token(tokens[1], "x_center", file_path, line_num)?,
        cy: parse_f64_token(tokens[2], "y_center", file_path, line_num)?,
        w: parse_f64_token(tokens[3], "width", file_path, line_num)?,
        h: parse_f64_token(tokens[4], "height", file_path, line_num)?,
    }))
}

/// Fuzz-only entrypoint for single-line parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_label_line(input: &str) -> Result<(), Yolo2CocoError> {
    let _ = parse_label_line(input, Path::new("<fuzz>"), 1)?;
    Ok(())
}

/// Truncates a float class id toward zero, so `2.9` is class 2 and `-1.5`
/// is class -1. Magnitudes beyond `i64` saturate.
fn truncate_class_id(raw: f64) -> Result<i64, String> {
    if !raw.is_finite() {
        return Err(format!("class_id {raw} is not a finite number"));
    }

    Ok(raw.trunc() as i64)
}

fn parse_f64_token(
    raw: &str,
    field_name: &str,
    file_path: &Path,
    line_num: usize,
) -> Result<f64, Yolo2CocoError> {
    raw.parse::<f64>()
        .map_err(|_| Yolo2CocoError::LabelParse {
            path: file_path.to_path_buf(),
            line: line_num,
            message: format!("invalid {field_name} '{raw}'; expected floating-point number"),
        })
}
