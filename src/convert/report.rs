//! Summary of a finished conversion.

use serde::Serialize;
use std::fmt;

/// Counts gathered while assembling the COCO dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub images: usize,
    pub annotations: usize,
    pub categories: usize,
    /// Images with no `<stem>.txt` in the label directory.
    pub images_without_labels: usize,
    /// Annotations whose category id has no entry in the class list.
    pub unknown_category_refs: usize,
    /// Blank lines inside the class list, emitted as empty-named categories.
    pub blank_category_names: usize,
}

impl ConversionReport {
    /// Returns true if anything suspicious was seen in the inputs.
    pub fn has_warnings(&self) -> bool {
        self.unknown_category_refs > 0 || self.blank_category_names > 0
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  {} images, {} categories, {} annotations",
            self.images, self.categories, self.annotations
        )?;

        if self.images_without_labels > 0 {
            writeln!(f, "  {} image(s) without a label file", self.images_without_labels)?;
        }

        if self.has_warnings() {
            writeln!(f)?;
            writeln!(f, "Warnings:")?;
            if self.unknown_category_refs > 0 {
                writeln!(
                    f,
                    "  - {} annotation(s) reference a class missing from the class list",
                    self.unknown_category_refs
                )?;
            }
            if self.blank_category_names > 0 {
                writeln!(
                    f,
                    "  - {} blank line(s) in the class list became unnamed categories",
                    self.blank_category_names
                )?;
            }
        }

        Ok(())
    }
}
