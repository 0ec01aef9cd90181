//! Class list (`classes.txt`) reader.
//!
//! One class name per line; line `n` (zero-based) is YOLO class index `n`
//! and COCO category id `n + 1`.

use std::fs;
use std::path::Path;

use log::warn;

use crate::coco::{Category, CategoryId};
use crate::error::Yolo2CocoError;

/// Ordered class names read from a class list file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassList {
    names: Vec<String>,
}

impl ClassList {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of names that are empty, i.e. blank lines between classes.
    pub fn blank_count(&self) -> usize {
        self.names.iter().filter(|name| name.is_empty()).count()
    }

    /// True when `id` names one of the listed classes.
    pub fn contains(&self, id: CategoryId) -> bool {
        (1..=self.names.len() as i64).contains(&id.as_i64())
    }

    /// Builds the COCO `categories` table in file order.
    pub fn to_categories(&self) -> Vec<Category> {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                Category::new(CategoryId::from_class_index(index as i64), name.clone())
            })
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Reads and parses a class list file.
pub fn read_classes(path: &Path) -> Result<ClassList, Yolo2CocoError> {
    let content = fs::read_to_string(path).map_err(|source| Yolo2CocoError::ClassesRead {
        path: path.to_path_buf(),
        source,
    })?;

    let classes = parse_classes(&content);
    for (index, name) in classes.names.iter().enumerate() {
        if name.is_empty() {
            warn!(
                "{}: line {} is blank; category {} gets an empty name",
                path.display(),
                index + 1,
                index + 1
            );
        }
    }

    Ok(classes)
}

/// Parses class list text.
///
/// Whitespace around the whole text is dropped, so leading and trailing
/// blank lines do not create classes. Blank lines in the middle are kept so
/// that the names after them keep their indices.
pub fn parse_classes(content: &str) -> ClassList {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return ClassList::default();
    }

    trimmed
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}
