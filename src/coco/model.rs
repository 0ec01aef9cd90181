//! COCO detection dataset model.
//!
//! Only the subset this tool emits is modelled: `images`, `annotations` and
//! `categories`. Field order matches the order keys appear in the output.

use serde::{Deserialize, Serialize};

use super::bbox::BBoxXYWH;
use super::ids::{AnnotationId, CategoryId, ImageId};
use super::space::Pixel;

/// Supercategory written for every category; YOLO class lists are flat.
pub const DEFAULT_SUPERCATEGORY: &str = "none";

/// A COCO detection dataset.
///
/// The three tables are independent and related only through ids.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub images: Vec<Image>,
    pub annotations: Vec<Annotation>,
    pub categories: Vec<Category>,
}

impl Dataset {
    /// Looks up an image by id.
    pub fn image(&self, id: ImageId) -> Option<&Image> {
        self.images.iter().find(|image| image.id == id)
    }

    /// Iterates the annotations attached to one image.
    pub fn annotations_for(&self, id: ImageId) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(move |ann| ann.image_id == id)
    }
}

/// An entry in the `images` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    pub width: u32,
    pub height: u32,
    /// Bare file name inside the image directory.
    pub file_name: String,
}

impl Image {
    pub fn new(
        id: impl Into<ImageId>,
        file_name: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            file_name: file_name.into(),
        }
    }
}

/// An entry in the `annotations` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub image_id: ImageId,
    pub category_id: CategoryId,
    /// `[x_min, y_min, width, height]` in pixels.
    pub bbox: BBoxXYWH<Pixel>,
    pub area: f64,
    pub iscrowd: u8,
}

impl Annotation {
    /// Creates a non-crowd annotation whose area is derived from `bbox`.
    pub fn new(
        id: impl Into<AnnotationId>,
        image_id: impl Into<ImageId>,
        category_id: impl Into<CategoryId>,
        bbox: BBoxXYWH<Pixel>,
    ) -> Self {
        Self {
            id: id.into(),
            image_id: image_id.into(),
            category_id: category_id.into(),
            area: bbox.area(),
            bbox,
            iscrowd: 0,
        }
    }
}

/// An entry in the `categories` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub supercategory: String,
}

impl Category {
    /// Creates a category under [`DEFAULT_SUPERCATEGORY`].
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            supercategory: DEFAULT_SUPERCATEGORY.to_string(),
        }
    }
}
