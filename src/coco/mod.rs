//! COCO detection output model.
//!
//! The converter assembles a [`Dataset`] in memory and hands it to
//! [`io_coco_json::write_coco_json`] once every input has been read.
//!
//! # Example
//!
//! ```
//! use yolo2coco::coco::{Annotation, BBoxXYWH, Category, Dataset, Image, Normalized};
//!
//! let bbox = BBoxXYWH::<Normalized>::from_cxcywh(0.5, 0.5, 0.4, 0.2).to_pixel(100.0, 200.0);
//! let dataset = Dataset {
//!     images: vec![Image::new(1u64, "image.jpg", 100, 200)],
//!     annotations: vec![Annotation::new(1u64, 1u64, 1i64, bbox)],
//!     categories: vec![Category::new(1i64, "person")],
//! };
//! assert_eq!(dataset.annotations[0].area, 1600.0);
//! ```

mod bbox;
mod ids;
pub mod io_coco_json;
mod model;
mod space;

pub use bbox::BBoxXYWH;
pub use ids::{AnnotationId, CategoryId, ImageId};
pub use model::{Annotation, Category, Dataset, Image, DEFAULT_SUPERCATEGORY};
pub use space::{Normalized, Pixel};
