//! YOLO-side inputs: class list, per-image label files and the image
//! directory they describe.

pub mod classes;
pub mod images;
pub mod label;

pub use classes::{parse_classes, read_classes, ClassList};
pub use images::{
    is_accepted_image, label_path_for, list_images, read_image_dimensions, ImageEntry,
};
pub use label::{parse_label_line, read_label_file, YoloLabelRow};
