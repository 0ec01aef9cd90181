//! YOLO to COCO conversion.
//!
//! [`build_dataset`] reads every input and assembles the COCO tables in
//! memory; [`convert`] additionally writes the result. Ids are plain
//! counters local to one run:
//!
//! - category ids follow class list order, starting at 1;
//! - image ids follow image enumeration order, starting at 1, one per image
//!   whether or not it has labels;
//! - annotation ids run across the whole dataset, starting at 1.
//!
//! The first error aborts the run. Because the output is written only after
//! assembly succeeds, a failed run leaves no output file.

pub mod report;

pub use report::ConversionReport;

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::coco::io_coco_json::write_coco_json;
use crate::coco::{Annotation, AnnotationId, Dataset, Image, ImageId};
use crate::error::Yolo2CocoError;
use crate::yolo::{list_images, read_classes, read_image_dimensions, read_label_file};

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "coco_annotations.json";

/// Inputs and output of one conversion run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Directory holding `.png`/`.jpg`/`.jpeg` images.
    pub image_dir: PathBuf,
    /// Directory holding one `<stem>.txt` label file per image.
    pub label_dir: PathBuf,
    /// Class names, one per line.
    pub classes_file: PathBuf,
    /// COCO JSON file to create or overwrite.
    pub output: PathBuf,
}

impl ConvertOptions {
    pub fn new(
        image_dir: impl Into<PathBuf>,
        label_dir: impl Into<PathBuf>,
        classes_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            image_dir: image_dir.into(),
            label_dir: label_dir.into(),
            classes_file: classes_file.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }
}

/// Converts a YOLO dataset and writes it as COCO JSON.
///
/// # Errors
/// Any read, parse, dimension or write failure. Nothing is written unless every
/// input was read successfully.
pub fn convert(opts: &ConvertOptions) -> Result<ConversionReport, Yolo2CocoError> {
    let (dataset, report) = build_dataset(&opts.image_dir, &opts.label_dir, &opts.classes_file)?;

    write_coco_json(&opts.output, &dataset)?;
    info!("wrote {}", opts.output.display());

    Ok(report)
}

/// Reads the YOLO inputs and assembles the COCO dataset without writing
/// anything.
pub fn build_dataset(
    image_dir: &Path,
    label_dir: &Path,
    classes_file: &Path,
) -> Result<(Dataset, ConversionReport), Yolo2CocoError> {
    check_inputs(image_dir, label_dir, classes_file)?;

    let classes = read_classes(classes_file)?;
    let categories = classes.to_categories();
    debug!("{} categories from {}", categories.len(), classes_file.display());

    let entries = list_images(image_dir)?;
    if entries.is_empty() {
        warn!("no .png/.jpg/.jpeg images found in {}", image_dir.display());
    }

    let mut report = ConversionReport {
        categories: categories.len(),
        blank_category_names: classes.blank_count(),
        ..Default::default()
    };

    let mut images = Vec::with_capacity(entries.len());
    let mut annotations = Vec::new();
    let mut next_image_id = ImageId::FIRST;
    let mut next_annotation_id = AnnotationId::FIRST;

    for entry in entries {
        let image_id = next_image_id;
        next_image_id = image_id.next();

        let (width, height) = read_image_dimensions(&entry.path)?;
        debug!("image {image_id}: {} ({width}x{height})", entry.file_name);

        let label_path = entry.label_path(label_dir);
        images.push(Image::new(image_id, entry.file_name, width, height));

        // Only a missing path means "no labels"; anything else at that path
        // goes through the reader and fails there if it is not a file.
        if !label_path.exists() {
            debug!("no label file {}", label_path.display());
            report.images_without_labels += 1;
            continue;
        }

        for row in read_label_file(&label_path)? {
            let category_id = row.category_id();
            if !classes.contains(category_id) {
                warn!(
                    "{}: class {} has no entry in the class list",
                    label_path.display(),
                    row.class_id
                );
                report.unknown_category_refs += 1;
            }

            let bbox = row.bbox().to_pixel(width as f64, height as f64);
            if !bbox.is_finite() {
                warn!(
                    "{}: annotation {next_annotation_id} has a non-finite bbox",
                    label_path.display()
                );
            }

            annotations.push(Annotation::new(next_annotation_id, image_id, category_id, bbox));
            next_annotation_id = next_annotation_id.next();
        }
    }

    report.images = images.len();
    report.annotations = annotations.len();

    Ok((
        Dataset {
            images,
            annotations,
            categories,
        },
        report,
    ))
}

fn check_inputs(
    image_dir: &Path,
    label_dir: &Path,
    classes_file: &Path,
) -> Result<(), Yolo2CocoError> {
    if !classes_file.is_file() {
        return Err(Yolo2CocoError::InputNotFound {
            role: "classes file",
            path: classes_file.to_path_buf(),
        });
    }
    if !image_dir.is_dir() {
        return Err(Yolo2CocoError::InputNotFound {
            role: "image directory",
            path: image_dir.to_path_buf(),
        });
    }
    if !label_dir.is_dir() {
        return Err(Yolo2CocoError::InputNotFound {
            role: "label directory",
            path: label_dir.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yolo::images::png_bytes;
    use std::fs;

    struct Layout {
        _temp: tempfile::TempDir,
        images: PathBuf,
        labels: PathBuf,
        classes: PathBuf,
    }

    fn layout(classes: &str) -> Layout {
        let temp = tempfile::tempdir().expect("create temp dir");
        let images = temp.path().join("images");
        let labels = temp.path().join("labels");
        let classes_path = temp.path().join("classes.txt");
        fs::create_dir_all(&images).expect("create images dir");
        fs::create_dir_all(&labels).expect("create labels dir");
        fs::write(&classes_path, classes).expect("write classes");
        Layout {
            _temp: temp,
            images,
            labels,
            classes: classes_path,
        }
    }

    impl Layout {
        fn build(&self) -> Result<(Dataset, ConversionReport), Yolo2CocoError> {
            build_dataset(&self.images, &self.labels, &self.classes)
        }
    }

    #[test]
    fn single_box_matches_hand_computed_values() {
        let l = layout("person\n");
        fs::write(l.images.join("img.png"), png_bytes(100, 200)).unwrap();
        fs::write(l.labels.join("img.txt"), "0 0.5 0.5 0.4 0.2\n").unwrap();

        let (dataset, report) = l.build().expect("build dataset");

        assert_eq!(dataset.annotations.len(), 1);
        let ann = &dataset.annotations[0];
        assert_eq!(ann.bbox.to_array(), [30.0, 80.0, 40.0, 40.0]);
        assert_eq!(ann.area, 1600.0);
        assert_eq!(ann.category_id.as_i64(), 1);
        assert_eq!(ann.image_id.as_u64(), 1);
        assert_eq!(report.annotations, 1);
        assert!(!report.has_warnings());
    }

    #[test]
    fn annotation_ids_continue_across_images() {
        let l = layout("a\nb\n");
        fs::write(l.images.join("a.png"), png_bytes(10, 10)).unwrap();
        fs::write(l.images.join("b.png"), png_bytes(10, 10)).unwrap();
        fs::write(l.images.join("c.png"), png_bytes(10, 10)).unwrap();
        fs::write(l.labels.join("a.txt"), "0 0.5 0.5 0.1 0.1\n1 0.5 0.5 0.1 0.1\n").unwrap();
        fs::write(l.labels.join("c.txt"), "1 0.5 0.5 0.1 0.1\n").unwrap();

        let (dataset, report) = l.build().expect("build dataset");

        let image_ids: Vec<u64> = dataset.images.iter().map(|i| i.id.as_u64()).collect();
        assert_eq!(image_ids, vec![1, 2, 3]);

        let pairs: Vec<(u64, u64)> = dataset
            .annotations
            .iter()
            .map(|a| (a.id.as_u64(), a.image_id.as_u64()))
            .collect();
        assert_eq!(pairs, vec![(1, 1), (2, 1), (3, 3)]);
        assert_eq!(report.images_without_labels, 1);
    }

    #[test]
    fn unknown_class_is_kept_and_counted() {
        let l = layout("only\n");
        fs::write(l.images.join("a.jpg"), png_bytes(4, 4)).unwrap();
        fs::write(l.labels.join("a.txt"), "5 0.5 0.5 0.5 0.5\n").unwrap();

        let (dataset, report) = l.build().expect("build dataset");
        assert_eq!(dataset.annotations[0].category_id.as_i64(), 6);
        assert_eq!(report.unknown_category_refs, 1);
        assert!(report.has_warnings());
    }

    #[test]
    fn negative_class_maps_below_first_category_and_is_counted() {
        let l = layout("person\n");
        fs::write(l.images.join("a.png"), png_bytes(10, 10)).unwrap();
        fs::write(l.labels.join("a.txt"), "-1 0.5 0.5 0.1 0.1\n0 0.5 0.5 0.1 0.1\n").unwrap();

        let (dataset, report) = l.build().expect("build dataset");

        let ids: Vec<i64> = dataset
            .annotations
            .iter()
            .map(|a| a.category_id.as_i64())
            .collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(report.unknown_category_refs, 1);
        assert!(report.has_warnings());
    }

    #[test]
    fn directory_in_place_of_label_file_is_a_read_error() {
        let l = layout("a\n");
        fs::write(l.images.join("img.png"), png_bytes(10, 10)).unwrap();
        fs::create_dir(l.labels.join("img.txt")).unwrap();

        let err = l.build().unwrap_err();
        assert!(
            matches!(&err, Yolo2CocoError::LabelRead { path, .. } if path.ends_with("img.txt")),
            "{err:?}"
        );
    }

    #[test]
    fn missing_label_dir_is_input_not_found() {
        let l = layout("a\n");
        fs::remove_dir(&l.labels).unwrap();

        let err = l.build().unwrap_err();
        assert!(matches!(
            err,
            Yolo2CocoError::InputNotFound { role: "label directory", .. }
        ));
    }

    #[test]
    fn missing_classes_file_is_input_not_found() {
        let l = layout("a\n");
        fs::remove_file(&l.classes).unwrap();

        let err = l.build().unwrap_err();
        assert!(matches!(
            err,
            Yolo2CocoError::InputNotFound { role: "classes file", .. }
        ));
    }

    #[test]
    fn convert_options_default_output() {
        let opts = ConvertOptions::new("i", "l", "c.txt");
        assert_eq!(opts.output, PathBuf::from("coco_annotations.json"));
        assert_eq!(opts.with_output("x.json").output, PathBuf::from("x.json"));
    }
}
