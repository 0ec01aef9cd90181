#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Minimal PNG: signature plus an IHDR chunk, enough for header probing.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(33);
    bytes.extend_from_slice(b"\x89PNG\r\n\x1a\n");
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 2, 0, 0, 0]);
    // CRC is not checked by header probing
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes
}

pub fn write_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, png_bytes(width, height)).expect("write png file");
}

/// A YOLO dataset laid out under a temp dir: `images/`, `labels/`,
/// `classes.txt`.
pub struct YoloFixture {
    pub temp: tempfile::TempDir,
    pub images: PathBuf,
    pub labels: PathBuf,
    pub classes: PathBuf,
    pub output: PathBuf,
}

impl YoloFixture {
    pub fn new(classes: &str) -> Self {
        let temp = tempfile::tempdir().expect("create temp dir");
        let images = temp.path().join("images");
        let labels = temp.path().join("labels");
        let classes_path = temp.path().join("classes.txt");
        let output = temp.path().join("coco.json");
        fs::create_dir_all(&images).expect("create images dir");
        fs::create_dir_all(&labels).expect("create labels dir");
        fs::write(&classes_path, classes).expect("write classes");
        Self {
            temp,
            images,
            labels,
            classes: classes_path,
            output,
        }
    }

    pub fn image(&self, name: &str, width: u32, height: u32) -> &Self {
        write_png(&self.images.join(name), width, height);
        self
    }

    pub fn label(&self, name: &str, content: &str) -> &Self {
        fs::write(self.labels.join(name), content).expect("write label file");
        self
    }

    pub fn options(&self) -> yolo2coco::ConvertOptions {
        yolo2coco::ConvertOptions::new(&self.images, &self.labels, &self.classes)
            .with_output(&self.output)
    }
}
