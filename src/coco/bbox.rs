//! Bounding boxes in COCO's `[x_min, y_min, width, height]` layout.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use super::space::{Normalized, Pixel};

/// An axis-aligned box stored as top-left corner plus extent.
///
/// `TSpace` is [`Pixel`] or [`Normalized`]. Nothing is clamped or
/// reordered; a YOLO row with a negative width produces a box with a
/// negative width.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxXYWH<TSpace> {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace> BBoxXYWH<TSpace> {
    #[inline]
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            _space: PhantomData,
        }
    }

    /// Returns `width * height`. May be negative for malformed boxes.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.width, self.height]
    }
}

impl BBoxXYWH<Normalized> {
    /// Builds a box from a YOLO center/extent row.
    #[inline]
    pub fn from_cxcywh(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Self::from_xywh(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    /// Scales into pixel space.
    ///
    /// Each component is multiplied by the matching image dimension, so
    /// `x_min = (cx - w / 2) * image_width` and `width = w * image_width`.
    #[inline]
    pub fn to_pixel(&self, image_width: f64, image_height: f64) -> BBoxXYWH<Pixel> {
        BBoxXYWH::from_xywh(
            self.x * image_width,
            self.y * image_height,
            self.width * image_width,
            self.height * image_height,
        )
    }
}

impl<TSpace> std::fmt::Debug for BBoxXYWH<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxXYWH")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

// Manual impls so that TSpace needs no serde bounds.
impl<TSpace> Serialize for BBoxXYWH<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

impl<'de, TSpace> Deserialize<'de> for BBoxXYWH<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<f64>::deserialize(deserializer)?;
        match values.as_slice() {
            &[x, y, width, height] => Ok(Self::from_xywh(x, y, width, height)),
            other => Err(D::Error::invalid_length(
                other.len(),
                &"a bbox of 4 numbers [x, y, width, height]",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_box_scales_to_pixels() {
        let norm = BBoxXYWH::<Normalized>::from_cxcywh(0.5, 0.5, 0.4, 0.2);
        let px = norm.to_pixel(100.0, 200.0);

        assert_eq!(px.to_array(), [30.0, 80.0, 40.0, 40.0]);
        assert_eq!(px.area(), 1600.0);
    }

    #[test]
    fn boxes_past_the_edge_are_kept() {
        let px = BBoxXYWH::<Normalized>::from_cxcywh(0.0, 1.0, 0.5, 0.5).to_pixel(10.0, 10.0);
        assert_eq!(px.to_array(), [-2.5, 7.5, 5.0, 5.0]);
    }

    #[test]
    fn serializes_as_four_element_array() {
        let bbox = BBoxXYWH::<Pixel>::from_xywh(1.0, 2.0, 3.5, 4.0);
        assert_eq!(serde_json::to_string(&bbox).unwrap(), "[1.0,2.0,3.5,4.0]");

        let back: BBoxXYWH<Pixel> = serde_json::from_str("[1.0,2.0,3.5,4.0]").unwrap();
        assert_eq!(back, bbox);
    }

    #[test]
    fn rejects_wrong_length_arrays() {
        let err = serde_json::from_str::<BBoxXYWH<Pixel>>("[1.0,2.0,3.0]").unwrap_err();
        assert!(err.to_string().contains("4 numbers"));
    }

    #[test]
    fn detects_non_finite_components() {
        assert!(BBoxXYWH::<Pixel>::from_xywh(0.0, 0.0, 1.0, 1.0).is_finite());
        assert!(!BBoxXYWH::<Pixel>::from_xywh(f64::NAN, 0.0, 1.0, 1.0).is_finite());
    }
}
