//! Newtype ids for the three COCO tables.
//!
//! COCO links images, annotations and categories only through integer ids,
//! so each table gets its own type to keep `image_id` and `category_id` from
//! being swapped.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! coco_id {
    ($(#[$meta:meta])* $name:ident($repr:ty), $as_repr:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $repr);

        impl $name {
            /// The first id handed out in a conversion run.
            pub const FIRST: Self = Self(1);

            #[inline]
            pub fn new(id: $repr) -> Self {
                Self(id)
            }

            #[inline]
            pub fn $as_repr(&self) -> $repr {
                self.0
            }

            /// Returns the id that follows this one.
            #[inline]
            pub fn next(self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl From<$repr> for $name {
            fn from(id: $repr) -> Self {
                Self(id)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

coco_id!(
    /// Id of an entry in the COCO `images` table.
    ImageId(u64),
    as_u64
);

coco_id!(
    /// Id of an entry in the COCO `annotations` table.
    AnnotationId(u64),
    as_u64
);

coco_id!(
    /// Id of an entry in the COCO `categories` table.
    ///
    /// Category ids are YOLO class indices shifted by one. They are signed
    /// because label files may carry negative class indices, which still map
    /// to an id (`-1` becomes `0`).
    CategoryId(i64),
    as_i64
);

impl CategoryId {
    /// Maps a zero-based YOLO class index to its COCO category id.
    #[inline]
    pub fn from_class_index(index: i64) -> Self {
        Self(index.saturating_add(1))
    }
}
