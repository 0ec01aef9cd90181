//! Fuzz target for class list parsing.
//!
//! Any text must parse, and the categories built from it must be numbered
//! 1..=N in order.

#![no_main]

use libfuzzer_sys::fuzz_target;
use yolo2coco::yolo::parse_classes;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let categories = parse_classes(text).to_categories();
    for (index, category) in categories.iter().enumerate() {
        assert_eq!(category.id.as_i64(), index as i64 + 1);
    }
});
