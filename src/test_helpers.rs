//! Shared test utilities for the auto-gallery test suite.
//!
//! Source-tree builders plus lookup helpers over a processed [`Gallery`].
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! create_dummy_source(tmp.path(), "links/makax-2024/a.jpg");
//! let gallery = process_with_backend(&MockBackend::new(), &test_config(tmp.path()), today, |_| {}).unwrap();
//!
//! let record = find_record(&gallery, "A");
//! assert_eq!(record.event, "Makax");
//! ```

use std::path::Path;

use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;

use crate::process::{Gallery, ProcessConfig};
use crate::types::PhotoRecord;

// =========================================================================
// Source tree setup
// =========================================================================

/// Write a real JPEG of the given size, whatever the file extension.
pub fn write_test_jpeg(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = JpegEncoder::new_with_quality(file, 90);
    encoder.encode_image(&img).unwrap();
}

/// Create an empty file at `root/rel`. Enough for the mock backend.
pub fn create_dummy_source(root: &Path, rel: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "").unwrap();
}

/// Process config reading `root/links` and writing to `root/site`.
pub fn test_config(root: &Path) -> ProcessConfig {
    ProcessConfig {
        source: root.join("links"),
        output: root.join("site"),
        ..ProcessConfig::default()
    }
}

// =========================================================================
// Gallery lookups (panic with a clear message on miss)
// =========================================================================

/// Find a record by title. Panics if not found.
pub fn find_record<'a>(gallery: &'a Gallery, title: &str) -> &'a PhotoRecord {
    gallery
        .photos
        .iter()
        .find(|r| r.title == title)
        .unwrap_or_else(|| {
            let titles = record_titles(gallery);
            panic!("record '{title}' not found. Available: {titles:?}")
        })
}

/// All record titles in gallery order.
pub fn record_titles(gallery: &Gallery) -> Vec<&str> {
    gallery.photos.iter().map(|r| r.title.as_str()).collect()
}

/// Parse a written list of records.
pub fn read_records(path: &Path) -> Vec<PhotoRecord> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    serde_json::from_str(&content).unwrap()
}
