//! # Auto Gallery
//!
//! Batch-converts a folder tree of photos into web-ready gallery assets.
//! The folder tree is the data source: every directory holding JPEGs becomes
//! a gallery folder, and event, category, sport, date and title are all read
//! from folder and file names.
//!
//! # Pipeline
//!
//! A single pass, one file at a time:
//!
//! ```text
//! links/  →  scan        photo folders, sorted
//!         →  metadata    event / category / sport per folder, date + title per file
//!         →  imaging     thumbs/…  (600px)   optimized/…  (≤1600px)
//!         →  manifest    json/<folder>.json after each folder,
//!                        photos-data.json + json/index.json at the end
//! ```
//!
//! A photo that fails to decode is skipped and the run carries on. Every run
//! rebuilds every output; nothing is cached.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the source tree and lists photo folders |
//! | [`process`] | Runs the pass: derivatives, records, every manifest write |
//! | [`manifest`] | JSON manifests: per-folder, aggregate, index |
//! | [`metadata`] | Event, category, sport and date inference |
//! | [`naming`] | Filename conventions: date prefix, titles, folder ids |
//! | [`imaging`] | Pure-Rust thumbnail and optimized-copy generation |
//! | [`config`] | Optional `auto-gallery.toml` loading and validation |
//! | [`types`] | Records serialized into the manifests |
//! | [`output`] | CLI output formatting |
//!
//! # Output Compatibility
//!
//! The manifests feed an existing web front end, so their shape is fixed:
//! key order, the omitted `sport` key on non-sport records, Spanish category
//! and sport labels, 4-space indentation and literal UTF-8 all match what it
//! already reads.

pub mod config;
pub mod imaging;
pub mod manifest;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod process;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
