//! Image processing in pure Rust, statically linked.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` |
//! | **Thumbnail** | fixed width, Lanczos3, JPEG q85 |
//! | **Optimized copy** | width-capped, Lanczos3, JPEG q90 |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use operations::{
    OptimizedConfig, ThumbnailConfig, create_optimized, create_thumbnail, get_dimensions,
};
pub use params::{Quality, ResizeParams};
pub use rust_backend::RustBackend;
