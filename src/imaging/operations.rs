//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.
//! Output parent directories are created before the backend runs.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{calculate_optimized_dimensions, calculate_thumbnail_dimensions};
use super::params::{Quality, ResizeParams};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Configuration for thumbnail generation.
#[derive(Debug, Clone)]
pub struct ThumbnailConfig {
    /// Exact output width; small sources are scaled up.
    pub width: u32,
    pub quality: Quality,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            width: 600,
            quality: Quality::new(85),
        }
    }
}

/// Configuration for the size-capped optimized copy.
#[derive(Debug, Clone)]
pub struct OptimizedConfig {
    /// Width cap; narrower sources keep their size.
    pub max_width: u32,
    pub quality: Quality,
}

impl Default for OptimizedConfig {
    fn default() -> Self {
        Self {
            max_width: 1600,
            quality: Quality::new(90),
        }
    }
}

/// Plan a thumbnail operation without executing it.
pub fn plan_thumbnail(
    source: &Path,
    output: &Path,
    original: (u32, u32),
    config: &ThumbnailConfig,
) -> ResizeParams {
    let (width, height) = calculate_thumbnail_dimensions(original, config.width);
    ResizeParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width,
        height,
        quality: config.quality,
    }
}

/// Plan an optimized-copy operation without executing it.
pub fn plan_optimized(
    source: &Path,
    output: &Path,
    original: (u32, u32),
    config: &OptimizedConfig,
) -> ResizeParams {
    let (width, height) = calculate_optimized_dimensions(original, config.max_width);
    ResizeParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width,
        height,
        quality: config.quality,
    }
}

fn ensure_parent_dir(output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn execute(backend: &impl ImageBackend, params: &ResizeParams) -> Result<Dimensions> {
    backend.resize(params)?;
    Ok(Dimensions {
        width: params.width,
        height: params.height,
    })
}

/// Create a thumbnail exactly `config.width` wide. Returns the written size.
pub fn create_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    config: &ThumbnailConfig,
) -> Result<Dimensions> {
    ensure_parent_dir(output)?;
    let original = get_dimensions(backend, source)?;
    execute(backend, &plan_thumbnail(source, output, original, config))
}

/// Create an optimized copy no wider than `config.max_width`. Returns the written size.
pub fn create_optimized(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    config: &OptimizedConfig,
) -> Result<Dimensions> {
    ensure_parent_dir(output)?;
    let original = get_dimensions(backend, source)?;
    execute(backend, &plan_optimized(source, output, original, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use tempfile::TempDir;

    #[test]
    fn get_dimensions_calls_backend() {
        let backend = MockBackend::with_dimensions(Dimensions {
            width: 1920,
            height: 1080,
        });

        let dims = get_dimensions(&backend, Path::new("/test.jpg")).unwrap();
        assert_eq!(dims, (1920, 1080));
    }

    #[test]
    fn plan_thumbnail_scales_to_width() {
        let params = plan_thumbnail(
            Path::new("/source.jpg"),
            Path::new("/thumb.jpg"),
            (4000, 3000),
            &ThumbnailConfig::default(),
        );

        assert_eq!((params.width, params.height), (600, 450));
        assert_eq!(params.quality.value(), 85);
    }

    #[test]
    fn plan_optimized_does_not_upscale() {
        let params = plan_optimized(
            Path::new("/source.jpg"),
            Path::new("/opt.jpg"),
            (800, 600),
            &OptimizedConfig::default(),
        );

        assert_eq!((params.width, params.height), (800, 600));
        assert_eq!(params.quality.value(), 90);
    }

    #[test]
    fn create_thumbnail_creates_parent_and_uses_backend() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("thumbs/makax-2024/a.jpg");
        let backend = MockBackend::new();

        let dims = create_thumbnail(
            &backend,
            Path::new("/source.jpg"),
            &output,
            &ThumbnailConfig::default(),
        )
        .unwrap();

        assert_eq!(
            dims,
            Dimensions {
                width: 600,
                height: 450
            }
        );
        assert!(tmp.path().join("thumbs/makax-2024").is_dir());

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(&ops[0], RecordedOp::Identify(_)));
        assert!(matches!(
            &ops[1],
            RecordedOp::Resize {
                width: 600,
                height: 450,
                quality: 85,
                ..
            }
        ));
    }

    #[test]
    fn create_optimized_downsizes_large_source() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::new();

        let dims = create_optimized(
            &backend,
            Path::new("/source.jpg"),
            &tmp.path().join("optimized/a.jpg"),
            &OptimizedConfig::default(),
        )
        .unwrap();

        assert_eq!((dims.width, dims.height), (1600, 1200));
    }

    #[test]
    fn identify_failure_skips_resize() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::new().failing_on("broken");

        let result = create_thumbnail(
            &backend,
            Path::new("/links/broken.jpg"),
            &tmp.path().join("thumbs/broken.jpg"),
            &ThumbnailConfig::default(),
        );

        assert!(result.is_err());
        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        // Output directory is created before the source is read
        assert!(tmp.path().join("thumbs").is_dir());
    }
}
