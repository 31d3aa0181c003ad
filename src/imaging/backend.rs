//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the gallery needs:
//! identify (read dimensions) and resize (decode, resample, encode JPEG).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate and statically linked into the binary.

use super::params::ResizeParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode the source, resample to the requested size and write a JPEG.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Mock backend that records operations without executing them.
    ///
    /// Every source reports `dimensions`. Sources whose path contains one of
    /// the `failing` patterns error on identify; outputs containing one of the
    /// `failing_outputs` patterns error on resize.
    pub struct MockBackend {
        pub dimensions: Dimensions,
        pub failing: Vec<String>,
        pub failing_outputs: Vec<String>,
        pub operations: RefCell<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Resize {
            source: String,
            output: String,
            width: u32,
            height: u32,
            quality: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::with_dimensions(Dimensions {
                width: 4000,
                height: 3000,
            })
        }

        pub fn with_dimensions(dimensions: Dimensions) -> Self {
            Self {
                dimensions,
                failing: Vec::new(),
                failing_outputs: Vec::new(),
                operations: RefCell::new(Vec::new()),
            }
        }

        pub fn failing_on(mut self, pattern: &str) -> Self {
            self.failing.push(pattern.to_string());
            self
        }

        pub fn failing_output(mut self, pattern: &str) -> Self {
            self.failing_outputs.push(pattern.to_string());
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.borrow().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            let path = path.to_string_lossy().to_string();
            self.operations
                .borrow_mut()
                .push(RecordedOp::Identify(path.clone()));

            if self.failing.iter().any(|p| path.contains(p.as_str())) {
                return Err(BackendError::ProcessingFailed(format!(
                    "Failed to decode {path}"
                )));
            }
            Ok(self.dimensions)
        }

        fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
            let output = params.output.to_string_lossy().to_string();
            self.operations.borrow_mut().push(RecordedOp::Resize {
                source: params.source.to_string_lossy().to_string(),
                output: output.clone(),
                width: params.width,
                height: params.height,
                quality: params.quality.value(),
            });

            if self.failing_outputs.iter().any(|p| output.contains(p.as_str())) {
                return Err(BackendError::ProcessingFailed(format!(
                    "JPEG encode failed for {output}"
                )));
            }
            Ok(())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(Dimensions {
            width: 800,
            height: 600,
        });

        let result = backend.identify(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(result.width, 800);
        assert_eq!(result.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_fails_on_matching_source() {
        let backend = MockBackend::new().failing_on("broken");
        assert!(backend.identify(Path::new("/a/broken.jpg")).is_err());
        assert!(backend.identify(Path::new("/a/fine.jpg")).is_ok());
    }

    #[test]
    fn mock_records_resize() {
        let backend = MockBackend::new();

        backend
            .resize(&ResizeParams {
                source: "/source.jpg".into(),
                output: "/output.jpg".into(),
                width: 600,
                height: 450,
                quality: super::super::params::Quality::new(85),
            })
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Resize {
                width: 600,
                height: 450,
                quality: 85,
                ..
            }
        ));
    }
}
