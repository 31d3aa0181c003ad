//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Scale `original` to `target_width`, keeping the aspect ratio.
///
/// The height is truncated toward zero and never drops below 1px.
/// Works in both directions: a narrower source is scaled up.
///
/// ```text
/// (4000, 3000) → 600  =>  (600, 450)
/// (300, 150)   → 600  =>  (600, 300)
/// ```
pub fn scale_to_width(original: (u32, u32), target_width: u32) -> (u32, u32) {
    let (orig_w, orig_h) = original;
    if orig_w == 0 {
        return (target_width, orig_h.max(1));
    }
    let aspect = orig_h as f64 / orig_w as f64;
    let height = (target_width as f64 * aspect) as u32;
    (target_width, height.max(1))
}

/// Thumbnail size: always exactly `width` wide, upscaling small sources.
pub fn calculate_thumbnail_dimensions(original: (u32, u32), width: u32) -> (u32, u32) {
    scale_to_width(original, width)
}

/// Optimized-copy size: capped at `max_width`, never upscaled.
pub fn calculate_optimized_dimensions(original: (u32, u32), max_width: u32) -> (u32, u32) {
    if original.0 <= max_width {
        original
    } else {
        scale_to_width(original, max_width)
    }
}
