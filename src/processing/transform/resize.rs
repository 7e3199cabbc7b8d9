//! Resize logic mapping task dimensions to `image` operations.

use image::DynamicImage;
use image::imageops::FilterType;
use crate::core::ImageTask;
use crate::utils::{TaskError, TaskResult};

/// Upper bound on the pixel count of a resize target and of the
/// intermediate buffer the resampler allocates (source width × target height).
pub const MAX_RESIZE_PIXELS: u64 = 1 << 26;

/// Applies the resize requested by `task` to `image`.
///
/// Returns the image unchanged when the task keeps its original size or
/// asks for 0×0. With only one dimension set the other one follows the
/// source aspect ratio; with both set the image is resized exactly.
/// Targets above [`MAX_RESIZE_PIXELS`] fail the task instead of allocating.
pub fn apply_resize(image: DynamicImage, task: &ImageTask) -> TaskResult<DynamicImage> {
    if task.keep_original_size {
        return Ok(image);
    }

    match target_dimensions((image.width(), image.height()), (task.width, task.height)) {
        Some((w, h)) if (w, h) != (image.width(), image.height()) => {
            check_target_size(image.width(), (w, h))?;
            Ok(image.resize_exact(w, h, FilterType::Lanczos3))
        }
        _ => Ok(image),
    }
}

fn check_target_size(src_w: u32, (w, h): (u32, u32)) -> TaskResult<()> {
    let pixels = w as u64 * h as u64;
    let intermediate = src_w as u64 * h as u64;
    if pixels > MAX_RESIZE_PIXELS || intermediate > MAX_RESIZE_PIXELS {
        return Err(TaskError::transform(format!(
            "target size {w}×{h} too large (limit {MAX_RESIZE_PIXELS} pixels)"
        )));
    }
    Ok(())
}

/// Resolves the requested size against the source size.
///
/// `None` means "keep the source size".
fn target_dimensions(source: (u32, u32), requested: (u32, u32)) -> Option<(u32, u32)> {
    let (src_w, src_h) = source;
    if src_w == 0 || src_h == 0 {
        return None;
    }

    match requested {
        (0, 0) => None,
        (w, 0) => Some((w, scale(src_h, w, src_w))),
        (0, h) => Some((scale(src_w, h, src_h), h)),
        (w, h) => Some((w, h)),
    }
}

/// `value * numerator / denominator`, rounded, never below 1.
fn scale(value: u32, numerator: u32, denominator: u32) -> u32 {
    let scaled = (value as u64 * numerator as u64 + denominator as u64 / 2) / denominator as u64;
    scaled.clamp(1, u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_by_zero_keeps_source_size() {
        assert_eq!(target_dimensions((800, 600), (0, 0)), None);
    }

    #[test]
    fn single_dimension_preserves_aspect_ratio() {
        assert_eq!(target_dimensions((800, 600), (400, 0)), Some((400, 300)));
        assert_eq!(target_dimensions((800, 600), (0, 150)), Some((200, 150)));
        assert_eq!(target_dimensions((1000, 3), (10, 0)), Some((10, 1)));
    }

    #[test]
    fn both_dimensions_resize_exactly() {
        assert_eq!(target_dimensions((800, 600), (100, 100)), Some((100, 100)));
    }

    #[test]
    fn keep_original_size_skips_resize() {
        let image = DynamicImage::new_rgb8(20, 10);
        let task = ImageTask { width: 5, height: 5, keep_original_size: true, ..ImageTask::default() };
        let out = apply_resize(image, &task).unwrap();
        assert_eq!((out.width(), out.height()), (20, 10));
    }

    #[test]
    fn resizes_when_requested() {
        let image = DynamicImage::new_rgb8(20, 10);
        let task = ImageTask { width: 10, ..ImageTask::default() };
        let out = apply_resize(image, &task).unwrap();
        assert_eq!((out.width(), out.height()), (10, 5));
    }

    #[test]
    fn oversized_target_fails_without_allocating() {
        let task = ImageTask { width: u32::MAX, height: u32::MAX, ..ImageTask::default() };
        let err = apply_resize(DynamicImage::new_rgb8(4, 4), &task).unwrap_err();
        assert!(matches!(err, TaskError::Transform(_)));

        // One huge dimension scales the other one up past the limit too
        let task = ImageTask { width: 1 << 20, ..ImageTask::default() };
        assert!(apply_resize(DynamicImage::new_rgb8(4, 4), &task).is_err());
    }

    #[test]
    fn tall_target_is_bounded_by_source_width() {
        // 8192 × 8192 is exactly at the limit; a wide source pushes the
        // intermediate buffer over it
        assert!(check_target_size(8192, (8192, 8192)).is_ok());
        assert!(check_target_size(16384, (16, 8192)).is_err());
    }
}
