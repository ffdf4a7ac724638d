//! Thumbnail generation

use imageproc::image::imageops::FilterType;
use imageproc::image::DynamicImage;

use crate::context::ThumbnailOptions;

/// Downsample `img` to fit (or fill, when cropping) the thumbnail box.
///
/// Returns `None` when the image already fits; thumbnails never upscale.
pub(super) fn thumbnail(img: &DynamicImage, options: ThumbnailOptions) -> Option<DynamicImage> {
    let width = options.width.max(1);
    let height = options.height.max(1);

    if img.width() <= width && img.height() <= height {
        return None;
    }

    let thumbnail = if options.crop {
        img.resize_to_fill(width, height, FilterType::Triangle)
    } else {
        img.thumbnail(width, height)
    };

    log::trace!(
        "Thumbnail {}x{} -> {}x{}",
        img.width(),
        img.height(),
        thumbnail.width(),
        thumbnail.height()
    );
    Some(thumbnail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_upscales() {
        let img = DynamicImage::new_rgba8(4, 4);
        assert!(thumbnail(&img, ThumbnailOptions::new(16, 16)).is_none());
    }

    #[test]
    fn crop_fills_the_box() {
        let img = DynamicImage::new_rgba8(40, 20);
        let cropped = thumbnail(&img, ThumbnailOptions::new(10, 10).cropped()).unwrap();
        assert_eq!((cropped.width(), cropped.height()), (10, 10));
    }
}
