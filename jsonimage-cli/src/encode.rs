//! Image encoding for decoded output: JPEG, PNG

use anyhow::{Context, Result};
use imageproc::image::{ColorType, DynamicImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg { quality: u8 },
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg { .. } => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

/// Compress an image to JPEG format with the specified quality
pub fn compress_to_jpeg<W>(img: &DynamicImage, writer: &mut W, quality: u8) -> Result<()>
where
    W: std::io::Write,
{
    use imageproc::image::codecs::jpeg::JpegEncoder;
    use imageproc::image::{ExtendedColorType, ImageEncoder};

    // JPEG has no alpha channel
    let rgb = img.to_rgb8();
    let encoder = JpegEncoder::new_with_quality(writer, quality);

    encoder
        .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .with_context(|| "Failed to compress image to JPEG")?;

    Ok(())
}

/// Compress an image to PNG format, keeping its color type
pub fn compress_to_png<W>(img: &DynamicImage, writer: &mut W) -> Result<()>
where
    W: std::io::Write,
{
    use imageproc::image::codecs::png::{CompressionType, FilterType, PngEncoder};
    use imageproc::image::ImageEncoder;

    let is_grayscale = img.color() == ColorType::L8 || img.color() == ColorType::La8;

    let encoder = PngEncoder::new_with_quality(
        writer,
        CompressionType::Default,
        if is_grayscale {
            FilterType::NoFilter
        } else {
            FilterType::Adaptive
        },
    );

    encoder
        .write_image(
            img.as_bytes(),
            img.width(),
            img.height(),
            img.color().into(),
        )
        .with_context(|| "Failed to compress image to PNG")?;

    Ok(())
}

pub fn encode_image<W>(img: &DynamicImage, writer: &mut W, format: OutputFormat) -> Result<()>
where
    W: std::io::Write,
{
    match format {
        OutputFormat::Jpeg { quality } => compress_to_jpeg(img, writer, quality),
        OutputFormat::Png => compress_to_png(img, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::image::{load_from_memory, GenericImageView};

    #[test]
    fn encodes_rgba_to_both_formats() {
        let img = DynamicImage::new_rgba8(6, 3);

        for format in [OutputFormat::Png, OutputFormat::Jpeg { quality: 85 }] {
            let mut buffer = Vec::new();
            encode_image(&img, &mut buffer, format).unwrap();
            assert_eq!(load_from_memory(&buffer).unwrap().dimensions(), (6, 3));
        }
    }
}
