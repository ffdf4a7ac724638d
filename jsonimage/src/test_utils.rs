use imageproc::image::{DynamicImage, ImageFormat};

use std::io::Cursor;

/// 1x1 transparent PNG
pub const PIXEL_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+P+/HgAFhAJ/wlseKgAAAABJRU5ErkJggg==";

pub fn envelope(image: &str) -> Vec<u8> {
    format!("{{\n    \"image\": \"{image}\"\n}}").into_bytes()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::new_rgb8(width, height)
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}
