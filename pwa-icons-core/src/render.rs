use crate::{
    config::{Color, IconSize},
    source::SourceImage,
};
use image::{imageops::FilterType, ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to write PNG file {}", .0.display())]
    Encode(PathBuf, #[source] image::ImageError),
}

/// Resizes to exactly `size`x`size`, ignoring the source aspect ratio.
pub fn resize(image: &RgbaImage, size: IconSize) -> RgbaImage {
    image::imageops::resize(image, size.0, size.0, FilterType::Lanczos3)
}

/// Edge length of the content inside a maskable icon. Never zero.
pub fn content_size(size: IconSize, safe_zone: f64) -> IconSize {
    let content = (size.0 as f64 * safe_zone).floor() as u32;
    IconSize(content.clamp(1, size.0))
}

/// Shrinks the source into the safe zone and centers it on an opaque background.
pub fn compose_maskable(
    image: &RgbaImage,
    size: IconSize,
    background: Color,
    safe_zone: f64,
) -> RgbaImage {
    let content_size = content_size(size, safe_zone);
    let content = resize(image, content_size);

    let mut canvas = RgbaImage::from_pixel(size.0, size.0, background.to_rgba());
    let offset = ((size.0 - content_size.0) / 2) as i64;
    image::imageops::overlay(&mut canvas, &content, offset, offset);
    canvas
}

fn write_png(image: &RgbaImage, path: &Path) -> Result<(), RenderError> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| RenderError::Encode(path.to_owned(), e))
}

pub fn write_standard(
    source: &SourceImage,
    size: IconSize,
    path: &Path,
) -> Result<(), RenderError> {
    write_png(&resize(source.image(), size), path)
}

pub fn write_maskable(
    source: &SourceImage,
    size: IconSize,
    background: Color,
    safe_zone: f64,
    path: &Path,
) -> Result<(), RenderError> {
    let composed = compose_maskable(source.image(), size, background, safe_zone);
    write_png(&composed, path)
}
