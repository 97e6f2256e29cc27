//! Writes the legacy multi-resolution `favicon.ico`.

use crate::{config::IconSize, render, source::SourceImage};
use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

#[derive(Debug, thiserror::Error)]
pub enum FaviconError {
    #[error("failed to encode {0}x{0} favicon entry")]
    Encode(IconSize, #[source] std::io::Error),
    #[error("failed to write favicon file {}", .0.display())]
    Write(PathBuf, #[source] std::io::Error),
}

/// Builds the icon directory in memory, one entry per size in the given order.
pub fn build_icon_dir(source: &SourceImage, sizes: &[IconSize]) -> Result<IconDir, FaviconError> {
    let mut icon_dir = IconDir::new(ResourceType::Icon);
    for &size in sizes {
        let resized = render::resize(source.image(), size);
        let image = IconImage::from_rgba_data(size.0, size.0, resized.into_raw());
        let entry = IconDirEntry::encode(&image).map_err(|e| FaviconError::Encode(size, e))?;
        icon_dir.add_entry(entry);
    }
    Ok(icon_dir)
}

pub fn write_ico(
    source: &SourceImage,
    sizes: &[IconSize],
    path: &Path,
) -> Result<(), FaviconError> {
    let icon_dir = build_icon_dir(source, sizes)?;
    let write = || -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        icon_dir.write(&mut writer)?;
        writer.flush()
    };
    write().map_err(|e| FaviconError::Write(path.to_owned(), e))
}
