use crate::config::IconSize;
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Candidates tried in order when no source path is given.
pub const DEFAULT_SOURCES: &[&str] = &["icons/icon.svg", "icons/icon.png"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Raster,
    Vector,
}

impl SourceKind {
    pub fn for_path(path: &Path) -> SourceKind {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => SourceKind::Vector,
            _ => SourceKind::Raster,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("source file '{}' not found", .0.display())]
    NotFound(PathBuf),
    #[error("i/o error reading source file {}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),
    #[error("failed to decode source image {}", .0.display())]
    Decode(PathBuf, #[source] image::ImageError),
    #[error("failed to parse SVG file {}", .0.display())]
    Svg(PathBuf, #[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("failed to rasterize SVG file {}: {1}", .0.display())]
    Rasterize(PathBuf, String),
    #[error("can't process SVG file {} because SVG support is not enabled in this build", .0.display())]
    SvgUnsupported(PathBuf),
}

/// Whether this build can rasterize SVG sources.
pub const fn svg_supported() -> bool {
    cfg!(feature = "svg")
}

/// Picks the source image path: the explicit one if given, otherwise the first existing
/// default, falling back to the last default so the error names it.
pub fn resolve(explicit: Option<&Path>) -> Result<PathBuf, SourceError> {
    let path = match explicit {
        Some(path) => path.to_owned(),
        None => DEFAULT_SOURCES
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCES[DEFAULT_SOURCES.len() - 1])),
    };
    if !path.is_file() {
        return Err(SourceError::NotFound(path));
    }
    Ok(path)
}

/// The decoded source image, always RGBA.
#[derive(Debug, Clone)]
pub struct SourceImage {
    path: PathBuf,
    kind: SourceKind,
    image: RgbaImage,
}

impl SourceImage {
    pub fn load(path: &Path, svg_render_size: IconSize) -> Result<SourceImage, SourceError> {
        if !path.is_file() {
            return Err(SourceError::NotFound(path.to_owned()));
        }

        let kind = SourceKind::for_path(path);
        let image = match kind {
            SourceKind::Vector => rasterize_svg(path, svg_render_size)?,
            SourceKind::Raster => {
                let dynamic = image::io::Reader::open(path)
                    .map_err(|e| SourceError::Io(path.to_owned(), e))?
                    .with_guessed_format()
                    .map_err(|e| SourceError::Io(path.to_owned(), e))?
                    .decode()
                    .map_err(|e| SourceError::Decode(path.to_owned(), e))?;
                tracing::debug!(
                    "decoded {} as {:?} ({}x{})",
                    path.display(),
                    dynamic.color(),
                    dynamic.width(),
                    dynamic.height()
                );
                dynamic.into_rgba8()
            }
        };

        Ok(SourceImage {
            path: path.to_owned(),
            kind,
            image,
        })
    }

    pub fn from_rgba(path: impl Into<PathBuf>, image: RgbaImage) -> SourceImage {
        SourceImage {
            path: path.into(),
            kind: SourceKind::Raster,
            image,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

#[cfg(feature = "svg")]
fn rasterize_svg(path: &Path, size: IconSize) -> Result<RgbaImage, SourceError> {
    use resvg::{tiny_skia, usvg};
    use std::sync::Arc;

    let svg_data = std::fs::read(path).map_err(|e| SourceError::Io(path.to_owned(), e))?;
    let mut opt = usvg::Options {
        resources_dir: path.parent().map(Path::to_owned),
        ..Default::default()
    };
    // text elements render nothing without fonts
    Arc::make_mut(&mut opt.fontdb).load_system_fonts();
    let tree = usvg::Tree::from_data(&svg_data, &opt)
        .map_err(|e| SourceError::Svg(path.to_owned(), e.into()))?;

    let mut pixmap = tiny_skia::Pixmap::new(size.0, size.0).ok_or_else(|| {
        SourceError::Rasterize(
            path.to_owned(),
            format!("failed to allocate {size}x{size} pixmap"),
        )
    })?;
    let svg_size = tree.size();
    let transform = fit_transform(svg_size.width(), svg_size.height(), size);
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    tracing::debug!(
        "rasterized {} ({}x{}) at {size}x{size}",
        path.display(),
        svg_size.width(),
        svg_size.height()
    );

    // tiny-skia pixels are premultiplied, the PNG encoder converts them back to straight alpha
    let png = pixmap
        .encode_png()
        .map_err(|e| SourceError::Rasterize(path.to_owned(), e.to_string()))?;
    let image = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
        .map_err(|e| SourceError::Decode(path.to_owned(), e))?;
    Ok(image.into_rgba8())
}

/// Scales the drawing to fit inside the square and centers it, keeping the aspect ratio.
#[cfg(feature = "svg")]
fn fit_transform(width: f32, height: f32, size: IconSize) -> resvg::tiny_skia::Transform {
    let target = size.0 as f32;
    let scale = (target / width).min(target / height);
    let tx = (target - width * scale) / 2.0;
    let ty = (target - height * scale) / 2.0;
    resvg::tiny_skia::Transform::from_row(scale, 0.0, 0.0, scale, tx, ty)
}

#[cfg(not(feature = "svg"))]
fn rasterize_svg(path: &Path, _size: IconSize) -> Result<RgbaImage, SourceError> {
    Err(SourceError::SvgUnsupported(path.to_owned()))
}
