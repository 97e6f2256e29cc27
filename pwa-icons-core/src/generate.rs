use crate::{
    config::{Config, IconSize},
    favicon::{self, FaviconError},
    render::{self, RenderError},
    source::SourceImage,
};
use std::path::{Path, PathBuf};

pub const FAVICON_FILE_NAME: &str = "favicon.ico";

pub fn standard_file_name(size: IconSize) -> String {
    format!("icon-{}.png", size)
}

pub fn maskable_file_name(size: IconSize) -> String {
    format!("icon-maskable-{}.png", size)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactKind {
    Standard(IconSize),
    Maskable(IconSize),
    Favicon(Vec<IconSize>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
}

/// Everything written by one run, in the order it was written.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    pub output_dir: PathBuf,
    pub artifacts: Vec<Artifact>,
}

impl Report {
    fn record(&mut self, kind: ArtifactKind, path: PathBuf) {
        tracing::info!("created {}", path.display());
        self.artifacts.push(Artifact { kind, path });
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.artifacts.iter().map(|a| a.path.as_path())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("failed to create output directory {}", .0.display())]
    CreateOutputDir(PathBuf, #[source] std::io::Error),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Favicon(#[from] FaviconError),
}

/// Writes the standard icons, the maskable icons and the favicon, in that order.
pub fn run(source: &SourceImage, config: &Config) -> Result<Report, GenerateError> {
    let output_dir = &config.output_dir;
    std::fs::create_dir_all(output_dir)
        .map_err(|e| GenerateError::CreateOutputDir(output_dir.clone(), e))?;

    let mut report = Report {
        output_dir: output_dir.clone(),
        artifacts: Vec::new(),
    };

    tracing::info!("generating standard icons");
    for &size in &config.standard_sizes {
        let path = output_dir.join(standard_file_name(size));
        render::write_standard(source, size, &path)?;
        report.record(ArtifactKind::Standard(size), path);
    }

    tracing::info!("generating maskable icons");
    let maskable = &config.maskable;
    for &size in &config.maskable_sizes {
        let path = output_dir.join(maskable_file_name(size));
        render::write_maskable(
            source,
            size,
            maskable.background,
            maskable.safe_zone,
            &path,
        )?;
        report.record(ArtifactKind::Maskable(size), path);
    }

    tracing::info!("generating {}", FAVICON_FILE_NAME);
    let path = output_dir.join(FAVICON_FILE_NAME);
    favicon::write_ico(source, &config.favicon_sizes, &path)?;
    report.record(ArtifactKind::Favicon(config.favicon_sizes.clone()), path);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_maskable_sizes, default_standard_sizes};
    use image::{GenericImageView, Rgba, RgbaImage};

    /// Opaque 512x512 source: red with a green center square.
    fn source() -> SourceImage {
        let image = RgbaImage::from_fn(512, 512, |x, y| {
            if (192..320).contains(&x) && (192..320).contains(&y) {
                Rgba([0, 255, 0, 255])
            } else {
                Rgba([255, 0, 0, 255])
            }
        });
        SourceImage::from_rgba("icon.png", image)
    }

    fn config(output_dir: &Path) -> Config {
        Config {
            output_dir: output_dir.to_owned(),
            ..Default::default()
        }
    }

    fn dimensions(path: &Path) -> (u32, u32) {
        image::open(path).unwrap().dimensions()
    }

    #[test]
    fn should_write_every_standard_size() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());

        run(&source(), &config).unwrap();

        for size in default_standard_sizes() {
            let path = tmp.path().join(format!("icon-{}.png", size.0));
            assert_eq!(dimensions(&path), (size.0, size.0), "{}", path.display());
        }
    }

    #[test]
    fn should_write_maskable_icons_with_background_corners() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());

        run(&source(), &config).unwrap();

        for size in default_maskable_sizes() {
            let path = tmp.path().join(format!("icon-maskable-{}.png", size.0));
            let image = image::open(&path).unwrap().into_rgba8();
            let last = size.0 - 1;
            assert_eq!(image.dimensions(), (size.0, size.0));
            for (x, y) in [(0, 0), (last, 0), (0, last), (last, last)] {
                assert_eq!(image.get_pixel(x, y), &Rgba([0, 64, 128, 255]));
            }
            let center = size.0 / 2;
            assert_eq!(image.get_pixel(center, center), &Rgba([0, 255, 0, 255]));
        }
    }

    #[test]
    fn should_write_favicon_with_three_resolutions() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());

        run(&source(), &config).unwrap();

        let file = std::fs::File::open(tmp.path().join("favicon.ico")).unwrap();
        let icon_dir = ico::IconDir::read(file).unwrap();
        let sizes = icon_dir
            .entries()
            .iter()
            .map(|e| (e.width(), e.height()))
            .collect::<Vec<_>>();
        assert_eq!(sizes, vec![(16, 16), (32, 32), (48, 48)]);
    }

    #[test]
    fn should_report_artifacts_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());

        let report = run(&source(), &config).unwrap();

        assert_eq!(report.output_dir, tmp.path());
        assert_eq!(report.artifacts.len(), 16 + 2 + 1);
        assert_eq!(
            report.artifacts[0],
            Artifact {
                kind: ArtifactKind::Standard(IconSize(16)),
                path: tmp.path().join("icon-16.png"),
            }
        );
        assert_eq!(
            report.artifacts[16].kind,
            ArtifactKind::Maskable(IconSize(192))
        );
        assert_eq!(
            report.artifacts[18],
            Artifact {
                kind: ArtifactKind::Favicon(vec![IconSize(16), IconSize(32), IconSize(48)]),
                path: tmp.path().join("favicon.ico"),
            }
        );
        assert!(report.paths().all(|p| p.is_file()));
    }

    #[test]
    fn should_create_nested_output_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let output_dir = tmp.path().join("public").join("icons");
        let config = Config {
            standard_sizes: vec![IconSize(32)],
            maskable_sizes: vec![],
            ..config(&output_dir)
        };

        run(&source(), &config).unwrap();

        assert!(output_dir.join("icon-32.png").is_file());
        assert!(output_dir.join("favicon.ico").is_file());
    }

    #[test]
    fn should_produce_same_dimensions_on_rerun() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());
        let source = source();

        let first = run(&source, &config).unwrap();
        let first_dimensions = first.paths().map(dimensions).collect::<Vec<_>>();
        let second = run(&source, &config).unwrap();
        let second_dimensions = second.paths().map(dimensions).collect::<Vec<_>>();

        assert_eq!(first, second);
        assert_eq!(first_dimensions, second_dimensions);
    }

    #[test]
    fn should_fail_when_output_dir_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let output_dir = tmp.path().join("icons");
        std::fs::write(&output_dir, b"").unwrap();

        let result = run(&source(), &config(&output_dir));

        assert!(matches!(result, Err(GenerateError::CreateOutputDir(..))));
    }
}
