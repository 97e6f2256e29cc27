use color_eyre::Section;
use eyre::WrapErr;
use pwa_icons_core::{
    config::Config,
    generate::{self, Report},
    source::{self, SourceImage},
};
use std::path::Path;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

const NEXT_STEPS: &[&str] = &[
    "Review the generated icons",
    "Test maskable icons at https://maskable.app/",
    "Deploy your PWA",
];

fn write_color(text: &str, fg_color: Color) -> std::io::Result<()> {
    use std::io::Write as _;

    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    stdout.set_color(ColorSpec::new().set_fg(Some(fg_color)).set_bold(true))?;
    let result = stdout.write_all(text.as_bytes());
    stdout.reset().ok();
    result
}

fn print_summary(report: &Report) -> eyre::Result<()> {
    println!();
    write_color(
        &format!(
            "✓ {} icons generated in {}/",
            report.artifacts.len(),
            report.output_dir.display()
        ),
        Color::Green,
    )?;
    println!();

    println!();
    println!("Next steps:");
    for (i, step) in NEXT_STEPS.iter().enumerate() {
        println!("{}. {}", i + 1, step);
    }
    Ok(())
}

pub fn run(source_path: Option<&Path>, config: &Config) -> eyre::Result<()> {
    let source_path = source::resolve(source_path)
        .note("usage: pwa-icons [OPTIONS] [SOURCE]")
        .suggestion("provide a source image (512x512 PNG or SVG recommended)")?;

    tracing::info!("loading source {}", source_path.display());
    let source = SourceImage::load(&source_path, config.svg_render_size)
        .wrap_err("failed to load the source image")?;
    let (width, height) = source.dimensions();
    if width != height {
        tracing::warn!(
            "source image is {}x{} and will be stretched to square icons",
            width,
            height
        );
    }

    let report = generate::run(&source, config)?;
    print_summary(&report)
}
