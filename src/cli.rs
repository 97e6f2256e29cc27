use pwa_icons_core::config::Color;
use std::path::PathBuf;

/// Read if present when no configuration file is given.
pub const DEFAULT_CONFIG_FILE: &str = "pwa-icons.toml";

/// Generates PWA icons, maskable icons and a favicon from a single source image.
#[derive(clap::Parser)]
#[command(version)]
pub struct Cli {
    /// Source image; defaults to icons/icon.svg, then icons/icon.png
    #[arg(value_name = "SOURCE")]
    pub source: Option<PathBuf>,

    /// Sets a custom configuration file path
    #[arg(short, long, value_name = "FILE", env = "PWA_ICONS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Sets the directory the icons are written to
    #[arg(short, long, value_name = "DIR", env = "PWA_ICONS_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Sets the background color of maskable icons, e.g. '#004080'
    #[arg(long, value_name = "COLOR")]
    pub background: Option<Color>,

    /// Enables debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Prints the active configuration instead of generating icons
    #[arg(long)]
    pub print_config: bool,
}
