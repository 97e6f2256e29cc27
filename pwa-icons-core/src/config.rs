use serde::{Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Edge length of a square icon in pixels.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconSize(pub u32);

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn sizes(sizes: &[u32]) -> Vec<IconSize> {
    sizes.iter().copied().map(IconSize).collect()
}

pub fn default_standard_sizes() -> Vec<IconSize> {
    sizes(&[
        16, 32, 57, 60, 72, 76, 96, 114, 120, 128, 144, 152, 180, 192, 384, 512,
    ])
}

pub fn default_maskable_sizes() -> Vec<IconSize> {
    sizes(&[192, 512])
}

pub fn default_favicon_sizes() -> Vec<IconSize> {
    sizes(&[16, 32, 48])
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid color '{0}', expected a hex color like '#004080'")]
pub struct InvalidColor(String);

impl FromStr for Color {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(InvalidColor(s.to_owned()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| InvalidColor(s.to_owned()))
        };
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct Maskable {
    pub background: Color,
    /// fraction of the icon edge covered by the source content
    pub safe_zone: f64,
}

impl Default for Maskable {
    fn default() -> Self {
        Maskable {
            background: Color::rgb(0, 64, 128),
            safe_zone: 0.8,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub output_dir: PathBuf,
    pub standard_sizes: Vec<IconSize>,
    pub maskable_sizes: Vec<IconSize>,
    pub favicon_sizes: Vec<IconSize>,
    pub svg_render_size: IconSize,
    pub maskable: Maskable,

    /// path of the configuration file, if the configuration was loaded from a file
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output_dir: PathBuf::from("icons"),
            standard_sizes: default_standard_sizes(),
            maskable_sizes: default_maskable_sizes(),
            favicon_sizes: default_favicon_sizes(),
            svg_render_size: IconSize(512),
            maskable: Default::default(),
            source: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("invalid configuration string")]
    InvalidConfigString(String, #[source] eyre::Report),
    #[error("invalid configuration file {}", .0.display())]
    InvalidConfigFile(PathBuf, #[source] eyre::Report),
    #[error("i/o error reading configuration file {}", .0.display())]
    IoError(PathBuf, #[source] std::io::Error),
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum InvalidConfig {
    #[error("{0} must not contain a zero size")]
    ZeroSize(&'static str),
    #[error("favicon size {0} is larger than 256, which ICO files can't hold")]
    FaviconTooLarge(IconSize),
    #[error("maskable safe zone {0} is not in the range (0, 1]")]
    SafeZone(f64),
}

impl Config {
    pub fn parse(s: &str) -> Result<Config, ConfigLoadError> {
        toml::from_str(s).map_err(|e| ConfigLoadError::InvalidConfigString(s.to_owned(), e.into()))
    }

    pub fn parse_file(p: &Path) -> Result<Config, ConfigLoadError> {
        let config_string =
            std::fs::read_to_string(p).map_err(|e| ConfigLoadError::IoError(p.to_owned(), e))?;
        let mut config: Config = toml::from_str(&config_string)
            .map_err(|e| ConfigLoadError::InvalidConfigFile(p.to_owned(), e.into()))?;
        config.source = Some(p.to_owned());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InvalidConfig> {
        let lists = [
            ("standard-sizes", &self.standard_sizes),
            ("maskable-sizes", &self.maskable_sizes),
            ("favicon-sizes", &self.favicon_sizes),
        ];
        for (name, sizes) in lists {
            if sizes.iter().any(|s| s.0 == 0) {
                return Err(InvalidConfig::ZeroSize(name));
            }
        }
        if self.svg_render_size.0 == 0 {
            return Err(InvalidConfig::ZeroSize("svg-render-size"));
        }
        if let Some(&size) = self.favicon_sizes.iter().find(|s| s.0 > 256) {
            return Err(InvalidConfig::FaviconTooLarge(size));
        }
        let safe_zone = self.maskable.safe_zone;
        if !(safe_zone > 0.0 && safe_zone <= 1.0) {
            return Err(InvalidConfig::SafeZone(safe_zone));
        }
        Ok(())
    }
}
