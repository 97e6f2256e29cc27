use crate::cli::{self, Cli};
use eyre::WrapErr;
use pwa_icons_core::config::Config;
use std::path::Path;

pub mod generate;

/// Loads the configuration file and applies the command-line overrides.
pub fn load_config(args: &Cli) -> eyre::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::parse_file(path)?,
        None => {
            let default_path = Path::new(cli::DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                Config::parse_file(default_path)?
            } else {
                Config::default()
            }
        }
    };
    if let Some(source) = &config.source {
        tracing::debug!("loaded configuration from {}", source.display());
    }

    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(background) = args.background {
        config.maskable.background = background;
    }

    config.validate().wrap_err("invalid configuration")?;
    Ok(config)
}

pub fn config(config: &Config) -> eyre::Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
