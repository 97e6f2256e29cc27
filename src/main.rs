use clap::Parser;
use cli::Cli;

mod cli;
mod commands;

fn setup_logger(verbose: bool) -> eyre::Result<()> {
    use tracing::Level;
    use tracing_subscriber::{
        filter::LevelFilter, fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, Registry,
    };

    let level = if verbose { Level::DEBUG } else { Level::INFO };
    Registry::default()
        .with(LevelFilter::from(level))
        .with(
            layer()
                .with_ansi(true)
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init()?;
    Ok(())
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();
    setup_logger(args.verbose)?;

    if !pwa_icons_core::source::svg_supported() {
        tracing::warn!("built without SVG support, only raster source images can be used");
    }

    let config = commands::load_config(&args)?;
    if args.print_config {
        return commands::config(&config);
    }
    commands::generate::run(args.source.as_deref(), &config)
}
