//! Placeholder - placeholder image URLs and downloads.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{debug, warn};

use placeholder_images::cli::{Cli, Command};
use placeholder_images::config::{self, Config};
use placeholder_images::context::ServiceContext;
use placeholder_images::providers::{provider_for, Service};
use placeholder_images::{ImageError, PlaceholderImages};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = config::setup_logging(cli.verbose) {
        eprintln!("Warning: {e}");
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ImageError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path)?;
    debug!(path = %config_path.display(), "config loaded");

    match cli.command {
        Command::Url(image) => {
            let service = Service::from_name(&image.service)?;
            let provider = provider_for(service, config.overrides(service));
            let url = provider.url_for(image.width, image.height, &image.to_options())?;
            println!("{url}");
        }
        Command::Save { image, dir, filename_only } => {
            let service = Service::from_name(&image.service)?;
            let provider = provider_for(service, config.overrides(service));

            let mut options = image.to_options();
            if let Some(dir) = dir {
                options.insert("dir", dir);
            }
            options.insert("full_path", !filename_only);

            // Live, recording, or replaying, depending on the environment
            let (ctx, recording_session) = ServiceContext::from_env()?;
            let images = PlaceholderImages::new(provider, ctx.fetcher);
            let saved = images.fetch_and_save(image.width, image.height, &options);
            drop(images);

            // Failed downloads are recorded too, so write the cassette first
            if let Some(session) = recording_session {
                match session.finish() {
                    Ok(path) => eprintln!("Cassette saved: {}", path.display()),
                    Err(e) => warn!("failed to save cassette: {e}"),
                }
            }

            let saved: PathBuf = saved?;
            println!("{}", saved.display());
        }
    }

    Ok(())
}
