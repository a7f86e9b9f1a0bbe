use std::path::PathBuf;

use clap::Parser;
use log::info;

use crate::config::{Overrides, Settings};

mod build;
mod commands;
mod config;
mod util;

/// Turn a directory of Markdown pages into a static HTML site.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// The path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Directory holding the Markdown pages and assets
    #[arg(long)]
    pages: Option<PathBuf>,

    /// Directory to write the site to
    #[arg(long)]
    output: Option<PathBuf>,

    /// Layout template every page is rendered through
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Author shown in the layout
    #[arg(long)]
    author: Option<String>,

    /// Keep running and rebuild when sources change
    #[arg(short, long, default_value = "false")]
    watch: bool,

    /// Seconds between change scans in watch mode
    #[arg(long)]
    delay: Option<u64>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            pages_dir: self.pages.clone(),
            output_dir: self.output.clone(),
            layout_file: self.layout.clone(),
            author: self.author.clone(),
            watch: self.watch,
            delay: self.delay,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let settings = Settings::load_from_arg(&args.config, &args.overrides()).inspect_err(|e| {
        log::error!("Invalid configuration: {e}");
    })?;
    info!("Settings: {settings:?}");

    if settings.watch.enabled {
        commands::watch::run(&settings).await?;
    } else {
        commands::build::run(&settings)?;
    }

    Ok(())
}
