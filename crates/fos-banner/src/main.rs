//! fOS Banner - Main Entry Point

use anyhow::Result;
use fos_banner::{BannerConfig, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "fos-banner".to_string());

    let config = match BannerConfig::from_args(args) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            println!("{}", BannerConfig::usage(&program));
            return Ok(());
        }
        Err(e) => {
            eprintln!("{e}\n");
            eprintln!("{}", BannerConfig::usage(&program));
            std::process::exit(2);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_deref().unwrap_or("info")));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting fOS Banner...");
    let report = fos_banner::run(&config)?;
    if let Some(metrics) = report.metrics {
        tracing::debug!("Text metrics: {:?}", metrics);
    }

    Ok(())
}
