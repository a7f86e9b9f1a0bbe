use log::{error, info, warn};

use crate::{build::Builder, config::Settings};

pub fn run(settings: &Settings) -> Result<(), anyhow::Error> {
    let builder = Builder::new(settings.clone());
    let report = builder.build().inspect_err(|e| error!("Build failed: {e}"))?;

    info!(
        "Built site to {} ({} pages, {} assets)",
        report.output_dir.display(),
        report.pages,
        report.assets
    );
    if !report.failures.is_empty() {
        warn!("{} file(s) were skipped", report.failures.len());
    }

    Ok(())
}
