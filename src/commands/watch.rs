use log::{error, info, warn};

use crate::{
    build::{Builder, ChangePoller},
    config::Settings,
};

pub async fn run(settings: &Settings) -> Result<(), anyhow::Error> {
    // Build the site first; a broken setup should fail before we start polling
    info!("Building site...");
    super::build::run(settings)?;

    let mut poller = ChangePoller::from_settings(settings);
    poller.prime();

    let builder = Builder::new(settings.clone());
    poller
        .run(move || {
            info!("Rebuilding...");
            match builder.build() {
                Ok(report) => {
                    info!(
                        "Rebuilt {} pages, {} assets",
                        report.pages, report.assets
                    );
                    if !report.failures.is_empty() {
                        warn!("{} file(s) were skipped", report.failures.len());
                    }
                }
                // Keep watching; the next change may fix it
                Err(e) => error!("Rebuild failed: {e}"),
            }
        })
        .await;

    Ok(())
}
