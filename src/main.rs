mod bootstrap;

use panelsync::prelude::{AppEvent, EventBus, PanelApi, PanelClient, SyncRunner};
use crate::bootstrap::{config, logging, scan};
use anyhow::Result;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    logging::initialize();

    let events = EventBus::new(false);
    events.emit(AppEvent::Starting);
    let started = Instant::now();

    let config_path = config::resolve_path(
        std::env::args().nth(1),
        std::env::var(config::CONFIG_ENV).ok(),
    );
    let config = config::load(&config_path, &events).await?;

    let scan_result = scan::scan_root(&config, &events).await?;

    let panel_url = config.panel_url()?;
    let client = PanelClient::new(
        panel_url.as_str(),
        &config.panel.api_key,
        Duration::from_secs(config.panel.timeout_secs),
    )?;
    let api: Arc<dyn PanelApi> = Arc::new(client);

    let runner = SyncRunner::from_config(api, Arc::clone(&events), &config);

    let report = tokio::select! {
        report = runner.run(&scan_result) => report,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, abandoning in-flight requests");
            return Ok(ExitCode::from(130));
        }
    };

    let report = match report {
        Ok(report) => report,
        Err(e) => {
            events.emit(AppEvent::Error {
                context: "Sync aborted".to_string(),
                error: e.to_string(),
            });
            return Err(e.into());
        }
    };

    events.emit(AppEvent::Finished {
        succeeded: report.total_succeeded(),
        failed: report.total_failed(),
        failures: report
            .failures()
            .map(|(server, f)| format!("{}: {} ({})", server, f.relative_path, f.cause))
            .collect(),
        duration: started.elapsed(),
    });

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
