use anyhow::{anyhow, Result};
use tovacard_core::config::TovacardConfig;
use tovacard_core::{bootstrap, telemetry, CardError};
use tracing::{error, info};

fn main() -> Result<()> {
    telemetry::init_tracing();

    let services = TovacardConfig::load()
        .map_err(|err| CardError::InitializationFailed(format!("{err:#}")))
        .and_then(|config| bootstrap::initialize(&config));

    match &services {
        Ok(services) => info!(
            caption_font = %services.caption_font.source(),
            output_dir = %services.output_dir.display(),
            "starting card maker"
        ),
        Err(err) => error!(error = %err, "startup failed"),
    }

    tovacard_frontend::run_frontend(services).map_err(|err| anyhow!(err.to_string()))
}
