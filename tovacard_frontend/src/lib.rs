pub mod app;

use eframe::{self, egui};
use tovacard_core::{CardError, CardServices};

pub use app::{StartupErrorApp, TovacardApp};

pub const APP_TITLE: &str = "Shana Tova Card Maker";

/// `env_logger` filter used when `RUST_LOG` is unset, so reported failures
/// reach the log.
const LOG_FILTER: &str = "tovacard_frontend=info";

/// Launches the egui application with default window options.
pub fn run_frontend(services: Result<CardServices, CardError>) -> Result<(), eframe::Error> {
    run_frontend_with_options(services, default_native_options())
}

/// Launches the app with caller-provided options. When startup failed, the
/// window shows only the error.
pub fn run_frontend_with_options(
    services: Result<CardServices, CardError>,
    options: eframe::NativeOptions,
) -> Result<(), eframe::Error> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(LOG_FILTER)).try_init();

    let boot = services.and_then(|services| {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|err| CardError::InitializationFailed(format!("failed to start async runtime: {err}")))?;
        Ok((services, runtime))
    });

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| {
            let app: Box<dyn eframe::App> = match boot {
                Ok((services, runtime)) => Box::new(TovacardApp::new(cc, services, runtime)),
                Err(err) => {
                    log::error!("startup failed: {err}");
                    Box::new(StartupErrorApp::new(err))
                }
            };
            Ok(app)
        }),
    )
}

fn default_native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([820.0, 760.0])
            .with_min_inner_size([520.0, 480.0])
            .with_drag_and_drop(true)
            .with_title(APP_TITLE),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Metadata};

    fn enabled(logger: &env_logger::Logger, level: Level, target: &str) -> bool {
        logger.enabled(&Metadata::builder().level(level).target(target).build())
    }

    #[test]
    fn default_log_filter_keeps_reported_failures() {
        let logger = env_logger::Builder::new().parse_filters(LOG_FILTER).build();
        assert!(enabled(&logger, Level::Warn, "tovacard_frontend::app::messages"));
        assert!(enabled(&logger, Level::Info, "tovacard_frontend::app"));
        assert!(!enabled(&logger, Level::Debug, "tovacard_frontend::app"));
    }
}
