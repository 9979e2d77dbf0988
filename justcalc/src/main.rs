//! JustCalc - a small expression calculator
//!
//! Type or click an expression, press `=` to evaluate it.

mod app;

use app::JustCalcApp;
use eframe::NativeOptions;
use justcalc::settings::{AppContext, Settings};
use justcore::storage::StorageError;

fn main() -> eframe::Result<()> {
    let path = Settings::config_path();
    let loaded = Settings::read(&path);
    let settings = loaded.as_ref().cloned().unwrap_or_default();

    justcore::logging::init(&settings.log_filter);

    match loaded {
        Ok(_) => tracing::debug!(path = %path.display(), "loaded settings"),
        Err(StorageError::NotFound(_)) => {
            if let Err(e) = settings.save_to(&path) {
                tracing::warn!(path = %path.display(), error = %e, "could not write default settings");
            }
        }
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "could not read settings, using defaults"),
    }

    let context = AppContext::new(settings);
    tracing::info!(dark_theme = context.theme.dark, "starting justcalc");

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([360.0, 300.0])
            .with_resizable(false)
            .with_title("JustCalculate"),
        ..Default::default()
    };

    eframe::run_native(
        "justcalc",
        options,
        Box::new(move |cc| {
            context.theme.apply(&cc.egui_ctx);
            Box::new(JustCalcApp::new(cc, context))
        }),
    )
}
