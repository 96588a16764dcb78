#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::Path;

use anyhow::Context;
use eframe::egui;

use box_labeler::app::LabelApp;
use box_labeler::config::{self, SessionConfig};
use box_labeler::logging::setup_logger;
use box_labeler::session::Session;

fn main() -> anyhow::Result<()> {
    setup_logger();

    // Ctrl+C exits at once; the current image is not saved
    ctrlc::set_handler(|| {
        log::warn!("interrupted, unsaved boxes on the current image are discarded");
        std::process::exit(0);
    })
    .context("Error setting Ctrl-C handler")?;

    let config = SessionConfig::default();
    let session = Session::open(config.clone())
        .with_context(|| format!("put images into {} first", config.image_dir.display()))?;

    if let Err(e) = config::ensure_data_config(Path::new(config::DATA_CONFIG), &config.class_name) {
        log::warn!("could not write {}: {}", config::DATA_CONFIG, e);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_title(&config.window_title),
        ..Default::default()
    };

    eframe::run_native(
        &config.window_title,
        options,
        Box::new(|_cc| Ok(Box::new(LabelApp::new(session)))),
    )
    .map_err(|e| anyhow::anyhow!("Error running native application: {e}"))?;

    log::info!("labeling finished");
    Ok(())
}
