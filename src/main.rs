#![windows_subsystem = "windows"]
#![allow(dead_code)] // Small accessor surface (document ids/paths) kept whole

mod app;
mod canvas;
mod components;
mod io;
pub mod logger;
mod project;

use app::SketchpadApp;
use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    // Session log (overwrites the previous session's file).
    logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([660.0, 520.0])
            .with_title("Sketchpad"),
        ..Default::default()
    };

    eframe::run_native(
        "Sketchpad",
        options,
        Box::new(|cc| Box::new(SketchpadApp::new(cc))),
    )
}
