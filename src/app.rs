use eframe::egui;
use egui::{Key, Modifiers};

use crate::canvas::Canvas;
use crate::components::colors::{color_swatch, hex_string};
use crate::components::dialogs::{CanvasSizeDialog, ChooseColorDialog, MessageDialog};
use crate::components::tools::{BRUSH_WIDTH_MAX, BRUSH_WIDTH_MIN, BRUSH_WIDTH_PRESETS};
use crate::io::{self, FileHandler};
use crate::project::Document;
use crate::{log_err, log_info};

/// Canvas dimensions of the first document.
const DEFAULT_CANVAS_SIZE: (u32, u32) = (600, 400);

/// Toolbar and shortcut commands. Buttons and key bindings feed the same
/// handler so there is exactly one code path per action.
#[derive(Clone, Copy, PartialEq)]
enum Command {
    Clear,
    ChooseColor,
    Eraser,
    Save,
    CanvasSize,
}

pub struct SketchpadApp {
    // Multi-document state: the canvas-size dialog spawns new documents.
    documents: Vec<Document>,
    active_document: usize,
    untitled_counter: usize,

    // Shared canvas widget and save-dialog state.
    canvas: Canvas,
    file_handler: FileHandler,

    // Modal dialogs (at most one open at a time).
    choose_color_dialog: ChooseColorDialog,
    canvas_size_dialog: CanvasSizeDialog,
    message_dialog: MessageDialog,

    /// Last window title pushed to the viewport, to avoid re-sending it
    /// every frame.
    last_title: String,
}

impl SketchpadApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let (width, height) = DEFAULT_CANVAS_SIZE;
        log_info!("New document Untitled-1 ({}×{})", width, height);
        Self {
            documents: vec![Document::new_untitled(1, width, height)],
            active_document: 0,
            untitled_counter: 1,
            canvas: Canvas,
            file_handler: FileHandler::new(),
            choose_color_dialog: ChooseColorDialog::default(),
            canvas_size_dialog: CanvasSizeDialog::default(),
            message_dialog: MessageDialog::default(),
            last_title: String::new(),
        }
    }

    fn active_doc(&self) -> &Document {
        &self.documents[self.active_document]
    }

    fn active_doc_mut(&mut self) -> &mut Document {
        &mut self.documents[self.active_document]
    }

    fn dialog_open(&self) -> bool {
        self.choose_color_dialog.open || self.canvas_size_dialog.open || self.message_dialog.is_open()
    }

    // -- Commands ----------------------------------------------------------

    fn run_command(&mut self, command: Command) {
        match command {
            Command::Clear => {
                let doc = self.active_doc_mut();
                doc.canvas.clear();
                // An in-flight drag must not connect across the wipe.
                doc.tracker.release();
                doc.mark_dirty();
                log_info!("Canvas cleared ({}×{})", doc.canvas.width, doc.canvas.height);
            }
            Command::ChooseColor => {
                let current = self.active_doc().brush.color;
                self.choose_color_dialog.open_with(current);
            }
            Command::Eraser => {
                let doc = self.active_doc_mut();
                doc.brush.color = doc.canvas.background_color32();
                log_info!("Eraser selected (brush color set to background)");
            }
            Command::Save => self.save_active_document(),
            Command::CanvasSize => {
                let canvas = &self.active_doc().canvas;
                self.canvas_size_dialog.open_with(canvas.width, canvas.height);
            }
        }
    }

    /// Ask for a destination, encode the bitmap, and report the outcome.
    /// A cancelled dialog is a no-op; failures surface as an error box and
    /// leave the window usable.
    fn save_active_document(&mut self) {
        let suggested = self.active_doc().name.clone();
        let Some(path) = self.file_handler.pick_save_path(&suggested) else {
            return;
        };

        let doc = self.active_doc_mut();
        match io::save_png(doc.canvas.bitmap(), &path) {
            Ok(()) => {
                doc.path = Some(path.clone());
                doc.mark_clean();
                log_info!("Saved {} to {}", doc.name, path.display());
                self.message_dialog.info(
                    "Image Saved",
                    &format!("Image successfully saved to {}", path.display()),
                );
            }
            Err(err) => {
                log_err!("Failed to save {}: {}", path.display(), err);
                self.message_dialog.error(
                    "Save Failed",
                    &format!("Could not save {}: {}", path.display(), err),
                );
            }
        }
    }

    /// Spawn a new independent document and switch to it. The previous
    /// document stays open with its own canvas, brush, and bitmap.
    fn spawn_document(&mut self, width: u32, height: u32) {
        self.untitled_counter += 1;
        let doc = Document::new_untitled(self.untitled_counter, width, height);
        log_info!("New document {} ({}×{})", doc.name, width, height);
        self.documents.push(doc);
        self.active_document = self.documents.len() - 1;
    }

    // -- Panels ------------------------------------------------------------

    fn toolbar(&mut self, ui: &mut egui::Ui) -> Option<Command> {
        let mut command = None;

        ui.horizontal(|ui| {
            if ui.button("Clear").clicked() {
                command = Some(Command::Clear);
            }
            if ui.button("Choose Color…").clicked() {
                command = Some(Command::ChooseColor);
            }
            if ui.button("Eraser").clicked() {
                command = Some(Command::Eraser);
            }
            if ui.button("Save…").clicked() {
                command = Some(Command::Save);
            }
            if ui.button("Canvas Size…").clicked() {
                command = Some(Command::CanvasSize);
            }

            ui.separator();

            let doc = &mut self.documents[self.active_document];
            ui.label("Brush:");
            ui.add(egui::Slider::new(
                &mut doc.brush.width,
                BRUSH_WIDTH_MIN..=BRUSH_WIDTH_MAX,
            ));
            egui::ComboBox::from_id_source("brush_width_presets")
                .width(64.0)
                .selected_text(format!("{} px", doc.brush.width))
                .show_ui(ui, |ui| {
                    for preset in BRUSH_WIDTH_PRESETS {
                        ui.selectable_value(&mut doc.brush.width, *preset, format!("{} px", preset));
                    }
                });

            ui.separator();
            color_swatch(ui, doc.brush.color);
        });

        command
    }

    fn tab_strip(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for (index, doc) in self.documents.iter().enumerate() {
                let selected = index == self.active_document;
                if ui.selectable_label(selected, doc.display_title()).clicked() {
                    self.active_document = index;
                }
            }
        });
    }

    fn sync_window_title(&mut self, ctx: &egui::Context) {
        let title = format!("Sketchpad — {}", self.active_doc().display_title());
        if title != self.last_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.last_title = title;
        }
    }
}

impl eframe::App for SketchpadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut command = None;

        // Keyboard shortcuts (suppressed while a modal dialog is up, so
        // Enter/Escape belong to the dialog).
        if !self.dialog_open() {
            if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::S)) {
                command = Some(Command::Save);
            }
            if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::C)) {
                command = Some(Command::ChooseColor);
            }
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            if let Some(cmd) = self.toolbar(ui) {
                command = Some(cmd);
            }
        });

        if self.documents.len() > 1 {
            egui::TopBottomPanel::top("document_tabs").show(ctx, |ui| {
                self.tab_strip(ui);
            });
        }

        // Dialog results feed the same state paths as the toolbar.
        if let Some(color) = self.choose_color_dialog.show(ctx) {
            self.active_doc_mut().brush.color = color;
            log_info!("Brush color set to {}", hex_string(color));
        }
        if let Some((width, height)) = self.canvas_size_dialog.show(ctx) {
            self.spawn_document(width, height);
        }
        self.message_dialog.show(ctx);

        let pointer_blocked = self.dialog_open();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                ui.add_enabled_ui(!pointer_blocked, |ui| {
                    let doc = &mut self.documents[self.active_document];
                    let painted =
                        self.canvas.show(ui, &mut doc.canvas, &mut doc.brush, &mut doc.tracker);
                    if painted {
                        doc.mark_dirty();
                    }
                });
            });
        });

        if let Some(cmd) = command {
            self.run_command(cmd);
        }

        self.sync_window_title(ctx);
    }
}
