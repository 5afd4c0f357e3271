use eframe::egui;
use egui::{Align2, Color32, Key, Modifiers};

/// Accepted canvas dimensions, per side.
const CANVAS_SIDE_MIN: u32 = 1;
const CANVAS_SIDE_MAX: u32 = 8192;

// ============================================================================
// CHOOSE COLOR DIALOG
// ============================================================================

/// Modal color chooser. OK (or Enter) adopts the selection; Cancel (or
/// Escape) leaves the brush untouched.
pub struct ChooseColorDialog {
    pub open: bool,
    color: Color32,
}

impl Default for ChooseColorDialog {
    fn default() -> Self {
        Self {
            open: false,
            color: Color32::BLACK,
        }
    }
}

impl ChooseColorDialog {
    /// Open the dialog seeded with the current brush color.
    pub fn open_with(&mut self, current: Color32) {
        self.color = current;
        self.open = true;
    }

    /// Show the dialog and return `Some(color)` when the user confirms.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<Color32> {
        if !self.open {
            return None;
        }

        let mut result = None;
        let mut should_close = false;

        // Keyboard: Enter = OK, Esc = Cancel
        let enter = ctx.input_mut(|i| i.consume_key(Modifiers::NONE, Key::Enter));
        let esc = ctx.input_mut(|i| i.consume_key(Modifiers::NONE, Key::Escape));
        if enter {
            result = Some(self.color);
            should_close = true;
        }
        if esc {
            should_close = true;
        }

        egui::Window::new("Choose Color")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::color_picker::color_picker_color32(
                    ui,
                    &mut self.color,
                    egui::color_picker::Alpha::Opaque,
                );
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        result = Some(self.color);
                        should_close = true;
                    }
                    if ui.button("Cancel").clicked() {
                        should_close = true;
                    }
                });
            });

        if should_close {
            self.open = false;
        }
        result
    }
}

// ============================================================================
// CANVAS SIZE DIALOG
// ============================================================================

/// Prompts for the dimensions of a new document. Malformed input is
/// rejected with an inline message and the dialog stays open; Cancel and
/// Escape are no-ops.
pub struct CanvasSizeDialog {
    pub open: bool,
    width_input: String,
    height_input: String,
    error: Option<String>,
}

impl Default for CanvasSizeDialog {
    fn default() -> Self {
        Self {
            open: false,
            width_input: "600".to_string(),
            height_input: "400".to_string(),
            error: None,
        }
    }
}

impl CanvasSizeDialog {
    /// Open the dialog seeded with the active document's dimensions.
    pub fn open_with(&mut self, width: u32, height: u32) {
        self.width_input = width.to_string();
        self.height_input = height.to_string();
        self.error = None;
        self.open = true;
    }

    /// Show the dialog and return `Some((width, height))` when the user
    /// confirms valid dimensions.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<(u32, u32)> {
        if !self.open {
            return None;
        }

        let mut result = None;
        let mut should_close = false;
        let mut confirm = false;

        let enter = ctx.input_mut(|i| i.consume_key(Modifiers::NONE, Key::Enter));
        let esc = ctx.input_mut(|i| i.consume_key(Modifiers::NONE, Key::Escape));
        if enter {
            confirm = true;
        }
        if esc {
            should_close = true;
        }

        egui::Window::new("Canvas Size")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Creates a new document; the current one stays open.");
                ui.add_space(6.0);

                egui::Grid::new("canvas_size_grid")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Width:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.width_input).desired_width(80.0),
                        );
                        ui.end_row();

                        ui.label("Height:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.height_input).desired_width(80.0),
                        );
                        ui.end_row();
                    });

                if let Some(msg) = &self.error {
                    ui.add_space(4.0);
                    ui.colored_label(ui.visuals().error_fg_color, msg);
                }

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("Create").clicked() {
                        confirm = true;
                    }
                    if ui.button("Cancel").clicked() {
                        should_close = true;
                    }
                });
            });

        if confirm {
            match self.parse_dimensions() {
                Ok(dims) => {
                    result = Some(dims);
                    should_close = true;
                }
                Err(msg) => self.error = Some(msg),
            }
        }

        if should_close {
            self.open = false;
        }
        result
    }

    fn parse_dimensions(&self) -> Result<(u32, u32), String> {
        let width = parse_side("Width", &self.width_input)?;
        let height = parse_side("Height", &self.height_input)?;
        Ok((width, height))
    }
}

fn parse_side(label: &str, input: &str) -> Result<u32, String> {
    let trimmed = input.trim();
    let value: u32 = trimmed
        .parse()
        .map_err(|_| format!("{} must be a whole number, got \"{}\"", label, trimmed))?;
    if !(CANVAS_SIDE_MIN..=CANVAS_SIDE_MAX).contains(&value) {
        return Err(format!(
            "{} must be between {} and {} pixels",
            label, CANVAS_SIDE_MIN, CANVAS_SIDE_MAX
        ));
    }
    Ok(value)
}

// ============================================================================
// MESSAGE DIALOG
// ============================================================================

#[derive(Clone, Copy, PartialEq)]
enum MessageKind {
    Info,
    Error,
}

/// One-button message box for save confirmations and recoverable errors.
pub struct MessageDialog {
    open: bool,
    kind: MessageKind,
    title: String,
    text: String,
}

impl Default for MessageDialog {
    fn default() -> Self {
        Self {
            open: false,
            kind: MessageKind::Info,
            title: String::new(),
            text: String::new(),
        }
    }
}

impl MessageDialog {
    pub fn info(&mut self, title: &str, text: &str) {
        self.kind = MessageKind::Info;
        self.title = title.to_string();
        self.text = text.to_string();
        self.open = true;
    }

    pub fn error(&mut self, title: &str, text: &str) {
        self.kind = MessageKind::Error;
        self.title = title.to_string();
        self.text = text.to_string();
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }

        let mut should_close = ctx.input_mut(|i| {
            i.consume_key(Modifiers::NONE, Key::Enter) || i.consume_key(Modifiers::NONE, Key::Escape)
        });

        egui::Window::new(self.title.clone())
            .id(egui::Id::new("message_dialog"))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(260.0);
                match self.kind {
                    MessageKind::Info => {
                        ui.label(&self.text);
                    }
                    MessageKind::Error => {
                        ui.colored_label(ui.visuals().error_fg_color, &self.text);
                    }
                }
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    should_close = true;
                }
            });

        if should_close {
            self.open = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_parsing_accepts_plain_integers() {
        assert_eq!(parse_side("Width", "600"), Ok(600));
        assert_eq!(parse_side("Height", " 400 "), Ok(400));
    }

    #[test]
    fn dimension_parsing_rejects_junk_with_a_message() {
        assert!(parse_side("Width", "abc").unwrap_err().contains("whole number"));
        assert!(parse_side("Width", "12.5").unwrap_err().contains("whole number"));
        assert!(parse_side("Height", "").unwrap_err().contains("whole number"));
        assert!(parse_side("Width", "-3").unwrap_err().contains("whole number"));
    }

    #[test]
    fn dimension_parsing_rejects_out_of_range_values() {
        assert!(parse_side("Width", "0").unwrap_err().contains("between"));
        assert!(parse_side("Height", "100000").unwrap_err().contains("between"));
    }
}
