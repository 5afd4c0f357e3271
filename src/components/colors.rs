use eframe::egui;
use egui::{Color32, Sense, Stroke, Vec2};
use image::Rgb;

/// Brush color as the bitmap's pixel type.
pub fn rgb_from_color32(color: Color32) -> Rgb<u8> {
    Rgb([color.r(), color.g(), color.b()])
}

/// Bitmap pixel as a UI color (eyedropper direction).
pub fn color32_from_rgb(rgb: Rgb<u8>) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// `#RRGGBB` form, used in the session log and the swatch tooltip.
pub fn hex_string(color: Color32) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r(), color.g(), color.b())
}

/// Toolbar swatch previewing the current brush color. Hovering shows the
/// hex value.
pub fn color_swatch(ui: &mut egui::Ui, color: Color32) -> egui::Response {
    let size = Vec2::splat(ui.spacing().interact_size.y);
    let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        painter.rect_filled(rect, 3.0, color);
        painter.rect_stroke(
            rect,
            3.0,
            Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
        );
    }
    response.on_hover_text(hex_string(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_round_trip() {
        let color = Color32::from_rgb(18, 200, 7);
        assert_eq!(color32_from_rgb(rgb_from_color32(color)), color);

        let rgb = Rgb([255, 0, 127]);
        assert_eq!(rgb_from_color32(color32_from_rgb(rgb)), rgb);
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(hex_string(Color32::from_rgb(255, 0, 0)), "#FF0000");
        assert_eq!(hex_string(Color32::BLACK), "#000000");
        assert_eq!(hex_string(Color32::from_rgb(1, 2, 3)), "#010203");
    }
}
