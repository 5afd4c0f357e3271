use eframe::egui;
use egui::{Color32, PointerButton, Pos2, Rect, Sense, Stroke, Vec2};
use image::{Rgb, RgbImage};

use crate::components::colors::{color32_from_rgb, hex_string};
use crate::components::tools::{BrushState, StrokeSegment, StrokeTracker, rasterize_segment};
use crate::log_info;

/// Canvas background; also the color the eraser paints with.
pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

// ============================================================================
// CANVAS STATE — the two drawing surfaces
// ============================================================================

/// One drawing surface pair: the authoritative export bitmap plus the
/// retained display list the screen is repainted from.
///
/// `draw_segment` is the only write path for strokes, so the two surfaces
/// can never disagree about a segment's geometry, color, or width.
pub struct CanvasState {
    pub width: u32,
    pub height: u32,
    background: Rgb<u8>,
    bitmap: RgbImage,
    segments: Vec<StrokeSegment>,
}

impl CanvasState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: BACKGROUND,
            bitmap: RgbImage::from_pixel(width, height, BACKGROUND),
            segments: Vec::new(),
        }
    }

    /// Commit one stroke segment to both surfaces with the given brush.
    pub fn draw_segment(&mut self, start: (u32, u32), end: (u32, u32), brush: &BrushState) {
        self.segments.push(StrokeSegment {
            start,
            end,
            color: brush.color,
            width: brush.width,
        });
        rasterize_segment(&mut self.bitmap, start, end, brush.color, brush.width);
    }

    /// Wipe the visible canvas and reallocate a blank bitmap of the same
    /// dimensions. Not undoable.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.bitmap = RgbImage::from_pixel(self.width, self.height, self.background);
    }

    /// Bitmap pixel at (`x`, `y`), if inside the canvas. This samples the
    /// export buffer, not the screen surface.
    pub fn sample_pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        (x < self.width && y < self.height).then(|| *self.bitmap.get_pixel(x, y))
    }

    /// The export buffer, as handed to the PNG encoder.
    pub fn bitmap(&self) -> &RgbImage {
        &self.bitmap
    }

    /// Committed segments of the on-screen surface, in draw order.
    pub fn segments(&self) -> &[StrokeSegment] {
        &self.segments
    }

    pub fn background(&self) -> Rgb<u8> {
        self.background
    }

    pub fn background_color32(&self) -> Color32 {
        color32_from_rgb(self.background)
    }
}

// ============================================================================
// CANVAS WIDGET — screen surface + pointer input
// ============================================================================

/// Screen-side canvas widget. Paints the display list every frame and turns
/// pointer input into stroke-tracker events on the active document's state.
#[derive(Default)]
pub struct Canvas;

impl Canvas {
    /// Returns true when at least one segment was committed this frame, so
    /// the caller can mark the document dirty.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut CanvasState,
        brush: &mut BrushState,
        tracker: &mut StrokeTracker,
    ) -> bool {
        let desired = Vec2::new(state.width as f32, state.height as f32);
        let (response, painter) = ui.allocate_painter(desired, Sense::click_and_drag());
        let canvas_rect = response.rect;

        // Paper background, then the committed segments on top.
        painter.rect_filled(canvas_rect, 0.0, state.background_color32());
        for seg in state.segments() {
            let a = canvas_rect.min + Vec2::new(seg.start.0 as f32, seg.start.1 as f32);
            let b = canvas_rect.min + Vec2::new(seg.end.0 as f32, seg.end.1 as f32);
            painter.line_segment([a, b], Stroke::new(seg.width as f32, seg.color));
            // The painter's segments are butt-capped; filled circles at the
            // endpoints give the round caps the bitmap side also draws.
            let cap_radius = seg.width as f32 / 2.0;
            painter.circle_filled(a, cap_radius, seg.color);
            painter.circle_filled(b, cap_radius, seg.color);
        }

        let mut painted = false;

        if response.dragged_by(PointerButton::Primary) {
            if let Some(pointer) = response.interact_pointer_pos() {
                let pos = screen_to_canvas(pointer, canvas_rect, state);
                if let Some((from, to)) = tracker.advance(pos) {
                    state.draw_segment(from, to, brush);
                    painted = true;
                }
            }
        } else if tracker.is_drawing() && !ui.input(|i| i.pointer.primary_down()) {
            tracker.release();
        }

        // Right-click eyedropper: adopt the bitmap pixel under the cursor.
        if response.secondary_clicked()
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let (x, y) = screen_to_canvas(pointer, canvas_rect, state);
            if let Some(rgb) = state.sample_pixel(x, y) {
                brush.color = color32_from_rgb(rgb);
                log_info!("Eyedropper picked {} at ({}, {})", hex_string(brush.color), x, y);
            }
        }

        painted
    }
}

/// Convert a screen position to integer canvas-pixel coordinates, clamped
/// to the canvas bounds so strokes dragged past an edge terminate on it.
fn screen_to_canvas(pointer: Pos2, canvas_rect: Rect, state: &CanvasState) -> (u32, u32) {
    let rel_x = (pointer.x - canvas_rect.min.x).clamp(0.0, state.width as f32 - 1.0);
    let rel_y = (pointer.y - canvas_rect.min.y).clamp(0.0, state.height as f32 - 1.0);
    (rel_x as u32, rel_y as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color32 = Color32::from_rgb(255, 0, 0);

    fn red_brush(width: u32) -> BrushState {
        BrushState { color: RED, width }
    }

    #[test]
    fn new_canvas_is_blank_background() {
        let state = CanvasState::new(600, 400);
        assert_eq!(state.bitmap().dimensions(), (600, 400));
        assert!(state.bitmap().pixels().all(|p| *p == BACKGROUND));
        assert!(state.segments().is_empty());
    }

    #[test]
    fn draw_segment_updates_both_surfaces() {
        let mut state = CanvasState::new(100, 100);
        let brush = red_brush(3);
        state.draw_segment((10, 10), (30, 10), &brush);

        // Screen side: one committed segment carrying the brush values.
        assert_eq!(state.segments().len(), 1);
        let seg = state.segments()[0];
        assert_eq!((seg.color, seg.width), (brush.color, brush.width));

        // Bitmap side: the same geometry is painted.
        assert_eq!(state.sample_pixel(20, 10), Some(Rgb([255, 0, 0])));
        assert_eq!(state.sample_pixel(20, 40), Some(BACKGROUND));
    }

    #[test]
    fn clear_resets_bitmap_and_display_list() {
        let mut state = CanvasState::new(80, 60);
        state.draw_segment((5, 5), (50, 40), &red_brush(10));
        state.clear();

        assert!(state.segments().is_empty());
        assert_eq!(state.bitmap().dimensions(), (80, 60));
        assert!(state.bitmap().pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn sample_pixel_is_bounds_checked() {
        let state = CanvasState::new(10, 10);
        assert_eq!(state.sample_pixel(9, 9), Some(BACKGROUND));
        assert_eq!(state.sample_pixel(10, 9), None);
        assert_eq!(state.sample_pixel(9, 10), None);
    }

    #[test]
    fn eyedropper_color_paints_subsequent_strokes() {
        let mut state = CanvasState::new(100, 100);
        let teal = Color32::from_rgb(0, 128, 128);
        state.draw_segment((10, 10), (20, 10), &BrushState { color: teal, width: 4 });

        // Sample a painted pixel, adopt it as the brush color, draw again.
        let picked = color32_from_rgb(state.sample_pixel(15, 10).unwrap());
        assert_eq!(picked, teal);
        state.draw_segment((50, 50), (60, 50), &BrushState { color: picked, width: 4 });
        assert_eq!(state.sample_pixel(55, 50), Some(Rgb([0, 128, 128])));
    }

    #[test]
    fn red_vertical_line_scenario() {
        // Drag from (10,10) to (10,50), #FF0000, width 5, on 600×400 white.
        let mut state = CanvasState::new(600, 400);
        state.draw_segment((10, 10), (10, 50), &red_brush(5));

        // A ~5-pixel-wide red vertical line between those points...
        for y in 10..=50 {
            for x in 8..=12 {
                assert_eq!(state.sample_pixel(x, y), Some(Rgb([255, 0, 0])), "({}, {})", x, y);
            }
        }
        // ...and white elsewhere.
        assert_eq!(state.sample_pixel(20, 30), Some(BACKGROUND));
        assert_eq!(state.sample_pixel(10, 5), Some(BACKGROUND));
        assert_eq!(state.sample_pixel(10, 56), Some(BACKGROUND));
        assert_eq!(state.sample_pixel(300, 200), Some(BACKGROUND));
    }
}
