use egui::Color32;
use image::{Rgb, RgbImage};

use crate::components::colors::rgb_from_color32;

/// Brush widths offered in the toolbar preset dropdown.
pub const BRUSH_WIDTH_PRESETS: &[u32] = &[1, 2, 5, 10];

/// Width slider range.
pub const BRUSH_WIDTH_MIN: u32 = 1;
pub const BRUSH_WIDTH_MAX: u32 = 10;

// ============================================================================
// BRUSH STATE
// ============================================================================

/// Current drawing color and line width.
///
/// This is the single source both render surfaces read from. Every control
/// that changes the brush — color dialog, eyedropper, eraser button, width
/// slider, width presets — mutates this one value on the document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushState {
    pub color: Color32,
    pub width: u32,
}

impl Default for BrushState {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            width: BRUSH_WIDTH_MIN,
        }
    }
}

// ============================================================================
// STROKE TRACKER
// ============================================================================

/// A straight line between two consecutive pointer positions, as committed
/// to the on-screen display list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeSegment {
    pub start: (u32, u32),
    pub end: (u32, u32),
    pub color: Color32,
    pub width: u32,
}

/// Freehand stroke state machine.
///
/// `last_pos` is `None` while idle. The first move event of a drag records
/// a position without emitting anything (there is nothing to connect yet);
/// every later move emits the segment from the previous position to the
/// current one. Releasing the button clears the position so the next drag
/// starts a fresh stroke.
#[derive(Clone, Copy, Debug, Default)]
pub struct StrokeTracker {
    last_pos: Option<(u32, u32)>,
}

impl StrokeTracker {
    /// Feed one pointer-move event with the primary button held. Returns
    /// the endpoints of the segment to draw, or `None` on the first event
    /// of a drag and on events that did not change the pixel position.
    pub fn advance(&mut self, pos: (u32, u32)) -> Option<((u32, u32), (u32, u32))> {
        match self.last_pos {
            Some(prev) if prev == pos => None,
            Some(prev) => {
                self.last_pos = Some(pos);
                Some((prev, pos))
            }
            None => {
                self.last_pos = Some(pos);
                None
            }
        }
    }

    /// Pointer released: forget the previous point.
    pub fn release(&mut self) {
        self.last_pos = None;
    }

    pub fn is_drawing(&self) -> bool {
        self.last_pos.is_some()
    }
}

// ============================================================================
// SEGMENT RASTERIZER (export-bitmap side)
// ============================================================================

/// Rasterize a segment into the export bitmap: filled discs of radius
/// `width / 2` stamped at unit steps from `start` to `end`. Disc stamping
/// gives round caps and round joins between consecutive segments of a
/// drag. All pixel writes are clipped to the bitmap bounds.
pub fn rasterize_segment(
    bitmap: &mut RgbImage,
    start: (u32, u32),
    end: (u32, u32),
    color: Color32,
    width: u32,
) {
    let rgb = rgb_from_color32(color);
    let (x0, y0) = (start.0 as f32, start.1 as f32);
    let (x1, y1) = (end.0 as f32, end.1 as f32);

    let dx = x1 - x0;
    let dy = y1 - y0;
    let distance = (dx * dx + dy * dy).sqrt();
    let steps = distance.ceil() as u32;

    let radius = width as f32 / 2.0;
    for i in 0..=steps {
        let t = if steps == 0 {
            0.0
        } else {
            i as f32 / steps as f32
        };
        stamp_disc(bitmap, x0 + dx * t, y0 + dy * t, rgb, radius);
    }
}

/// Fill a disc centered at (`cx`, `cy`). Radii at or below half a pixel
/// paint the single pixel under the center so a width-1 brush still leaves
/// a mark.
fn stamp_disc(bitmap: &mut RgbImage, cx: f32, cy: f32, color: Rgb<u8>, radius: f32) {
    let (w, h) = bitmap.dimensions();

    if radius <= 0.5 {
        let x = cx.round() as i64;
        let y = cy.round() as i64;
        if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
            bitmap.put_pixel(x as u32, y as u32, color);
        }
        return;
    }

    let min_x = ((cx - radius).floor() as i64).max(0);
    let max_x = ((cx + radius).ceil() as i64).min(w as i64 - 1);
    let min_y = ((cy - radius).floor() as i64).max(0);
    let max_y = ((cy + radius).ceil() as i64).min(h as i64 - 1);
    let r2 = radius * radius;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let ddx = x as f32 - cx;
            let ddy = y as f32 - cy;
            if ddx * ddx + ddy * ddy <= r2 {
                bitmap.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const RED: Color32 = Color32::from_rgb(255, 0, 0);

    fn white_bitmap(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, WHITE)
    }

    #[test]
    fn first_move_records_without_emitting() {
        let mut tracker = StrokeTracker::default();
        assert_eq!(tracker.advance((10, 10)), None);
        assert!(tracker.is_drawing());
    }

    #[test]
    fn later_moves_emit_connecting_segments() {
        let mut tracker = StrokeTracker::default();
        tracker.advance((10, 10));
        assert_eq!(tracker.advance((12, 14)), Some(((10, 10), (12, 14))));
        assert_eq!(tracker.advance((15, 14)), Some(((12, 14), (15, 14))));
    }

    #[test]
    fn stationary_move_emits_nothing() {
        let mut tracker = StrokeTracker::default();
        tracker.advance((10, 10));
        assert_eq!(tracker.advance((10, 10)), None);
        // The held position is unchanged, so the next real move connects
        // back to it.
        assert_eq!(tracker.advance((11, 10)), Some(((10, 10), (11, 10))));
    }

    #[test]
    fn release_starts_a_fresh_stroke() {
        let mut tracker = StrokeTracker::default();
        tracker.advance((10, 10));
        tracker.advance((20, 20));
        tracker.release();
        assert!(!tracker.is_drawing());
        // No segment connects the old stroke to the new one.
        assert_eq!(tracker.advance((100, 100)), None);
    }

    #[test]
    fn segment_count_is_distinct_moves_minus_one() {
        let moves = [(5, 5), (6, 5), (7, 6), (9, 9), (9, 12)];
        let mut tracker = StrokeTracker::default();
        let emitted = moves.iter().filter(|p| tracker.advance(**p).is_some()).count();
        assert_eq!(emitted, moves.len() - 1);
    }

    #[test]
    fn width_one_marks_pixels_along_the_path() {
        let mut bitmap = white_bitmap(30, 30);
        rasterize_segment(&mut bitmap, (5, 10), (15, 10), RED, 1);
        for x in 5..=15 {
            assert_eq!(*bitmap.get_pixel(x, 10), Rgb([255, 0, 0]), "x={}", x);
        }
        assert_eq!(*bitmap.get_pixel(4, 10), WHITE);
        assert_eq!(*bitmap.get_pixel(16, 10), WHITE);
        assert_eq!(*bitmap.get_pixel(10, 9), WHITE);
    }

    #[test]
    fn wide_segment_covers_the_brush_radius() {
        let mut bitmap = white_bitmap(60, 60);
        rasterize_segment(&mut bitmap, (20, 20), (40, 20), RED, 5);
        // Radius 2.5: rows 18..=22 are inside the disc at every stamp center.
        for y in 18..=22 {
            assert_eq!(*bitmap.get_pixel(30, y), Rgb([255, 0, 0]), "y={}", y);
        }
        assert_eq!(*bitmap.get_pixel(30, 15), WHITE);
        assert_eq!(*bitmap.get_pixel(30, 25), WHITE);
    }

    #[test]
    fn rasterization_clips_at_the_bitmap_edge() {
        let mut bitmap = white_bitmap(20, 20);
        // Endpoint on the border with a wide brush: must not panic, and the
        // in-bounds part of the cap is painted.
        rasterize_segment(&mut bitmap, (0, 0), (19, 0), RED, 10);
        assert_eq!(*bitmap.get_pixel(0, 0), Rgb([255, 0, 0]));
        assert_eq!(*bitmap.get_pixel(19, 4), Rgb([255, 0, 0]));
    }

    #[test]
    fn zero_length_segment_stamps_a_single_cap() {
        let mut bitmap = white_bitmap(20, 20);
        rasterize_segment(&mut bitmap, (10, 10), (10, 10), RED, 5);
        assert_eq!(*bitmap.get_pixel(10, 10), Rgb([255, 0, 0]));
        assert_eq!(*bitmap.get_pixel(10, 12), Rgb([255, 0, 0]));
        assert_eq!(*bitmap.get_pixel(10, 14), WHITE);
    }
}
