use image::codecs::png::PngEncoder;
use image::{ImageError, RgbImage};
use rfd::FileDialog;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Append `.png` when the chosen path does not already end with it.
/// Matching is case-insensitive, so `IMAGE.PNG` passes through untouched;
/// any other extension is kept and `.png` appended after it.
pub fn normalize_png_path(path: PathBuf) -> PathBuf {
    let has_png = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false);
    if has_png {
        path
    } else {
        let mut name = path.into_os_string();
        name.push(".png");
        PathBuf::from(name)
    }
}

/// Encode the export bitmap as an RGB PNG at `path`.
pub fn save_png(image: &RgbImage, path: &Path) -> Result<(), ImageError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let encoder = PngEncoder::new(&mut writer);
    #[allow(deprecated)]
    encoder.encode(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ColorType::Rgb8,
    )?;
    Ok(())
}

// ============================================================================
// FILE HANDLER
// ============================================================================

/// Owns the native save dialog and the directory it reopens in.
pub struct FileHandler {
    last_directory: Option<PathBuf>,
}

impl Default for FileHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FileHandler {
    pub fn new() -> Self {
        Self {
            last_directory: None,
        }
    }

    /// Show the native save dialog with a PNG filter. Returns the chosen
    /// path, normalized to end in `.png`, or `None` when the user cancels.
    pub fn pick_save_path(&mut self, suggested_name: &str) -> Option<PathBuf> {
        let mut dialog = FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(&format!("{}.png", suggested_name));
        if let Some(dir) = &self.last_directory {
            dialog = dialog.set_directory(dir);
        }
        let path = normalize_png_path(dialog.save_file()?);
        self.last_directory = path.parent().map(Path::to_path_buf);
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn temp_png(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sketchpad_{}_{}.png", name, std::process::id()))
    }

    #[test]
    fn missing_extension_gains_png() {
        assert_eq!(
            normalize_png_path(PathBuf::from("/tmp/drawing")),
            PathBuf::from("/tmp/drawing.png")
        );
    }

    #[test]
    fn existing_png_extension_is_kept() {
        assert_eq!(
            normalize_png_path(PathBuf::from("/tmp/drawing.png")),
            PathBuf::from("/tmp/drawing.png")
        );
        // Case-insensitive: no double extension on .PNG either.
        assert_eq!(
            normalize_png_path(PathBuf::from("/tmp/drawing.PNG")),
            PathBuf::from("/tmp/drawing.PNG")
        );
    }

    #[test]
    fn foreign_extension_gets_png_appended() {
        assert_eq!(
            normalize_png_path(PathBuf::from("/tmp/drawing.jpg")),
            PathBuf::from("/tmp/drawing.jpg.png")
        );
    }

    #[test]
    fn saved_png_round_trips_a_drawn_segment() {
        use crate::canvas::CanvasState;
        use crate::components::tools::BrushState;
        use egui::Color32;

        let mut state = CanvasState::new(40, 30);
        let brush = BrushState {
            color: Color32::from_rgb(255, 0, 0),
            width: 1,
        };
        state.draw_segment((12, 5), (12, 20), &brush);

        let path = temp_png("roundtrip");
        save_png(state.bitmap(), &path).expect("save should succeed");

        let reloaded = image::open(&path).expect("reload should succeed").to_rgb8();
        assert_eq!(reloaded.dimensions(), (40, 30));
        for y in 5..=20 {
            assert_eq!(*reloaded.get_pixel(12, y), Rgb([255, 0, 0]), "y={}", y);
        }
        assert_eq!(*reloaded.get_pixel(0, 0), Rgb([255, 255, 255]));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn save_into_missing_directory_reports_an_error() {
        let bitmap = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
        let path = std::env::temp_dir()
            .join("sketchpad_no_such_dir")
            .join("out.png");
        assert!(save_png(&bitmap, &path).is_err());
    }
}
