use crate::form::FormState;
use crate::render::{print_template, Color, Surface, WHITE};
use image::RgbImage;

/// Fixed output name of a single export.
pub const EXPORT_FILENAME: &str = "RIB.pdf";
/// Default raster scale: the 842×595 template is captured at twice its
/// logical size for print quality.
pub const EXPORT_SCALE: f32 = 2.0;

const ERROR_PREFIX: &str = "La génération du PDF a échoué.";
const ERROR_FALLBACK: &str = "Une erreur inconnue est survenue.";

#[derive(Debug, Clone, Copy)]
pub struct RasterOptions {
    pub scale: f32,
    /// Background painted under the surface; the export forces white.
    pub background: Color,
}

/// Landscape page the raster is stretched onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
}

pub const A4_LANDSCAPE: PageGeometry = PageGeometry {
    width_mm: 297.0,
    height_mm: 210.0,
};

/// Captures a renderable surface as a raster image.
pub trait SurfaceRasterizer {
    fn rasterize(&self, surface: &Surface, options: &RasterOptions) -> Result<RgbImage, String>;
}

/// Wraps one raster image as the sole content of a fixed-size page.
pub trait DocumentPackager {
    fn package(&self, image: &RgbImage, page: PageGeometry) -> Result<Vec<u8>, String>;
}

/// Hands a finished byte stream to the user under a fixed filename.
pub trait FileSaver {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStatus {
    /// PDF produced and saved; the form was reset.
    Completed,
    /// Guard refused the attempt (not ready, or already exporting).
    Rejected,
    /// A collaborator failed; the form kept its state and carries the
    /// error message.
    Failed,
}

/// Orchestrates one export: Idle → Exporting → (Idle | Error). The
/// environment is single-threaded, so the busy flag is only a re-entry
/// guard, not a lock.
#[derive(Debug, Default)]
pub struct Exporter {
    exporting: bool,
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    pub fn export<R, P, S>(
        &mut self,
        form: &mut FormState,
        rasterizer: &R,
        packager: &P,
        saver: &S,
        filename: &str,
    ) -> ExportStatus
    where
        R: SurfaceRasterizer,
        P: DocumentPackager,
        S: FileSaver,
    {
        if self.exporting || !form.is_export_ready() {
            return ExportStatus::Rejected;
        }

        self.exporting = true;
        form.clear_error();
        let surface = print_template(form.data());
        let options = RasterOptions {
            scale: EXPORT_SCALE,
            background: WHITE,
        };
        let result = rasterizer
            .rasterize(&surface, &options)
            .and_then(|image| packager.package(&image, A4_LANDSCAPE))
            .and_then(|bytes| saver.save(filename, &bytes));
        self.exporting = false;

        match result {
            Ok(()) => {
                form.reset();
                ExportStatus::Completed
            }
            Err(err) => {
                let detail = if err.trim().is_empty() {
                    ERROR_FALLBACK.to_string()
                } else {
                    err
                };
                form.set_error(format!("{ERROR_PREFIX} {detail}"));
                ExportStatus::Failed
            }
        }
    }
}
