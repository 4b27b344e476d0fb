use crate::export::{DocumentPackager, PageGeometry};
use image::RgbImage;
use printpdf::{image_crate, Image, ImageTransform, Mm, PdfDocument};

const MM_PER_INCH: f32 = 25.4;

/// Wraps one raster as the sole content of a single fixed-size page,
/// stretched edge to edge the way the browser original placed its canvas
/// capture.
pub struct PdfPackager;

impl DocumentPackager for PdfPackager {
    fn package(&self, image: &RgbImage, page: PageGeometry) -> Result<Vec<u8>, String> {
        if image.width() == 0 || image.height() == 0 {
            return Err("cannot package an empty raster image".to_string());
        }

        let (doc, page_index, layer_index) = PdfDocument::new(
            "RIB",
            Mm(page.width_mm.into()),
            Mm(page.height_mm.into()),
            "Calque 1",
        );
        let layer = doc.get_page(page_index).get_layer(layer_index);

        // Pick the dpi that makes the raster span the page width, then
        // stretch the height the remaining fraction of a percent.
        let dpi = image.width() as f32 / (page.width_mm / MM_PER_INCH);
        let target_height_px = page.height_mm / MM_PER_INCH * dpi;
        let scale_y = target_height_px / image.height() as f32;

        // printpdf bundles its own (older) image crate; rebuild the
        // buffer from raw pixels at the boundary.
        let pixels = image_crate::RgbImage::from_raw(
            image.width(),
            image.height(),
            image.as_raw().clone(),
        )
        .ok_or_else(|| "raster pixel buffer has an inconsistent size".to_string())?;
        let pdf_image = Image::from_dynamic_image(&image_crate::DynamicImage::ImageRgb8(pixels));
        pdf_image.add_to_layer(
            layer,
            ImageTransform {
                translate_x: Some(Mm(0.0)),
                translate_y: Some(Mm(0.0)),
                dpi: Some(dpi.into()),
                scale_x: Some(1.0),
                scale_y: Some(scale_y.into()),
                ..Default::default()
            },
        );

        doc.save_to_bytes().map_err(|err| err.to_string())
    }
}
