use crate::export::{RasterOptions, SurfaceRasterizer};
use crate::render::{Align, Color, FontStyle, Item, Surface};
use ab_glyph::{FontRef, PxScale};
use base64::{engine::general_purpose, Engine};
use image::{imageops, DynamicImage, RgbImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

const SANS: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");
const SANS_BOLD: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");
const MONO: &[u8] = include_bytes!("../assets/fonts/DejaVuSansMono.ttf");
const MONO_BOLD: &[u8] = include_bytes!("../assets/fonts/DejaVuSansMono-Bold.ttf");

/// Draws a surface onto an in-memory bitmap with the embedded DejaVu
/// faces. Logo payloads must be `data:` URLs; other references (the
/// remote URLs of the bank lookup) are left undrawn since the tool makes
/// no network calls.
pub struct BitmapRasterizer {
    sans: FontRef<'static>,
    sans_bold: FontRef<'static>,
    mono: FontRef<'static>,
    mono_bold: FontRef<'static>,
}

impl BitmapRasterizer {
    pub fn new() -> Result<Self, String> {
        Ok(Self {
            sans: FontRef::try_from_slice(SANS).map_err(|err| err.to_string())?,
            sans_bold: FontRef::try_from_slice(SANS_BOLD).map_err(|err| err.to_string())?,
            mono: FontRef::try_from_slice(MONO).map_err(|err| err.to_string())?,
            mono_bold: FontRef::try_from_slice(MONO_BOLD).map_err(|err| err.to_string())?,
        })
    }

    fn font(&self, style: FontStyle) -> &FontRef<'static> {
        match style {
            FontStyle::Regular => &self.sans,
            FontStyle::Bold => &self.sans_bold,
            FontStyle::Mono => &self.mono,
            FontStyle::MonoBold => &self.mono_bold,
        }
    }
}

impl SurfaceRasterizer for BitmapRasterizer {
    fn rasterize(&self, surface: &Surface, options: &RasterOptions) -> Result<RgbImage, String> {
        let scale = options.scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(format!("invalid raster scale: {scale}"));
        }
        let width = (surface.width as f32 * scale).round() as u32;
        let height = (surface.height as f32 * scale).round() as u32;
        if width == 0 || height == 0 {
            return Err("raster surface has zero size".to_string());
        }

        let mut canvas = RgbaImage::from_pixel(width, height, rgba(options.background));
        for item in &surface.items {
            match item {
                Item::Rect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => {
                    let rect = Rect::at(px(*x, scale), px(*y, scale)).of_size(
                        ((width * scale).round() as u32).max(1),
                        ((height * scale).round() as u32).max(1),
                    );
                    draw_filled_rect_mut(&mut canvas, rect, rgba(*color));
                }
                Item::Text {
                    x,
                    y,
                    px: size,
                    font,
                    color,
                    align,
                    text,
                } => {
                    if text.is_empty() {
                        continue;
                    }
                    let font = self.font(*font);
                    let px_scale = PxScale::from(size * scale);
                    let anchor = px(*x, scale);
                    let draw_x = match align {
                        Align::Left => anchor,
                        Align::Center => {
                            let (text_width, _) = text_size(px_scale, font, text);
                            anchor - (text_width as i32) / 2
                        }
                        Align::Right => {
                            let (text_width, _) = text_size(px_scale, font, text);
                            anchor - text_width as i32
                        }
                    };
                    draw_text_mut(&mut canvas, rgba(*color), draw_x, px(*y, scale), px_scale, font, text);
                }
                Item::Image {
                    x,
                    y,
                    width,
                    height,
                    data_url,
                } => match decode_data_url(data_url) {
                    Ok(Some(logo)) => {
                        draw_fitted(&mut canvas, &logo, px(*x, scale), px(*y, scale), width * scale, height * scale);
                    }
                    Ok(None) => {}
                    Err(err) => log::warn!("skipping logo image: {err}"),
                },
            }
        }

        Ok(DynamicImage::ImageRgba8(canvas).to_rgb8())
    }
}

fn px(value: f32, scale: f32) -> i32 {
    (value * scale).round() as i32
}

fn rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

/// Scales the logo to fit the box while keeping its aspect ratio, then
/// alpha-blends it centered into the box.
fn draw_fitted(canvas: &mut RgbaImage, logo: &DynamicImage, x: i32, y: i32, box_width: f32, box_height: f32) {
    let (logo_width, logo_height) = (logo.width() as f32, logo.height() as f32);
    if logo_width == 0.0 || logo_height == 0.0 {
        return;
    }
    let factor = (box_width / logo_width).min(box_height / logo_height);
    let target_width = ((logo_width * factor).round() as u32).max(1);
    let target_height = ((logo_height * factor).round() as u32).max(1);
    let resized = imageops::resize(
        &logo.to_rgba8(),
        target_width,
        target_height,
        imageops::FilterType::Triangle,
    );
    let offset_x = x as i64 + ((box_width.round() as i64 - target_width as i64) / 2).max(0);
    let offset_y = y as i64 + ((box_height.round() as i64 - target_height as i64) / 2).max(0);
    imageops::overlay(canvas, &resized, offset_x, offset_y);
}

/// Decodes a `data:<media-type>;base64,<payload>` URL into pixels.
/// Returns `Ok(None)` for anything that is not a data URL.
fn decode_data_url(url: &str) -> Result<Option<DynamicImage>, String> {
    if !url.starts_with("data:") {
        return Ok(None);
    }
    let payload = url
        .split_once(";base64,")
        .map(|(_, payload)| payload)
        .ok_or_else(|| "logo data URL is not base64-encoded".to_string())?;
    let bytes = general_purpose::STANDARD
        .decode(payload)
        .map_err(|err| format!("invalid base64 in logo data URL: {err}"))?;
    let image = image::load_from_memory(&bytes)
        .map_err(|err| format!("cannot decode logo image: {err}"))?;
    Ok(Some(image))
}
