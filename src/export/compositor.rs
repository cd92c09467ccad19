use std::fmt::Write as _;
use std::io::Cursor;
use std::sync::Arc;

use anyhow::Context;
use base64::Engine as _;

use crate::foundation::error::{PlayError, PlayResult};
use crate::render::surface::{RenderSurface, rasterize_svg, system_fontdb, xml_escape};

/// Title shown when the play has no name.
pub const PLACEHOLDER_TITLE: &str = "Unnamed Play";

/// Width / height of the brand mark drawn in the bottom band.
const LOGO_ASPECT: f64 = 1.6;

/// Export layout, in output pixels unless noted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Device pixels per field unit for the field capture.
    pub pixel_ratio: f64,
    /// Height of the title band above the field.
    pub title_band_px: u32,
    /// Height of the branding band below the field.
    pub branding_band_px: u32,
    /// Rows trimmed off the bottom of the field crop.
    pub bottom_cut_px: u32,
    /// Field background.
    pub background: String,
    /// Fill of both bands.
    pub band_color: String,
    /// Title font size.
    pub title_font_px: f64,
    /// Caption in front of the brand mark.
    pub caption: String,
    /// Caption font size.
    pub caption_font_px: f64,
    /// Caption color.
    pub caption_color: String,
    /// Brand mark height.
    pub logo_height_px: f64,
    /// Gap between caption and brand mark.
    pub logo_spacing_px: f64,
    /// Gap between brand mark and the right edge.
    pub right_margin_px: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pixel_ratio: 4.0,
            title_band_px: 240,
            branding_band_px: 168,
            bottom_cut_px: 40,
            background: "white".to_owned(),
            band_color: "#d1d5db".to_owned(),
            title_font_px: 192.0,
            caption: "made with".to_owned(),
            caption_font_px: 134.0,
            caption_color: "#9CA3AF".to_owned(),
            logo_height_px: 134.0,
            logo_spacing_px: 20.0,
            right_margin_px: 40.0,
        }
    }
}

/// Region of the captured field kept in the export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

/// Center-crop a `src_w`x`src_h` raster to `ratio` (width / height), then trim `bottom_cut` rows
/// if the crop reaches into the bottom strip.
pub fn crop_rect(src_w: u32, src_h: u32, ratio: f64, bottom_cut: u32) -> PlayResult<CropRect> {
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(PlayError::validation(format!(
            "aspect ratio must be positive, got {ratio}"
        )));
    }
    if src_w == 0 || src_h == 0 {
        return Err(PlayError::export("cannot crop an empty capture"));
    }

    let (sw, sh) = (f64::from(src_w), f64::from(src_h));
    let src_ratio = sw / sh;
    let (mut x, mut y, mut w, mut h) = (0.0, 0.0, sw, sh);
    if (src_ratio - ratio).abs() > 1e-9 {
        if src_ratio > ratio {
            w = sh * ratio;
            x = (sw - w) / 2.0;
        } else {
            h = sw / ratio;
            y = (sh - h) / 2.0;
        }
    }

    let cut = f64::from(bottom_cut);
    if y + h > sh - cut {
        h = sh - cut - y;
    }
    if w < 1.0 || h < 1.0 {
        return Err(PlayError::export(format!(
            "crop collapsed to {w:.0}x{h:.0}; capture too small for the bottom cut"
        )));
    }

    Ok(CropRect {
        x: x.round() as u32,
        y: y.round() as u32,
        width: w.round() as u32,
        height: h.round() as u32,
    })
}

/// Suggested download name for an export of `play_name`.
pub fn export_file_name(play_name: &str) -> String {
    let name = play_name.trim();
    if name.is_empty() {
        "play.png".to_owned()
    } else {
        format!("{name}.png")
    }
}

/// An encoded export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// PNG bytes.
    pub png: Vec<u8>,
}

impl ExportImage {
    /// `data:image/png;base64,...` form of the PNG.
    pub fn data_url(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.png)
        )
    }
}

/// Builds shareable images from the render surface.
#[derive(Clone, Debug)]
pub struct Compositor {
    options: ExportOptions,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(ExportOptions::default())
    }
}

impl Compositor {
    /// Compositor using the shared system font database.
    pub fn new(options: ExportOptions) -> Self {
        Self::with_fontdb(options, system_fontdb())
    }

    /// Compositor with an explicit font database.
    pub fn with_fontdb(options: ExportOptions, fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self { options, fontdb }
    }

    /// Active options.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Capture, crop, frame and encode the surface.
    ///
    /// Returns `Ok(None)` when there is no surface to capture. When `thickness` is not 1 the
    /// surface is redrawn with scaled route strokes for the capture and restored afterwards.
    #[tracing::instrument(skip(self, surface), fields(has_surface = surface.is_some()))]
    pub fn export(
        &self,
        surface: Option<&mut RenderSurface>,
        title: &str,
        ratio: f64,
        thickness: f64,
    ) -> PlayResult<Option<ExportImage>> {
        let Some(surface) = surface else {
            tracing::debug!("no render surface, export unavailable");
            return Ok(None);
        };
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(PlayError::validation(format!(
                "thickness multiplier must be positive, got {thickness}"
            )));
        }

        let opts = &self.options;
        let field = surface.with_route_thickness(thickness, |s| {
            s.capture(opts.pixel_ratio, &opts.background, self.fontdb.clone())
        })?;
        let composed = self.compose(&field, title, ratio)?;

        let mut png = Vec::new();
        composed
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .context("encode export png")?;
        tracing::info!(
            width = composed.width(),
            height = composed.height(),
            bytes = png.len(),
            "export ready"
        );
        Ok(Some(ExportImage {
            width: composed.width(),
            height: composed.height(),
            png,
        }))
    }

    /// Crop `field` to `ratio` and add the title and branding bands.
    pub fn compose(
        &self,
        field: &image::RgbaImage,
        title: &str,
        ratio: f64,
    ) -> PlayResult<image::RgbaImage> {
        let opts = &self.options;
        let crop = crop_rect(field.width(), field.height(), ratio, opts.bottom_cut_px)?;
        let width = crop.width;
        let height = crop.height + opts.title_band_px + opts.branding_band_px;

        let title = if title.trim().is_empty() {
            PLACEHOLDER_TITLE
        } else {
            title
        };
        let chrome = self.chrome_svg(width, crop.height, title);
        let mut canvas = rasterize_svg(&chrome, self.fontdb.clone(), width, height)?;

        let cropped =
            image::imageops::crop_imm(field, crop.x, crop.y, crop.width, crop.height).to_image();
        image::imageops::replace(&mut canvas, &cropped, 0, i64::from(opts.title_band_px));
        Ok(canvas)
    }

    fn chrome_svg(&self, width: u32, field_h: u32, title: &str) -> String {
        let o = &self.options;
        let w = f64::from(width);
        let title_h = f64::from(o.title_band_px);
        let brand_h = f64::from(o.branding_band_px);
        let brand_top = title_h + f64::from(field_h);
        let height = brand_top + brand_h;
        let mid = brand_top + brand_h / 2.0;

        let logo_h = o.logo_height_px;
        let logo_w = logo_h * LOGO_ASPECT;
        let logo_x = w - o.right_margin_px - logo_w;
        let logo_y = mid - logo_h / 2.0;
        let caption_end = logo_x - o.logo_spacing_px;

        let band = xml_escape(&o.band_color);
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{height}" viewBox="0 0 {w} {height}">"#
        );
        let _ = writeln!(
            svg,
            r#"<rect width="{w}" height="{height}" fill="{}"/>"#,
            xml_escape(&o.background)
        );
        let _ = writeln!(svg, r#"<rect width="{w}" height="{title_h}" fill="{band}"/>"#);
        let _ = writeln!(
            svg,
            r#"<rect y="{brand_top}" width="{w}" height="{brand_h}" fill="{band}"/>"#
        );
        let _ = writeln!(
            svg,
            r##"<text x="{}" y="{}" font-family="sans-serif" font-size="{}" font-weight="bold" fill="#000" text-anchor="middle" dominant-baseline="central">{}</text>"##,
            w / 2.0,
            title_h / 2.0,
            o.title_font_px,
            xml_escape(title)
        );
        let _ = writeln!(
            svg,
            r#"<text x="{caption_end}" y="{mid}" font-family="sans-serif" font-size="{}" fill="{}" text-anchor="end">{}</text>"#,
            o.caption_font_px,
            xml_escape(&o.caption_color),
            xml_escape(&o.caption)
        );
        svg.push_str(&logo_svg(logo_x, logo_y, logo_w, logo_h));
        svg.push_str("</svg>\n");
        svg
    }
}

/// Brand mark: a football with laces, fitted to the given box.
fn logo_svg(x: f64, y: f64, w: f64, h: f64) -> String {
    let cx = x + w / 2.0;
    let cy = y + h / 2.0;
    let lace = h * 0.06;
    let mut out = String::new();
    let _ = writeln!(
        out,
        r##"<ellipse cx="{cx}" cy="{cy}" rx="{}" ry="{}" fill="#7C2D12"/>"##,
        w / 2.0,
        h / 2.0
    );
    let _ = writeln!(
        out,
        r##"<line x1="{}" y1="{cy}" x2="{}" y2="{cy}" stroke="#fff" stroke-width="{lace}" stroke-linecap="round"/>"##,
        cx - w * 0.2,
        cx + w * 0.2
    );
    for i in -2..=2 {
        let lx = cx + f64::from(i) * w * 0.08;
        let _ = writeln!(
            out,
            r##"<line x1="{lx}" y1="{}" x2="{lx}" y2="{}" stroke="#fff" stroke-width="{lace}" stroke-linecap="round"/>"##,
            cy - h * 0.12,
            cy + h * 0.12
        );
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/export/compositor.rs"]
mod tests;
