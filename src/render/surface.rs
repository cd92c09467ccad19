use std::fmt::Write as _;
use std::sync::{Arc, OnceLock};

use anyhow::Context;

use crate::foundation::core::FieldSize;
use crate::foundation::error::{PlayError, PlayResult};
use crate::render::projector::{DisplayList, Primitive, SceneView, TextAnchor, Viewport, project};

/// Largest raster edge the surface will allocate.
pub const MAX_RASTER_DIM: u32 = 16_384;

/// Host-supplied layout for the on-screen surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SurfaceOptions {
    /// Width of the container the field is fitted into, in screen pixels.
    pub container_width: f64,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            container_width: FieldSize::STANDARD.width,
        }
    }
}

/// Shared font database with the system fonts loaded once per process.
pub fn system_fontdb() -> Arc<usvg::fontdb::Database> {
    static DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Arc::new(db)
    })
    .clone()
}

/// Rasterize an SVG document into a straight-alpha RGBA image of `width`x`height` pixels.
pub fn rasterize_svg(
    svg: &str,
    fontdb: Arc<usvg::fontdb::Database>,
    width: u32,
    height: u32,
) -> PlayResult<image::RgbaImage> {
    if width == 0 || height == 0 || width > MAX_RASTER_DIM || height > MAX_RASTER_DIM {
        return Err(PlayError::export(format!(
            "raster size out of range: {width}x{height} (max {MAX_RASTER_DIM}x{MAX_RASTER_DIM})"
        )));
    }

    let opts = usvg::Options {
        fontdb,
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts).context("parse generated svg")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PlayError::export("failed to allocate raster surface"))?;
    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    let mut out = image::RgbaImage::new(width, height);
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(out)
}

pub(crate) fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Serialize a display list as an SVG document in field units.
pub fn display_list_svg(list: &DisplayList, background: &str) -> String {
    let FieldSize { width, height } = list.field;
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    let _ = writeln!(
        svg,
        r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
        xml_escape(background)
    );

    for item in &list.items {
        match &item.primitive {
            Primitive::Shape { path, fill, stroke } => {
                let fill = fill.as_ref().map_or("none".to_owned(), |c| xml_escape(c.as_str()));
                let _ = write!(svg, r#"<path d="{}" fill="{fill}""#, path.to_svg());
                if let Some(s) = stroke {
                    let _ = write!(
                        svg,
                        r#" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round""#,
                        xml_escape(s.color.as_str()),
                        s.width
                    );
                    if let Some((dash, gap)) = s.dash {
                        let _ = write!(svg, r#" stroke-dasharray="{dash} {gap}""#);
                    }
                }
                svg.push_str("/>\n");
            }
            Primitive::Text {
                origin,
                text,
                size,
                color,
                bold,
                anchor,
            } => {
                let anchor = match anchor {
                    TextAnchor::Start => "start",
                    TextAnchor::Middle => "middle",
                };
                let weight = if *bold { "bold" } else { "normal" };
                let _ = writeln!(
                    svg,
                    r#"<text x="{}" y="{}" font-family="sans-serif" font-size="{size}" font-weight="{weight}" fill="{}" text-anchor="{anchor}" xml:space="preserve">{}</text>"#,
                    origin.x,
                    origin.y,
                    xml_escape(color.as_str()),
                    xml_escape(text)
                );
            }
        }
    }
    svg.push_str("</svg>\n");
    svg
}

/// The single drawing surface: owns the current view, its viewport and the projected display list.
///
/// The editor redraws it after every change; the export compositor borrows it to capture rasters.
#[derive(Clone, Debug)]
pub struct RenderSurface {
    viewport: Viewport,
    view: SceneView,
    list: DisplayList,
}

impl RenderSurface {
    /// Create an empty surface fitted to a container.
    pub fn new(field: FieldSize, opts: SurfaceOptions) -> Self {
        let viewport = Viewport::fit(field, opts.container_width);
        let view = SceneView::default();
        let list = project(&view, field);
        Self {
            viewport,
            view,
            list,
        }
    }

    /// Refit after the container changed size.
    pub fn resize(&mut self, container_width: f64) {
        self.viewport = Viewport::fit(self.viewport.field(), container_width);
    }

    /// Current field-to-screen mapping.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Replace the view and reproject.
    pub fn draw(&mut self, view: SceneView) {
        self.list = project(&view, self.viewport.field());
        self.view = view;
    }

    /// Last projected display list.
    pub fn display_list(&self) -> &DisplayList {
        &self.list
    }

    /// Last drawn view.
    pub fn view(&self) -> &SceneView {
        &self.view
    }

    /// Current display list as an SVG document in field units.
    pub fn to_svg(&self, background: &str) -> String {
        display_list_svg(&self.list, background)
    }

    /// Rasterize the current display list at `pixel_ratio` device pixels per field unit.
    pub fn capture(
        &self,
        pixel_ratio: f64,
        background: &str,
        fontdb: Arc<usvg::fontdb::Database>,
    ) -> PlayResult<image::RgbaImage> {
        if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
            return Err(PlayError::validation(format!(
                "pixel ratio must be positive, got {pixel_ratio}"
            )));
        }
        let field = self.viewport.field();
        let w = (field.width * pixel_ratio).round() as u32;
        let h = (field.height * pixel_ratio).round() as u32;
        tracing::debug!(w, h, pixel_ratio, "capturing render surface");
        rasterize_svg(&self.to_svg(background), fontdb, w, h)
    }

    /// Redraw with every route thickness multiplied by `factor`, run `f`, then restore and redraw.
    pub fn with_route_thickness<R>(&mut self, factor: f64, f: impl FnOnce(&Self) -> R) -> R {
        if factor == 1.0 {
            return f(self);
        }
        let original = self.view.clone();
        let mut scaled = original.clone();
        scaled.scene = original.scene.with_route_thickness_scaled(factor);
        self.draw(scaled);
        let out = f(self);
        self.draw(original);
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
