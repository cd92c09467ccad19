use super::*;
use crate::foundation::core::Point;
use crate::render::projector::Role;
use crate::scene::model::{Note, NoteProperty};
use crate::scene::template::template_scene;

fn routed_surface() -> RenderSurface {
    let mut scene = template_scene(FieldSize::STANDARD);
    scene.add_route_point(0, Point::new(400.0, 200.0)).unwrap();
    let mut surface = RenderSurface::new(FieldSize::STANDARD, SurfaceOptions::default());
    surface.draw(SceneView::of(scene));
    surface
}

fn route_width(surface: &RenderSurface) -> f64 {
    let item = surface
        .display_list()
        .with_role(Role::Route(0))
        .next()
        .unwrap();
    match &item.primitive {
        Primitive::Shape { stroke, .. } => stroke.as_ref().unwrap().width,
        Primitive::Text { .. } => panic!("expected shape"),
    }
}

#[test]
fn resize_refits_viewport() {
    let mut surface = RenderSurface::new(FieldSize::STANDARD, SurfaceOptions::default());
    assert_eq!(surface.viewport().scale(), 1.0);
    surface.resize(200.0);
    assert_eq!(surface.viewport().scale(), 0.25);
}

#[test]
fn thickness_override_is_restored() {
    let mut surface = routed_surface();
    assert_eq!(route_width(&surface), 7.0);
    let seen = surface.with_route_thickness(2.0, route_width);
    assert_eq!(seen, 14.0);
    assert_eq!(route_width(&surface), 7.0);
    assert_eq!(surface.view().scene.routes()[0].thickness, 7.0);
}

#[test]
fn svg_escapes_note_text() {
    let mut scene = template_scene(FieldSize::STANDARD);
    let i = scene.add_note(Note::default());
    scene.update_note(i, NoteProperty::Text("<Hot> & \"go\"".to_owned()));
    let mut surface = RenderSurface::new(FieldSize::STANDARD, SurfaceOptions::default());
    surface.draw(SceneView::of(scene));

    let svg = surface.to_svg("white");
    assert!(svg.contains("&lt;Hot&gt; &amp; &quot;go&quot;"));
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"viewBox="0 0 800 600""#));
}

#[test]
fn capture_uses_field_units_times_pixel_ratio() {
    let mut surface = routed_surface();
    surface.resize(400.0);
    let img = surface.capture(0.5, "white", system_fontdb()).unwrap();
    assert_eq!(img.dimensions(), (400, 300));
    // Bottom-left corner is bare field.
    assert_eq!(img.get_pixel(1, 298).0, [255, 255, 255, 255]);
}

#[test]
fn capture_rejects_bad_pixel_ratio() {
    let surface = routed_surface();
    assert!(matches!(
        surface.capture(0.0, "white", system_fontdb()),
        Err(PlayError::Validation(_))
    ));
}

#[test]
fn rasterize_rejects_oversized_targets() {
    let err = rasterize_svg(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#,
        system_fontdb(),
        MAX_RASTER_DIM + 1,
        1,
    )
    .unwrap_err();
    assert!(matches!(err, PlayError::Export(_)));
}
