//! Canvas2D software renderer.
//!
//! Walks the display list and draws to an HTML `<canvas>` via
//! `CanvasRenderingContext2d`. Text effects a 2D context can't express
//! (clipped gradients, filters, keyframe animation) are left to the DOM
//! overlay that consumes the same derived styles.

use card_core::{ElementKind, Fill, Scene};
use card_render::hit::handle_points;
use card_render::{HANDLE_RADIUS, Handle, PaintItem, PaintKind};
use kurbo::{BezPath, PathEl};
use peniko::Color;
use std::collections::{HashMap, HashSet};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

const SELECTION_COLOR: &str = "#3B82F6";

/// Decoded `<img>` elements keyed by source, so data URLs are decoded once.
#[derive(Default)]
pub struct ImageCache {
    images: HashMap<String, HtmlImageElement>,
}

impl ImageCache {
    /// The image for `src`, or `None` while it is still decoding.
    fn get(&mut self, src: &str) -> Option<&HtmlImageElement> {
        if !self.images.contains_key(src) {
            let img = match HtmlImageElement::new() {
                Ok(img) => img,
                Err(e) => {
                    log::warn!("cannot create image element: {e:?}");
                    return None;
                }
            };
            img.set_src(src);
            self.images.insert(src.to_string(), img);
        }
        self.images.get(src).filter(|img| img.complete())
    }

    /// Drop images no longer referenced by the scene.
    pub fn retain_used(&mut self, scene: &Scene) {
        let used = used_sources(scene);
        self.images.retain(|src, _| used.contains(src.as_str()));
    }
}

/// Every image source the scene currently draws.
pub fn used_sources(scene: &Scene) -> HashSet<&str> {
    scene
        .elements
        .iter()
        .filter_map(|el| match &el.kind {
            ElementKind::Image { source, .. } => Some(source.as_str()),
            ElementKind::ArtText { effects, .. } => {
                effects.background_image.as_ref().map(|i| i.as_str())
            }
            _ => None,
        })
        .chain(scene.background_image.as_ref().map(|i| i.as_str()))
        .collect()
}

/// Render the whole card.
pub fn render_scene(
    ctx: &CanvasRenderingContext2d,
    scene: &Scene,
    items: &[PaintItem],
    images: &mut ImageCache,
    width: f64,
    height: f64,
) {
    ctx.clear_rect(0.0, 0.0, width, height);
    draw_background(ctx, scene, images, width, height);

    for item in items {
        ctx.save();
        ctx.set_global_alpha(item.opacity as f64);
        match &item.kind {
            PaintKind::Shape { path, fill, .. } => draw_path(ctx, path, *fill),
            PaintKind::Image { source } => {
                if let Some(img) = images.get(source.as_str()) {
                    let b = &item.bounds;
                    let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        img,
                        b.x as f64,
                        b.y as f64,
                        b.width as f64,
                        b.height as f64,
                    );
                }
            }
            PaintKind::Text { content, style } => {
                let weight = if style.bold { "bold" } else { "normal" };
                let slant = if style.italic { "italic" } else { "normal" };
                ctx.set_font(&format!(
                    "{slant} {weight} {}px {}",
                    style.font_size, style.font_family
                ));
                ctx.set_text_baseline("top");
                // Transparent glyphs only show their clipped background in the DOM.
                if let Some(color) = style.color {
                    ctx.set_fill_style_str(&color.to_css());
                    let _ = ctx.fill_text(content, item.bounds.x as f64, item.bounds.y as f64);
                }
            }
        }
        ctx.restore();

        if item.selected {
            draw_selection(ctx, item);
        }
    }
}

fn draw_background(
    ctx: &CanvasRenderingContext2d,
    scene: &Scene,
    images: &mut ImageCache,
    width: f64,
    height: f64,
) {
    let color = match &scene.background {
        Fill::Solid(c) => Some(c.to_css()),
        Fill::Transparent => None,
        // Gradients are painted by the host's CSS background.
        Fill::Gradient(_) => None,
    };
    if let Some(color) = color {
        ctx.set_fill_style_str(&color);
        ctx.fill_rect(0.0, 0.0, width, height);
    }
    if let Some(src) = &scene.background_image
        && let Some(img) = images.get(src.as_str())
    {
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, width, height);
    }
}

fn css_color(color: Color) -> String {
    let c = color.to_rgba8();
    format!("rgba({}, {}, {}, {})", c.r, c.g, c.b, c.a as f64 / 255.0)
}

fn trace_path(ctx: &CanvasRenderingContext2d, path: &BezPath) {
    ctx.begin_path();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => ctx.move_to(p.x, p.y),
            PathEl::LineTo(p) => ctx.line_to(p.x, p.y),
            PathEl::QuadTo(c, p) => ctx.quadratic_curve_to(c.x, c.y, p.x, p.y),
            PathEl::CurveTo(c1, c2, p) => ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
            PathEl::ClosePath => ctx.close_path(),
        }
    }
}

fn draw_path(ctx: &CanvasRenderingContext2d, path: &BezPath, fill: Color) {
    trace_path(ctx, path);
    ctx.set_fill_style_str(&css_color(fill));
    ctx.fill();
}

fn draw_selection(ctx: &CanvasRenderingContext2d, item: &PaintItem) {
    let b = &item.bounds;
    ctx.save();
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(2.0);
    let _ = ctx.set_line_dash(&js_sys::Array::of2(
        &wasm_bindgen::JsValue::from_f64(4.0),
        &wasm_bindgen::JsValue::from_f64(4.0),
    ));
    ctx.stroke_rect(b.x as f64, b.y as f64, b.width as f64, b.height as f64);
    let _ = ctx.set_line_dash(&js_sys::Array::new());

    ctx.set_fill_style_str(SELECTION_COLOR);
    ctx.set_stroke_style_str("#FFFFFF");
    ctx.set_line_width(1.5);
    for (handle, hx, hy) in handle_points(b) {
        // corner handles are drawn larger than edge handles
        let r = match handle {
            Handle::Nw | Handle::Ne | Handle::Se | Handle::Sw => HANDLE_RADIUS as f64 * 0.75,
            Handle::N | Handle::E | Handle::S | Handle::W => HANDLE_RADIUS as f64 * 0.5,
        };
        ctx.begin_path();
        let _ = ctx.arc(hx as f64, hy as f64, r, 0.0, std::f64::consts::TAU);
        ctx.fill();
        ctx.stroke();
    }
    ctx.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_core::{ImageRef, add_element, create_image, create_text, delete_element};
    use pretty_assertions::assert_eq;

    #[test]
    fn used_sources_follow_scene() {
        let scene = add_element(&Scene::default(), create_image(ImageRef::new("data:a")));
        let scene = add_element(&scene, create_text());

        let mut with_background = scene.clone();
        with_background.background_image = Some(ImageRef::new("data:bg"));
        assert_eq!(
            used_sources(&with_background),
            HashSet::from(["data:a", "data:bg"])
        );

        let emptied = delete_element(&scene, 0).unwrap();
        assert!(used_sources(&emptied).is_empty());
    }
}
