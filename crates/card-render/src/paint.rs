//! Scene → display list.
//!
//! Turns each element into a paint item in paint order (index 0 first).
//! Shapes become `kurbo` paths in canvas coordinates with a `peniko`
//! color; text carries its derived style. Drawing the list is up to the
//! host surface.

use card_core::style::{DerivedTextStyle, derive_text_style};
use card_core::{Bounds, Element, ElementId, ElementKind, ImageRef, Scene, ShapeKind};
use kurbo::{Affine, BezPath, Ellipse, Point, Rect, Shape};
use peniko::Color;

/// Heart outline on a 24×24 viewbox.
const HEART_SVG: &str = "M12,21.35l-1.45-1.32C5.4,15.36,2,12.28,2,8.5 C2,5.42,4.42,3,7.5,3c1.74,0,3.41,0.81,4.5,2.09C13.09,3.81,14.76,3,16.5,3 C19.58,3,22,5.42,22,8.5c0,3.78-3.4,6.86-8.55,11.54L12,21.35z";

/// Star vertices as fractions of the bounding box.
const STAR: [(f64, f64); 10] = [
    (0.50, 0.00),
    (0.61, 0.35),
    (0.98, 0.35),
    (0.68, 0.57),
    (0.79, 0.91),
    (0.50, 0.70),
    (0.21, 0.91),
    (0.32, 0.57),
    (0.02, 0.35),
    (0.39, 0.35),
];

const ARROW: [(f64, f64); 5] = [(0.0, 0.0), (0.8, 0.0), (1.0, 0.5), (0.8, 1.0), (0.0, 1.0)];

const TRIANGLE: [(f64, f64); 3] = [(0.5, 0.0), (1.0, 1.0), (0.0, 1.0)];

#[derive(Debug, Clone)]
pub enum PaintKind {
    Text {
        content: String,
        style: DerivedTextStyle,
    },
    Image {
        source: ImageRef,
    },
    Shape {
        shape: ShapeKind,
        path: BezPath,
        fill: Color,
    },
}

#[derive(Debug, Clone)]
pub struct PaintItem {
    pub id: ElementId,
    pub index: usize,
    pub bounds: Bounds,
    pub opacity: f32,
    pub selected: bool,
    pub kind: PaintKind,
}

/// Build the display list for a scene, bottom element first.
pub fn paint_scene(scene: &Scene, selected: Option<ElementId>) -> Vec<PaintItem> {
    scene
        .elements
        .iter()
        .enumerate()
        .map(|(index, el)| paint_element(el, index, selected == Some(el.id)))
        .collect()
}

pub fn paint_element(el: &Element, index: usize, selected: bool) -> PaintItem {
    let bounds = el.bounds();
    let kind = match &el.kind {
        ElementKind::Text { text } | ElementKind::ArtText { text, .. } => {
            log::trace!("TEXT {} {:?} at ({}, {})", el.id, text.content, bounds.x, bounds.y);
            PaintKind::Text {
                content: text.content.clone(),
                style: derive_text_style(el).unwrap_or_default(),
            }
        }
        ElementKind::Image { source, .. } => PaintKind::Image {
            source: source.clone(),
        },
        ElementKind::Shape { shape, color, .. } => PaintKind::Shape {
            shape: *shape,
            path: shape_path(*shape, &bounds),
            fill: Color::from_rgba8(color.r, color.g, color.b, alpha8(color.a)),
        },
    };
    PaintItem {
        id: el.id,
        index,
        bounds,
        opacity: el.opacity(),
        selected,
        kind,
    }
}

fn alpha8(a: f32) -> u8 {
    (a.clamp(0.0, 1.0) * 255.0).round() as u8
}

// ─── Shape outlines ──────────────────────────────────────────────────────

fn rect_of(b: &Bounds) -> Rect {
    Rect::new(
        b.x as f64,
        b.y as f64,
        (b.x + b.width) as f64,
        (b.y + b.height) as f64,
    )
}

fn polygon(b: &Bounds, points: &[(f64, f64)]) -> BezPath {
    let r = rect_of(b);
    let at = |(fx, fy): (f64, f64)| Point::new(r.x0 + fx * r.width(), r.y0 + fy * r.height());
    let mut path = BezPath::new();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            path.move_to(at(*p));
        } else {
            path.line_to(at(*p));
        }
    }
    path.close_path();
    path
}

fn heart(b: &Bounds) -> BezPath {
    let r = rect_of(b);
    match BezPath::from_svg(HEART_SVG) {
        Ok(mut path) => {
            path.apply_affine(
                Affine::translate((r.x0, r.y0))
                    * Affine::scale_non_uniform(r.width() / 24.0, r.height() / 24.0),
            );
            path
        }
        Err(e) => {
            log::warn!("heart outline failed to parse: {e:?}");
            r.to_path(0.1)
        }
    }
}

/// Outline of a preset shape filling the given box.
pub fn shape_path(shape: ShapeKind, b: &Bounds) -> BezPath {
    match shape {
        ShapeKind::Rectangle | ShapeKind::Line => rect_of(b).to_path(0.1),
        ShapeKind::Circle => Ellipse::from_rect(rect_of(b)).to_path(0.1),
        ShapeKind::Triangle => polygon(b, &TRIANGLE),
        ShapeKind::Arrow => polygon(b, &ARROW),
        ShapeKind::Star => polygon(b, &STAR),
        ShapeKind::Heart => heart(b),
    }
}
