//! Scene-level behavior of the element model, z-order and style engine.

use card_core::*;
use pretty_assertions::assert_eq;

fn ids(scene: &Scene) -> Vec<ElementId> {
    scene.elements.iter().map(|e| e.id).collect()
}

fn populated() -> Scene {
    let mut scene = Scene::blank();
    for el in [
        create_text(),
        create_shape(ShapeKind::Star),
        create_image(ImageRef::new("data:image/png;base64,AAAA")),
        create_shape(ShapeKind::Heart),
    ] {
        scene = add_element(&scene, el);
    }
    scene
}

#[test]
fn delete_middle_of_three() {
    let mut scene = Scene::blank();
    for kind in [ShapeKind::Rectangle, ShapeKind::Circle, ShapeKind::Line] {
        scene = add_element(&scene, create_shape(kind));
    }
    let third = scene.elements[2].id;

    let next = delete_element(&scene, 1).unwrap();

    assert_eq!(next.len(), 2);
    assert_eq!(next.elements[1].id, third);
    assert_eq!(scene.len(), 3);
}

#[test]
fn add_appends_on_top() {
    let scene = populated();
    let shape = create_shape(ShapeKind::Arrow);
    let id = shape.id;
    let next = add_element(&scene, shape);
    assert_eq!(next.elements.last().map(|e| e.id), Some(id));
}

#[test]
fn reorder_cycle_from_bottom_restores_order() {
    let scene = populated();
    let original = ids(&scene);
    let mut cur = scene.clone();
    let mut idx = 0;

    let mut apply = |op: ZMove| {
        if let Some(r) = zorder::reorder(&cur, idx, op).unwrap() {
            cur = r.scene;
            idx = r.index;
        }
    };
    apply(ZMove::ToFront);
    apply(ZMove::Forward);
    apply(ZMove::Forward);
    apply(ZMove::Backward);
    apply(ZMove::Backward);
    apply(ZMove::ToBack);

    assert_eq!(idx, 0);
    assert_eq!(ids(&cur), original);
}

#[test]
fn glow_scenario_on_blank_scene() {
    let mut preset = ArtTextPreset::default();
    preset.effects.animation = Animation::Glow;
    preset.effects.glow_blur = Some(1.0);
    let art = create_art_text(preset);
    let id = art.id;
    let scene = add_element(&Scene::blank(), art);

    let css = derive_glow_keyframes(&scene.elements);

    assert_eq!(css.matches("@keyframes").count(), 1);
    assert!(css.contains(&format!("glow-custom-{id}")));
    assert!(css.contains("3px") && css.contains("4.5px") && css.contains("6px"));
    assert!(css.contains("9px") && css.contains("12px"));
}

#[test]
fn glow_name_follows_element_not_index() {
    let mut preset = ArtTextPreset::default();
    preset.effects.animation = Animation::Glow;
    let art = create_art_text(preset);
    let name = style::glow_keyframes_name(&art);
    let scene = add_element(&populated(), art);

    let moved = send_to_back(&scene, scene.len() - 1).unwrap().unwrap();
    let css = derive_glow_keyframes(&moved.scene.elements);
    assert!(css.contains(&name));
}

#[test]
fn scene_json_round_trip() {
    let mut scene = populated();
    scene = add_element(&scene, create_art_text(ArtTextPreset::default()));
    scene.background = Fill::parse("linear-gradient(135deg, #667eea 0%, #764ba2 100%)").unwrap();

    let json = serde_json::to_string(&scene).unwrap();
    let back: Scene = serde_json::from_str(&json).unwrap();
    assert_eq!(back, scene);
}

#[test]
fn recolor_example() {
    assert_eq!(
        recolor_shadow("0 0 3px rgba(0,255,255,0.8)", Color::from_hex("#FF0000").unwrap()),
        "0 0 3px rgba(255,0,0,0.8)"
    );
}
