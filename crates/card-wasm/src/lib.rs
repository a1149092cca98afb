//! WASM bridge for the card editor: exposes the editor session to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. Structured data crosses the
//! boundary as JSON strings; simple flags and ids as plain values.

mod render2d;

use card_core::{
    Animation, AssetError, Color, EditorConfig, ElementId, ElementPatch, Fill, ImageRef,
    ShapeKind, TextInput, ZMove,
};
use card_editor::{
    DesignStore, EditorSession, ImageTarget, ImageUpload, MemoryStore, PointerEvent,
    PropertyEdit, SceneSource, ShortcutAction, ShortcutMap, TemplateCatalog,
};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The main WASM-facing canvas controller.
///
/// Owns the editor session plus the host-side collaborators it needs: the
/// template catalog, the design store, and decoded images for drawing.
#[wasm_bindgen]
pub struct CardCanvas {
    session: EditorSession,
    templates: TemplateCatalog,
    store: MemoryStore,
    images: render2d::ImageCache,
}

#[wasm_bindgen]
impl CardCanvas {
    /// Create a controller. `config_json` may be empty for defaults or carry
    /// any subset of the editor configuration (e.g. `{"historyLimit":50}`).
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Self {
        console_error_panic_hook_setup();

        let config = if config_json.trim().is_empty() {
            EditorConfig::default()
        } else {
            parse_json(config_json).unwrap_or_default()
        };
        Self {
            session: EditorSession::new(config),
            templates: TemplateCatalog::with_builtin_art_text(),
            store: MemoryStore::new(),
            images: render2d::ImageCache::default(),
        }
    }

    // ─── Loading ─────────────────────────────────────────────────────────

    /// Register a template scene. Returns false if the JSON is not a scene.
    pub fn add_template(&mut self, id: &str, scene_json: &str) -> bool {
        match parse_json(scene_json) {
            Some(scene) => {
                self.templates.insert(id, scene);
                true
            }
            None => false,
        }
    }

    /// Load by editor route id: `saved-…`, a template id, or empty for blank.
    pub fn load(&mut self, route_id: &str) {
        let source = SceneSource::from_route(Some(route_id));
        self.session.load(&source, &self.templates, &self.store);
    }

    pub fn get_scene_json(&self) -> String {
        to_json(self.session.scene(), "null")
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Draw the card. Images the scene no longer uses are evicted first,
    /// whatever edit, undo, or load dropped them.
    pub fn render(&mut self, ctx: &CanvasRenderingContext2d) {
        self.images.retain_used(self.session.scene());
        let canvas = self.session.config().canvas;
        let items = self.session.display_list();
        render2d::render_scene(
            ctx,
            self.session.scene(),
            &items,
            &mut self.images,
            canvas.width as f64,
            canvas.height as f64,
        );
    }

    /// Display list as JSON for the DOM text overlay.
    pub fn get_text_layers_json(&self) -> String {
        let layers: Vec<serde_json::Value> = self
            .session
            .display_list()
            .into_iter()
            .filter_map(|item| match item.kind {
                card_render::PaintKind::Text { content, style } => Some(serde_json::json!({
                    "id": item.id.as_str(),
                    "x": item.bounds.x,
                    "y": item.bounds.y,
                    "width": item.bounds.width,
                    "height": item.bounds.height,
                    "content": content,
                    "fontFamily": style.font_family,
                    "fontSize": style.font_size,
                    "bold": style.bold,
                    "italic": style.italic,
                    "color": style.color.map(|c| c.to_css()),
                    "background": style.background,
                    "backgroundImage": style.background_image,
                    "clipToText": style.clip_to_text,
                    "textShadow": style.outline.shadow,
                    "filter": style.filter,
                    "transform": style.transform,
                    "animation": style.animation,
                    "letterSpacing": style.letter_spacing,
                    "textDecoration": style.text_decoration,
                    "textAlign": style.text_align,
                    "selected": item.selected,
                })),
                _ => None,
            })
            .collect();
        serde_json::Value::Array(layers).to_string()
    }

    /// Keyframe CSS for glowing art text, for a `<style>` element.
    pub fn glow_styles(&self) -> String {
        self.session.glow_styles()
    }

    // ─── Pointer API ─────────────────────────────────────────────────────

    /// Returns true if the scene or selection changed.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.pointer(PointerEvent::Down { x, y })
    }

    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.pointer(PointerEvent::Move { x, y })
    }

    pub fn handle_pointer_up(&mut self, x: f32, y: f32) -> bool {
        self.pointer(PointerEvent::Up { x, y })
    }

    pub fn handle_pointer_cancel(&mut self) -> bool {
        self.pointer(PointerEvent::Cancel)
    }

    // ─── Keyboard Shortcut API ───────────────────────────────────────────

    /// Handle a keyboard event. Returns JSON `{"changed":bool,"action":"<name>"}`.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let Some(action) = ShortcutMap::resolve(key, ctrl, shift, alt, meta) else {
            return r#"{"changed":false,"action":"none"}"#.to_string();
        };
        let changed = self.session.dispatch(action).unwrap_or(false);
        serde_json::json!({ "changed": changed, "action": action_to_name(action) }).to_string()
    }

    // ─── Elements ────────────────────────────────────────────────────────

    pub fn add_text(&mut self) -> String {
        self.session.add_text().as_str().to_string()
    }

    /// Add art text from a named preset; unknown names use the default style.
    pub fn add_art_text(&mut self, preset_id: &str) -> String {
        self.session
            .add_art_text_from(&self.templates, preset_id)
            .as_str()
            .to_string()
    }

    /// Add a preset shape by name (`rectangle`, `circle`, …). Returns the new
    /// id, or an empty string for an unknown shape.
    pub fn add_shape(&mut self, name: &str) -> String {
        match enum_from_name::<ShapeKind>(name) {
            Some(kind) => self.session.add_shape(kind).as_str().to_string(),
            None => String::new(),
        }
    }

    /// Select by id; an empty or unknown id clears the selection.
    pub fn select_by_id(&mut self, id: &str) -> bool {
        self.session.select(ElementId::lookup(id))
    }

    pub fn get_selected_id(&self) -> String {
        self.session
            .selected()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    /// The selected element as JSON, or `null`.
    pub fn get_selected_json(&self) -> String {
        match self.session.selected_element() {
            Some(el) => to_json(el, "null"),
            None => "null".to_string(),
        }
    }

    /// Text panel values for the selected text element, or `null`.
    pub fn get_text_panel_json(&self) -> String {
        match self.session.text_panel() {
            Some(input) => to_json(&input, "null"),
            None => "null".to_string(),
        }
    }

    /// Apply the text panel. Returns true if the scene changed.
    pub fn apply_text(&mut self, input_json: &str) -> bool {
        let Some(input) = parse_json::<TextInput>(input_json) else {
            return false;
        };
        self.session.apply_text(input).unwrap_or(false)
    }

    /// Set one property of the selected element from a panel control.
    pub fn set_prop(&mut self, key: &str, value: &str) -> bool {
        let Some(edit) = property_edit(key, value) else {
            log::warn!("unknown property edit {key}={value}");
            return false;
        };
        self.session.edit_selected(edit).unwrap_or(false)
    }

    /// Apply a raw partial update (JSON) to the selected element.
    pub fn update_selected(&mut self, patch_json: &str) -> bool {
        let Some(patch) = parse_json::<ElementPatch>(patch_json) else {
            return false;
        };
        self.session
            .edit_selected(PropertyEdit::Patch(patch))
            .unwrap_or(false)
    }

    pub fn delete_selected(&mut self) -> bool {
        self.session.delete_selected().unwrap_or(false)
    }

    /// Reorder the selection: `front`, `back`, `forward`, or `backward`.
    pub fn reorder(&mut self, op: &str) -> bool {
        let op = match op {
            "front" => ZMove::ToFront,
            "back" => ZMove::ToBack,
            "forward" => ZMove::Forward,
            "backward" => ZMove::Backward,
            _ => return false,
        };
        self.session.reorder_selected(op).unwrap_or(false)
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.session.can_redo()
    }

    // ─── Background ──────────────────────────────────────────────────────

    /// Set a CSS color or gradient as the card background.
    pub fn change_background(&mut self, css: &str) -> bool {
        match Fill::parse(css) {
            Ok(fill) => {
                self.session.change_background(fill);
                true
            }
            Err(e) => {
                log::warn!("background rejected: {e}");
                false
            }
        }
    }

    pub fn remove_background_image(&mut self) {
        self.session.remove_background_image();
    }

    // ─── Async file loads ────────────────────────────────────────────────

    /// A `FileReader` finished. `target` is `element`, `background`, or
    /// `art-text-background`.
    pub fn image_loaded(&mut self, target: &str, file_name: &str, mime: &str, data_url: &str) -> bool {
        let Some(target) = image_target(target) else {
            return false;
        };
        let upload = ImageUpload {
            file_name: file_name.to_string(),
            mime: mime.to_string(),
            data: ImageRef::new(data_url),
        };
        self.session
            .complete_image_load(target, Ok(upload))
            .unwrap_or(false)
    }

    pub fn image_failed(&mut self, target: &str, file_name: &str) {
        if let Some(target) = image_target(target) {
            let _ = self
                .session
                .complete_image_load(target, Err(AssetError::Read(file_name.to_string())));
        }
    }

    /// A `FontFace` finished loading. Returns the family to use, or an
    /// empty string if the file was rejected.
    pub fn font_loaded(&mut self, file_name: &str, url: &str) -> String {
        self.session
            .complete_font_load(file_name, Ok(url.to_string()))
            .unwrap_or_default()
    }

    pub fn font_failed(&mut self, file_name: &str) {
        let _ = self.session.complete_font_load(file_name, Err(AssetError::FontLoad));
    }

    /// Check a font file name before the host starts loading it.
    pub fn font_family_for(&self, file_name: &str) -> String {
        card_editor::assets::font_family_for(file_name).unwrap_or_default()
    }

    // ─── Persistence and export ──────────────────────────────────────────

    /// Save the card. Returns the saved id, or an empty string on failure.
    pub fn save(&mut self) -> String {
        self.session.save(&mut self.store).unwrap_or_default()
    }

    pub fn list_saved_json(&self) -> String {
        match self.store.list() {
            Ok(designs) => to_json(&designs, "[]"),
            Err(e) => {
                log::warn!("listing saved designs failed: {e}");
                "[]".to_string()
            }
        }
    }

    pub fn delete_saved(&mut self, id: &str) -> bool {
        self.store.delete(id)
    }

    pub fn suggested_filename(&self, extension: &str) -> String {
        self.session.suggested_filename(extension)
    }

    /// Pending notifications as JSON `[{"severity":..,"message":..}]`; clears them.
    pub fn take_notifications(&mut self) -> String {
        to_json(&self.session.drain_notifications(), "[]")
    }
}

impl CardCanvas {
    fn pointer(&mut self, event: PointerEvent) -> bool {
        match self.session.pointer(event) {
            Ok(changed) => changed,
            Err(e) => {
                log::warn!("pointer {event:?}: {e}");
                false
            }
        }
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────

fn parse_json<T: DeserializeOwned>(json: &str) -> Option<T> {
    match serde_json::from_str(json) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("bad JSON from host: {e}");
            None
        }
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| fallback.to_string())
}

/// Parse a serde unit-variant enum from its wire name.
fn enum_from_name<T: DeserializeOwned>(name: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(name.to_string())).ok()
}

fn image_target(name: &str) -> Option<ImageTarget> {
    match name {
        "element" => Some(ImageTarget::Element),
        "background" => Some(ImageTarget::SceneBackground),
        "art-text-background" => Some(ImageTarget::ArtTextBackground),
        _ => None,
    }
}

/// Map a panel control to an edit. Empty strings clear optional effects.
fn property_edit(key: &str, value: &str) -> Option<PropertyEdit> {
    let number = || value.trim().parse::<f32>().ok();
    let optional = || (!value.trim().is_empty()).then(|| value.to_string());
    let edit = match key {
        "width" => PropertyEdit::Width(number()?),
        "height" => PropertyEdit::Height(number()?),
        "radius" => PropertyEdit::Radius(number()?),
        "fontSize" => PropertyEdit::FontSize(number()?),
        "opacity" => PropertyEdit::Opacity(number()?),
        "glowBlur" => PropertyEdit::GlowBlur(number()?),
        "color" => PropertyEdit::Color(Color::parse(value).ok()?),
        "animation" => PropertyEdit::Animation(enum_from_name::<Animation>(value)?),
        "background" => PropertyEdit::Background(Fill::parse(value).ok()?),
        "textShadow" => PropertyEdit::TextShadow(optional()),
        "filter" => PropertyEdit::Filter(optional()),
        "transform" => PropertyEdit::Transform(optional()),
        "letterSpacing" => PropertyEdit::LetterSpacing(value.to_string()),
        "textAlign" => PropertyEdit::TextAlign(value.to_string()),
        "textDecoration" => PropertyEdit::TextDecoration(value.to_string()),
        _ => return None,
    };
    Some(edit)
}

fn action_to_name(action: ShortcutAction) -> &'static str {
    match action {
        ShortcutAction::Undo => "undo",
        ShortcutAction::Redo => "redo",
        ShortcutAction::Delete => "delete",
        ShortcutAction::BringForward => "bringForward",
        ShortcutAction::SendBackward => "sendBackward",
        ShortcutAction::BringToFront => "bringToFront",
        ShortcutAction::SendToBack => "sendToBack",
        ShortcutAction::Deselect => "deselect",
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("card canvas panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
