//! Editor session: the single owner of the live scene.
//!
//! Every edit follows the same path: build the next scene, make it live,
//! record it in history. Gestures are the one exception: pointer moves
//! mutate the live scene in place, and only pointer-up records.
//!
//! Failures never escape as panics or half-applied edits. The scene is
//! left as it was and a notification is queued for the host.

use crate::assets::{FontFace, ImageUpload, font_family_for};
use crate::history::History;
use crate::input::PointerEvent;
use crate::interaction::{GestureEnd, Interaction};
use crate::notify::Notification;
use crate::panel::{PropertyEdit, sanitize_patch, validate_edit};
use crate::shortcuts::ShortcutAction;
use crate::store::DesignStore;
use crate::templates::{SceneSource, TemplateSource};
use card_core::style::{derive_glow_keyframes, display_color, text_apply_patch};
use card_core::{
    ArtTextPreset, AssetError, CardError, EditorConfig, Element, ElementId, ElementKind,
    ElementPatch, Fill, Result, Scene, ShapeKind, TextInput, ZMove, add_element,
    create_art_text, create_image, create_shape, create_text, delete_element, update_element,
    zorder,
};
use card_render::{HitPart, PaintItem, hit_test, paint_scene};

/// Where a finished image upload goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTarget {
    /// A new image element.
    Element,
    /// The card background.
    SceneBackground,
    /// The selected art-text element's clipped background.
    ArtTextBackground,
}

pub struct EditorSession {
    scene: Scene,
    history: History,
    interaction: Interaction,
    /// Tracked by identity so deletes and reorders can't shift it.
    selected: Option<ElementId>,
    config: EditorConfig,
    fonts: Vec<FontFace>,
    notifications: Vec<Notification>,
}

impl EditorSession {
    /// A session on a blank card.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_scene(Scene::blank(), config)
    }

    pub fn with_scene(scene: Scene, config: EditorConfig) -> Self {
        let config = config.normalized();
        Self {
            history: History::new(&scene, config.history_limit),
            interaction: Interaction::new(config.canvas, config.cancel_policy),
            scene,
            selected: None,
            config,
            fonts: Vec::new(),
            notifications: Vec::new(),
        }
    }

    // ─── Loading ─────────────────────────────────────────────────────────

    /// Replace the working scene from a template, a saved design, or blank.
    /// Misses fall back to the blank card.
    pub fn load(
        &mut self,
        source: &SceneSource,
        templates: &dyn TemplateSource,
        store: &dyn DesignStore,
    ) {
        let found = match source {
            SceneSource::Blank => Some(Scene::blank()),
            SceneSource::Template(id) => templates.lookup(id),
            SceneSource::Saved(id) => match store.get(id) {
                Ok(design) => design.map(|d| d.scene),
                Err(e) => {
                    log::warn!("loading saved design {id} failed: {e}");
                    None
                }
            },
        };
        let scene = found.unwrap_or_else(|| {
            log::warn!("{source:?} not found; starting from a blank card");
            Scene::blank()
        });
        self.replace(scene);
    }

    /// Make `scene` the working scene and seed history with it.
    pub fn replace(&mut self, scene: Scene) {
        log::debug!("session: loaded {:?} ({} elements)", scene.id, scene.len());
        self.scene = scene;
        self.history.reset(&self.scene);
        self.interaction.reset();
        self.selected = None;
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.scene.index_of(self.selected?)
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.scene.get_by_id(self.selected?)
    }

    pub fn fonts(&self) -> &[FontFace] {
        &self.fonts
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn commit(&mut self, next: Scene) {
        self.scene = next;
        self.history.record(&self.scene);
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.notifications.push(Notification::success(message));
    }

    /// Queue an error notification and hand the error back.
    fn fail<T>(&mut self, err: CardError) -> Result<T> {
        log::warn!("{err}");
        self.notifications.push(Notification::error(err.to_string()));
        Err(err)
    }

    fn add(&mut self, el: Element, message: impl Into<String>) -> ElementId {
        let id = el.id;
        log::debug!("add {} {id}", el.tag());
        let next = add_element(&self.scene, el);
        self.commit(next);
        self.notify(message);
        id
    }

    // ─── Adding elements ─────────────────────────────────────────────────

    pub fn add_text(&mut self) -> ElementId {
        self.add(create_text(), "Text element added")
    }

    pub fn add_art_text(&mut self, preset: ArtTextPreset) -> ElementId {
        self.add(create_art_text(preset), "Art text added")
    }

    /// Add art text from a named preset, or the default style when the
    /// preset is unknown.
    pub fn add_art_text_from(&mut self, templates: &dyn TemplateSource, id: &str) -> ElementId {
        let preset = templates.art_text_preset(id).unwrap_or_else(|| {
            log::warn!("art text preset {id} not found; using default");
            ArtTextPreset::default()
        });
        self.add_art_text(preset)
    }

    pub fn add_shape(&mut self, kind: ShapeKind) -> ElementId {
        self.add(create_shape(kind), format!("{} shape added", kind.label()))
    }

    // ─── Async load completions ──────────────────────────────────────────

    /// Apply a finished image read. Returns whether the scene changed.
    pub fn complete_image_load(
        &mut self,
        target: ImageTarget,
        result: std::result::Result<ImageUpload, AssetError>,
    ) -> Result<bool> {
        let image = match result.and_then(ImageUpload::validate) {
            Ok(image) => image,
            Err(e) => return self.fail(e.into()),
        };

        match target {
            ImageTarget::Element => {
                self.add(create_image(image), "Image added");
            }
            ImageTarget::SceneBackground => {
                let mut next = self.scene.clone();
                next.background_image = Some(image);
                self.commit(next);
                self.notify("Background image uploaded successfully!");
            }
            ImageTarget::ArtTextBackground => {
                let Some(index) = self.selected_index() else {
                    return Ok(false);
                };
                if !matches!(self.scene.elements[index].kind, ElementKind::ArtText { .. }) {
                    return Ok(false);
                }
                let patch = ElementPatch {
                    background_image: Some(Some(image)),
                    ..ElementPatch::default()
                };
                let next = update_element(&self.scene, index, &patch)?;
                self.commit(next);
                self.notify("Background image uploaded successfully!");
            }
        }
        Ok(true)
    }

    /// Register a finished font load. Returns the family name to use.
    pub fn complete_font_load(
        &mut self,
        file_name: &str,
        result: std::result::Result<String, AssetError>,
    ) -> Result<String> {
        let loaded = font_family_for(file_name).and_then(|family| result.map(|url| (family, url)));
        let (family, url) = match loaded {
            Ok(pair) => pair,
            Err(e) => return self.fail(e.into()),
        };
        self.fonts.push(FontFace {
            family: family.clone(),
            file_name: file_name.to_string(),
            url,
        });
        self.notify(format!("Font \"{file_name}\" uploaded successfully!"));
        Ok(family)
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Select an element by id; unknown ids clear the selection.
    pub fn select(&mut self, id: Option<ElementId>) -> bool {
        self.selected = id.filter(|id| self.scene.index_of(*id).is_some());
        self.selected.is_some()
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        let id = self.scene.get(index).map(|e| e.id);
        self.select(id)
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Values the text panel shows for the selected text element.
    pub fn text_panel(&self) -> Option<TextInput> {
        let el = self.selected_element()?;
        let text = el.text_style()?;
        Some(TextInput {
            content: text.content.clone(),
            font_size: text.font_size,
            font_family: text.font_family.clone(),
            color: display_color(el)?,
            bold: text.bold,
            italic: text.italic,
        })
    }

    // ─── Property edits ──────────────────────────────────────────────────

    /// Apply one property-panel edit to the selected element as one
    /// history step. Out-of-range numbers are clamped; non-numbers rejected.
    pub fn edit_selected(&mut self, edit: PropertyEdit) -> Result<bool> {
        let Some(index) = self.selected_index() else {
            return Ok(false);
        };
        let el = &self.scene.elements[index];
        let patch = match validate_edit(el, edit, &self.config.limits, &self.config.canvas) {
            Ok(patch) => patch,
            Err(e) => return self.fail(e),
        };
        let next = update_element(&self.scene, index, &patch)?;
        self.commit(next);
        Ok(true)
    }

    /// The text panel's "apply": content, font and color in one step, with
    /// shadow and filter colors kept consistent.
    pub fn apply_text(&mut self, input: TextInput) -> Result<bool> {
        let Some(index) = self.selected_index() else {
            return Ok(false);
        };
        let el = &self.scene.elements[index];
        if el.text_style().is_none() {
            return Ok(false);
        }
        let patch = text_apply_patch(el, &input);
        let patch = match sanitize_patch(el, patch, &self.config.limits, &self.config.canvas) {
            Ok(patch) => patch,
            Err(e) => return self.fail(e),
        };
        let next = update_element(&self.scene, index, &patch)?;
        self.commit(next);
        Ok(true)
    }

    // ─── Delete and z-order ──────────────────────────────────────────────

    pub fn delete_selected(&mut self) -> Result<bool> {
        let Some(index) = self.selected_index() else {
            return Ok(false);
        };
        let next = delete_element(&self.scene, index)?;
        self.commit(next);
        self.selected = None;
        self.notify("Element deleted");
        Ok(true)
    }

    /// Reorder the selected element. Selection follows it.
    pub fn reorder_selected(&mut self, op: ZMove) -> Result<bool> {
        let Some(index) = self.selected_index() else {
            return Ok(false);
        };
        match zorder::reorder(&self.scene, index, op)? {
            Some(moved) => {
                self.commit(moved.scene);
                self.notify(op.message());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ─── History ─────────────────────────────────────────────────────────

    fn restore(&mut self, scene: Scene) {
        self.scene = scene;
        self.interaction.reset();
        if let Some(id) = self.selected
            && self.scene.index_of(id).is_none()
        {
            self.selected = None;
        }
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(scene) => {
                self.restore(scene);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(scene) => {
                self.restore(scene);
                true
            }
            None => false,
        }
    }

    // ─── Background ──────────────────────────────────────────────────────

    /// Set the card background. Clears any background image.
    pub fn change_background(&mut self, fill: Fill) {
        let mut next = self.scene.clone();
        next.background = fill;
        next.background_image = None;
        self.commit(next);
    }

    pub fn remove_background_image(&mut self) {
        let mut next = self.scene.clone();
        next.background_image = None;
        self.commit(next);
        self.notify("Background image removed");
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Feed one pointer event. Returns whether the scene or selection changed.
    pub fn pointer(&mut self, event: PointerEvent) -> Result<bool> {
        match event {
            PointerEvent::Down { x, y } => {
                let before = self.selected;
                match hit_test(&self.scene, self.selected, x, y) {
                    Some(HitPart::Handle { index, id, handle }) => {
                        self.selected = Some(id);
                        self.interaction
                            .begin_resize(&self.scene.elements[index], handle, x, y);
                    }
                    Some(HitPart::Body { index, id }) => {
                        self.selected = Some(id);
                        self.interaction.begin_drag(&self.scene.elements[index], x, y);
                    }
                    None => self.selected = None,
                }
                Ok(before != self.selected)
            }
            PointerEvent::Move { x, y } => self.interaction.pointer_move(&mut self.scene, x, y),
            PointerEvent::Up { .. } => {
                let end = self.interaction.pointer_up();
                Ok(self.finish(end))
            }
            PointerEvent::Cancel => {
                let end = self.interaction.cancel(&mut self.scene);
                Ok(self.finish(end))
            }
        }
    }

    /// Close out a gesture. A commit is the gesture's single history step.
    fn finish(&mut self, end: GestureEnd) -> bool {
        match end {
            GestureEnd::Commit => {
                self.history.record(&self.scene);
                true
            }
            GestureEnd::Discard => true,
            GestureEnd::None => false,
        }
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    pub fn dispatch(&mut self, action: ShortcutAction) -> Result<bool> {
        match action {
            ShortcutAction::Undo => Ok(self.undo()),
            ShortcutAction::Redo => Ok(self.redo()),
            ShortcutAction::Delete => self.delete_selected(),
            ShortcutAction::BringForward => self.reorder_selected(ZMove::Forward),
            ShortcutAction::SendBackward => self.reorder_selected(ZMove::Backward),
            ShortcutAction::BringToFront => self.reorder_selected(ZMove::ToFront),
            ShortcutAction::SendToBack => self.reorder_selected(ZMove::ToBack),
            ShortcutAction::Deselect => {
                let had = self.selected.take().is_some();
                Ok(had)
            }
        }
    }

    // ─── Presentation ────────────────────────────────────────────────────

    /// Keyframe CSS for every glowing art-text element.
    pub fn glow_styles(&self) -> String {
        derive_glow_keyframes(&self.scene.elements)
    }

    pub fn display_list(&self) -> Vec<PaintItem> {
        paint_scene(&self.scene, self.selected)
    }

    // ─── Persistence and export ──────────────────────────────────────────

    /// Save the live scene. Returns the saved id for navigation; on failure
    /// nothing changes and an error notification is queued.
    pub fn save(&mut self, store: &mut dyn DesignStore) -> Option<String> {
        match store.save(&self.scene) {
            Ok(design) => {
                self.notify("Design saved successfully!");
                Some(design.id)
            }
            Err(e) => {
                log::warn!("save failed: {e}");
                self.notifications.push(Notification::error("Failed to save design"));
                None
            }
        }
    }

    /// File name offered for an export, e.g. `Birthday.pdf`.
    pub fn suggested_filename(&self, extension: &str) -> String {
        let name = self.scene.name.trim();
        let stem = if name.is_empty() { "card" } else { name };
        format!("{stem}.{extension}")
    }
}
