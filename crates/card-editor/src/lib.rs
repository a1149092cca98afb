pub mod assets;
pub mod history;
pub mod input;
pub mod interaction;
pub mod notify;
pub mod panel;
pub mod session;
pub mod shortcuts;
pub mod store;
pub mod templates;

pub use assets::{FontFace, ImageUpload};
pub use history::History;
pub use input::PointerEvent;
pub use interaction::{Gesture, GestureEnd, Interaction};
pub use notify::{Notification, Severity};
pub use panel::PropertyEdit;
pub use session::{EditorSession, ImageTarget};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use store::{DesignStore, MemoryStore, SavedDesign};
pub use templates::{SceneSource, TemplateCatalog, TemplateSource};
