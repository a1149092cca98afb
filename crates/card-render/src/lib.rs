pub mod hit;
pub mod paint;

pub use hit::{HANDLE_RADIUS, Handle, HitPart, hit_test};
pub use paint::{PaintItem, PaintKind, paint_scene};
