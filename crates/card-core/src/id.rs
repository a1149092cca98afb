use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for element IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Stable identity of an element on the card.
///
/// Internally a `Spur` index: 4 bytes, Copy, Eq, Hash in O(1). Generated
/// ids are never handed out twice in one process, so a glow keyframe name
/// derived from a deleted element can't collide with a new one.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Spur);

impl ElementId {
    /// Intern a string as an ElementId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        ElementId(INTERNER.get_or_intern(s))
    }

    /// The id for `s` if one was ever interned. Never interns.
    pub fn lookup(s: &str) -> Option<Self> {
        INTERNER.get(s).map(ElementId)
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a fresh id of the form `{prefix}-{unix millis}-{random}`.
    pub fn generate(prefix: &str) -> Self {
        let millis = now_millis();
        loop {
            let suffix = uuid::Uuid::new_v4().simple().to_string();
            let candidate = format!("{prefix}-{millis}-{}", &suffix[..9]);
            if !INTERNER.contains(&candidate) {
                return Self::intern(&candidate);
            }
        }
    }
}

/// Milliseconds since the Unix epoch.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> u64 {
    js_sys::Date::now() as u64
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ElementId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = ElementId::intern("art-text-1");
        let b = ElementId::intern("art-text-1");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "art-text-1");
    }

    #[test]
    fn lookup_does_not_intern() {
        assert_eq!(ElementId::lookup("text-0-unknown"), None);
        assert_eq!(ElementId::lookup("text-0-unknown"), None);
        assert!(!INTERNER.contains("text-0-unknown"));

        let id = ElementId::intern("text-0-known");
        assert_eq!(ElementId::lookup("text-0-known"), Some(id));
    }

    #[test]
    fn generated_ids_are_unique() {
        let ids: Vec<_> = (0..64).map(|_| ElementId::generate("shape")).collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn generated_id_shape() {
        let id = ElementId::generate("art-text");
        let rest = id.as_str().strip_prefix("art-text-").unwrap();
        let (millis, suffix) = rest.split_once('-').unwrap();
        assert!(millis.parse::<u64>().is_ok());
        assert_eq!(suffix.len(), 9);
    }
}
