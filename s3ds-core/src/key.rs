//! Hierarchical datastore keys.

use std::fmt::Formatter;

/// The delimiter separating key namespaces.
pub const DELIMITER: &str = "/";

/// A slash-delimited, canonical datastore key such as `/a/b/c`.
///
/// Keys always start with [`DELIMITER`] and never end with one, except for the root key `/`.
/// Empty and `.` segments are dropped and `..` removes the preceding segment, so two keys are
/// equal iff they name the same location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct Key {
    raw: String,
}

impl Default for Key {
    fn default() -> Self {
        Self::root()
    }
}

impl Key {
    pub fn new(key: impl AsRef<str>) -> Self {
        let key = key.as_ref();
        let mut segments: Vec<&str> = Vec::new();
        for segment in key.split(DELIMITER) {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                segment => segments.push(segment),
            }
        }

        if segments.is_empty() {
            return Self::root();
        }

        let mut raw = String::with_capacity(key.len() + 1);
        for segment in segments {
            raw.push_str(DELIMITER);
            raw.push_str(segment);
        }
        Self { raw }
    }

    pub fn root() -> Self {
        Self {
            raw: DELIMITER.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_root(&self) -> bool {
        self.raw == DELIMITER
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.raw.split(DELIMITER).filter(|s| !s.is_empty())
    }

    /// The last namespace of the key, empty for the root.
    pub fn name(&self) -> &str {
        self.namespaces().last().unwrap_or("")
    }

    pub fn parent(&self) -> Self {
        match self.raw.rfind(DELIMITER) {
            Some(0) | None => Self::root(),
            Some(idx) => Self {
                raw: self.raw[..idx].to_string(),
            },
        }
    }

    pub fn child(&self, child: impl AsRef<str>) -> Self {
        Self::new(format!("{}{}{}", self.raw, DELIMITER, child.as_ref()))
    }

    pub fn is_ancestor_of(&self, other: &Key) -> bool {
        if self.is_root() {
            return !other.is_root();
        }
        other
            .raw
            .strip_prefix(&self.raw)
            .is_some_and(|rest| rest.starts_with(DELIMITER))
    }

    pub fn is_descendant_of(&self, other: &Key) -> bool {
        other.is_ancestor_of(self)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.raw
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.raw.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form() {
        assert_eq!(Key::new("").as_str(), "/");
        assert_eq!(Key::new("/").as_str(), "/");
        assert_eq!(Key::new("a").as_str(), "/a");
        assert_eq!(Key::new("/a/b/").as_str(), "/a/b");
        assert_eq!(Key::new("//a///b").as_str(), "/a/b");
        assert_eq!(Key::new("/a/./b/../c").as_str(), "/a/c");
        assert_eq!(Key::new("/../..").as_str(), "/");
    }

    #[test]
    fn equality_follows_canonical_form() {
        assert_eq!(Key::new("a/b"), Key::new("/a/b/"));
        assert_ne!(Key::new("/a/b"), Key::new("/a/bc"));
    }

    #[test]
    fn name_and_parent() {
        let key = Key::new("/a/b/c");
        assert_eq!(key.name(), "c");
        assert_eq!(key.parent(), Key::new("/a/b"));
        assert_eq!(Key::new("/a").parent(), Key::root());
        assert_eq!(Key::root().parent(), Key::root());
        assert_eq!(Key::root().name(), "");
    }

    #[test]
    fn child_and_namespaces() {
        let key = Key::new("/a").child("b").child("c");
        assert_eq!(key.as_str(), "/a/b/c");
        assert_eq!(key.namespaces().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(Key::root().child("x").as_str(), "/x");
        assert_eq!(Key::root().namespaces().count(), 0);
    }

    #[test]
    fn ancestry() {
        let a = Key::new("/a");
        let ab = Key::new("/a/b");
        let abc = Key::new("/abc");

        assert!(a.is_ancestor_of(&ab));
        assert!(ab.is_descendant_of(&a));
        assert!(!a.is_ancestor_of(&abc));
        assert!(!a.is_ancestor_of(&a));
        assert!(Key::root().is_ancestor_of(&a));
        assert!(!Key::root().is_ancestor_of(&Key::root()));
    }
}
