//! Mapping between datastore keys and flat object paths.

use s3ds_core::{key::DELIMITER, Key};

/// Translates keys to object paths scoped under a bucket "folder" and back.
///
/// The object path of a key is the folder followed by the key, without a leading delimiter:
/// key `/a/b` under folder `data` lives at `data/a/b`. [`KeyMapper::key`] is the exact inverse
/// of [`KeyMapper::object_path`] for every path the latter produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMapper {
    prefix: String,
}

impl KeyMapper {
    pub fn new(prefix: impl AsRef<str>) -> Self {
        Self {
            prefix: prefix.as_ref().trim_matches('/').to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn object_path(&self, key: &Key) -> String {
        self.join(key.as_str())
    }

    /// Scopes a raw query prefix, keeping a trailing delimiter intact.
    ///
    /// A prefix without a leading delimiter is treated as if it had one, so that it never leaks
    /// into sibling folders of the configured scope.
    pub fn listing_prefix(&self, prefix: &str) -> String {
        if prefix.starts_with(DELIMITER) {
            self.join(prefix)
        } else {
            self.join(&format!("{DELIMITER}{prefix}"))
        }
    }

    pub fn key(&self, object_path: &str) -> Key {
        Key::new(object_path.strip_prefix(&self.prefix).unwrap_or(object_path))
    }

    fn join(&self, path: &str) -> String {
        let mut joined = String::with_capacity(self.prefix.len() + path.len());
        joined.push_str(&self.prefix);
        joined.push_str(path);
        joined.trim_start_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [&str; 6] = ["/", "/a", "/a/b", "/a/b/c", "/file.json", "/x y/z"];

    #[test]
    fn object_path_without_prefix() {
        let mapper = KeyMapper::default();
        assert_eq!(mapper.object_path(&Key::new("/a/b")), "a/b");
        assert_eq!(mapper.object_path(&Key::root()), "");
    }

    #[test]
    fn object_path_with_prefix() {
        let mapper = KeyMapper::new("/folder/sub/");
        assert_eq!(mapper.prefix(), "folder/sub");
        assert_eq!(mapper.object_path(&Key::new("/a/b")), "folder/sub/a/b");
    }

    #[test]
    fn round_trip() {
        for prefix in ["", "folder", "folder/sub", "/padded/"] {
            let mapper = KeyMapper::new(prefix);
            for key in KEYS.map(Key::new) {
                assert_eq!(
                    mapper.key(&mapper.object_path(&key)),
                    key,
                    "prefix {prefix:?}"
                );
            }
        }
    }

    #[test]
    fn listing_prefix_keeps_trailing_delimiter() {
        let mapper = KeyMapper::new("folder");
        assert_eq!(mapper.listing_prefix("/a/"), "folder/a/");
        assert_eq!(mapper.listing_prefix("/a"), "folder/a");
        assert_eq!(mapper.listing_prefix("a/"), "folder/a/");
        assert_eq!(mapper.listing_prefix(""), "folder/");

        let mapper = KeyMapper::default();
        assert_eq!(mapper.listing_prefix("/a/"), "a/");
        assert_eq!(mapper.listing_prefix(""), "");
    }
}
