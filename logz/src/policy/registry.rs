//! The field-name to masker lookup table.

use std::{collections::HashMap, fmt};

use super::mask::Masker;

/// Maps lower-cased field names to the masker applied to their values.
///
/// Registration takes `&mut self` and redaction takes `&self`, so a registry
/// is populated first and then shared (by reference, `Arc` or clone) with any
/// number of readers. Cloning is cheap: maskers are reference counted.
#[derive(Clone, Default)]
pub struct MaskRegistry {
    maskers: HashMap<String, Masker>,
}

impl MaskRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single masker and returns the registry.
    #[must_use]
    pub fn with<K, M>(mut self, key: K, masker: M) -> Self
    where
        K: AsRef<str>,
        M: Into<Masker>,
    {
        self.insert(key, masker);
        self
    }

    /// Merges `entries` into the registry.
    ///
    /// Keys are lower-cased before insertion and existing keys are
    /// overwritten.
    pub fn register<I, K, M>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, M)>,
        K: AsRef<str>,
        M: Into<Masker>,
    {
        for (key, masker) in entries {
            self.insert(key, masker);
        }
    }

    fn insert<K, M>(&mut self, key: K, masker: M)
    where
        K: AsRef<str>,
        M: Into<Masker>,
    {
        self.maskers
            .insert(key.as_ref().to_lowercase(), masker.into());
    }

    /// Looks up the masker for `key`, ignoring case.
    pub fn get(&self, key: &str) -> Option<&Masker> {
        self.maskers.get(&key.to_lowercase())
    }

    /// Returns `true` if a masker is registered for `key`, ignoring case.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Applies the masker registered for `key` to `value`, if any.
    pub fn mask_field(&self, key: &str, value: &str) -> Option<String> {
        self.get(key).map(|masker| masker.apply(value))
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.maskers.len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.maskers.is_empty()
    }

    /// Iterates over the registered (lower-cased) keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.maskers.keys().map(String::as_str)
    }
}

impl fmt::Debug for MaskRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("MaskRegistry").field("keys", &keys).finish()
    }
}

impl<K, M> Extend<(K, M)> for MaskRegistry
where
    K: AsRef<str>,
    M: Into<Masker>,
{
    fn extend<I: IntoIterator<Item = (K, M)>>(&mut self, entries: I) {
        self.register(entries);
    }
}

impl<K, M> FromIterator<(K, M)> for MaskRegistry
where
    K: AsRef<str>,
    M: Into<Masker>,
{
    fn from_iter<I: IntoIterator<Item = (K, M)>>(entries: I) -> Self {
        let mut registry = Self::new();
        registry.register(entries);
        registry
    }
}
