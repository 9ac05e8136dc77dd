use std::collections::HashMap;

use crate::equality::ShallowEq;

/// Keyed store that preserves reference identity across generations.
///
/// `get_or_set` is the whole point: when the caller rebuilds a value that is
/// shallow-equal to the one already stored, the *stored* value comes back, so
/// downstream consumers keep seeing the same identity no matter how many
/// times the caller reconstructs logically-unchanged content.
///
/// One cache per key domain; the key space is the canonical string form, so
/// `ContentKey::Num(3)` and `ContentKey::Str("3")` land in the same slot.
pub struct StableCache<V> {
    slots: HashMap<String, V>,
}

impl<V> Default for StableCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> StableCache<V> {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.slots.get(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop every entry. Called at scope teardown so a new scope instance
    /// never observes identities from a previous one.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<V: ShallowEq + Clone> StableCache<V> {
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        self.slots.insert(key.into(), value);
    }

    /// Return the stored value if it is shallow-equal to `value`; otherwise
    /// store `value` under `key` and return it.
    pub fn get_or_set(&mut self, key: &str, value: V) -> V {
        if let Some(existing) = self.slots.get(key)
            && existing.shallow_eq(&value)
        {
            return existing.clone();
        }
        self.slots.insert(key.to_string(), value.clone());
        value
    }
}
