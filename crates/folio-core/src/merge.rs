use std::collections::HashMap;

use crate::equality::ShallowEq;
use crate::value::ContentKey;

/// Anything addressable by a content key.
pub trait Keyed {
    fn key(&self) -> ContentKey;
}

/// Reconcile `next` against `prev` by key: wherever `prev` holds a
/// shallow-equal item under the same key, the previous item is substituted
/// so its identity survives. Output order is `next`'s order; `prev`'s order
/// never matters.
pub fn merge_by_key<T>(prev: &[T], next: Vec<T>) -> Vec<T>
where
    T: Keyed + ShallowEq + Clone,
{
    if prev.is_empty() || next.is_empty() {
        return next;
    }
    let by_key: HashMap<String, &T> = prev
        .iter()
        .map(|item| (item.key().canonical(), item))
        .collect();
    next.into_iter()
        .map(|item| match by_key.get(&item.key().canonical()) {
            Some(old) if old.shallow_eq(&item) => (*old).clone(),
            _ => item,
        })
        .collect()
}

/// Positional pairwise comparison, independent of keys.
pub fn arrays_with_key_equal<T: ShallowEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.shallow_eq(y))
}
