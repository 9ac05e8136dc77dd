#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::cache::StableCache;
    use crate::equality::ShallowEq;
    use crate::merge::{Keyed, arrays_with_key_equal, merge_by_key};
    use crate::value::{Callback, ContentKey, NamedMap, Value};

    fn noop(name: &str, source: &str) -> Callback {
        Callback::new(name, source, |_| Value::Null)
    }

    #[test]
    fn test_primitive_equality() {
        assert!(Value::Null.shallow_eq(&Value::Null));
        assert!(Value::Int(3).shallow_eq(&Value::Int(3)));
        assert!(!Value::Int(3).shallow_eq(&Value::Int(4)));
        assert!(Value::str("a").shallow_eq(&Value::str("a")));
        assert!(!Value::Null.shallow_eq(&Value::Int(0)));
        // One number type in the source model: int and float unify.
        assert!(Value::Int(2).shallow_eq(&Value::Float(2.0)));
        assert!(!Value::Int(2).shallow_eq(&Value::Float(2.5)));
        assert!(!Value::Float(f64::NAN).shallow_eq(&Value::Float(f64::NAN)));
    }

    #[test]
    fn test_callback_equality_by_name_and_source() {
        let a = noop("submit", "fn submit()");
        let b = noop("submit", "fn submit()");
        let c = noop("submit", "fn submit() { different }");
        let d = noop("cancel", "fn submit()");

        assert!(Value::Callback(a.clone()).shallow_eq(&Value::Callback(b)));
        assert!(!Value::Callback(a.clone()).shallow_eq(&Value::Callback(c)));
        assert!(!Value::Callback(a.clone()).shallow_eq(&Value::Callback(d)));
        // Identical handle is equal regardless of metadata.
        assert!(Value::Callback(a.clone()).shallow_eq(&Value::Callback(a)));
    }

    #[test]
    fn test_map_equality_is_one_level_deep() {
        let nested = Rc::new(NamedMap::from_iter([("x", Value::Int(1))]));

        let a: NamedMap = [
            ("n", Value::Int(1)),
            ("s", Value::str("hi")),
            ("m", Value::Map(nested.clone())),
        ]
        .into_iter()
        .collect();
        let b: NamedMap = [
            ("n", Value::Int(1)),
            ("s", Value::str("hi")),
            ("m", Value::Map(nested)),
        ]
        .into_iter()
        .collect();
        assert!(a.shallow_eq(&b));

        // Same contents in a *different* nested allocation: unequal, the
        // nested level compares by reference only.
        let other = Rc::new(NamedMap::from_iter([("x", Value::Int(1))]));
        let c: NamedMap = [
            ("n", Value::Int(1)),
            ("s", Value::str("hi")),
            ("m", Value::Map(other)),
        ]
        .into_iter()
        .collect();
        assert!(!a.shallow_eq(&c));

        // Key-set mismatch.
        let d: NamedMap = [("n", Value::Int(1))].into_iter().collect();
        assert!(!a.shallow_eq(&d));
    }

    #[test]
    fn test_opaque_is_only_equal_to_itself() {
        let a = Value::opaque(42u32);
        let b = Value::opaque(42u32);
        assert!(a.shallow_eq(&a.clone()));
        assert!(!a.shallow_eq(&b));
        assert!(!a.shallow_eq(&Value::Int(42)));
    }

    #[test]
    fn test_cache_preserves_identity_for_equal_values() {
        let mut cache = StableCache::new();

        let first = cache.get_or_set("hero", Value::list(vec![Value::Int(1), Value::str("t")]));
        // Fresh allocation, same shallow contents.
        let second = cache.get_or_set("hero", Value::list(vec![Value::Int(1), Value::str("t")]));
        assert!(first.same_ref(&second));

        // Changed contents replace the slot.
        let third = cache.get_or_set("hero", Value::list(vec![Value::Int(2), Value::str("t")]));
        assert!(!first.same_ref(&third));
        // And the new identity sticks.
        let fourth = cache.get_or_set("hero", Value::list(vec![Value::Int(2), Value::str("t")]));
        assert!(third.same_ref(&fourth));
    }

    #[test]
    fn test_cache_numeric_and_string_keys_collide() {
        let mut cache = StableCache::new();
        cache.set(ContentKey::Num(3).canonical(), Value::Int(7));
        assert!(cache.get(&ContentKey::Str("3".into()).canonical()).is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_clear() {
        let mut cache = StableCache::new();
        cache.set("a", Value::Int(1));
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.get("a").is_none());
        assert!(cache.is_empty());
    }

    #[derive(Clone, Debug)]
    struct Item {
        key: i64,
        val: Value,
    }

    impl Keyed for Item {
        fn key(&self) -> ContentKey {
            ContentKey::Num(self.key)
        }
    }

    impl ShallowEq for Item {
        fn shallow_eq(&self, other: &Self) -> bool {
            self.key == other.key && self.val.shallow_eq(&other.val)
        }
    }

    #[test]
    fn test_merge_empty_sides() {
        let prev = vec![Item {
            key: 1,
            val: Value::str("x"),
        }];
        let next = vec![Item {
            key: 2,
            val: Value::str("y"),
        }];

        let merged = merge_by_key(&[], next.clone());
        assert_eq!(merged.len(), 1);
        assert!(merged[0].val.same_ref(&next[0].val));

        assert!(merge_by_key(&prev, Vec::<Item>::new()).is_empty());
    }

    #[test]
    fn test_merge_substitutes_unchanged_prev_items() {
        let shared = Value::list(vec![Value::str("x")]);
        let prev = vec![Item {
            key: 1,
            val: shared.clone(),
        }];
        let next = vec![
            Item {
                key: 1,
                val: Value::list(vec![Value::str("x")]),
            },
            Item {
                key: 2,
                val: Value::str("y"),
            },
        ];

        let merged = merge_by_key(&prev, next);
        assert_eq!(merged.len(), 2);
        // Item 1 is the previous item, identity preserved.
        assert!(merged[0].val.same_ref(&shared));
        // Item 2 is the fresh item.
        assert!(merged[1].val.shallow_eq(&Value::str("y")));
    }

    #[test]
    fn test_merge_output_order_comes_from_next() {
        let prev = vec![
            Item {
                key: 1,
                val: Value::Int(1),
            },
            Item {
                key: 2,
                val: Value::Int(2),
            },
        ];
        let next = vec![
            Item {
                key: 2,
                val: Value::Int(2),
            },
            Item {
                key: 1,
                val: Value::Int(1),
            },
        ];
        let merged = merge_by_key(&prev, next);
        assert_eq!(merged[0].key, 2);
        assert_eq!(merged[1].key, 1);
    }

    #[test]
    fn test_arrays_with_key_equal_is_positional() {
        let a = vec![
            Item {
                key: 1,
                val: Value::Int(1),
            },
            Item {
                key: 2,
                val: Value::Int(2),
            },
        ];
        let same = a.clone();
        assert!(arrays_with_key_equal(&a, &same));

        let reordered = vec![a[1].clone(), a[0].clone()];
        assert!(!arrays_with_key_equal(&a, &reordered));

        assert!(!arrays_with_key_equal(&a, &a[..1]));
        assert!(arrays_with_key_equal::<Item>(&[], &[]));
    }
}
