//! Shallow equality: the comparator behind every identity-reuse decision.
//!
//! One level deep only. Nested aggregates compare by pointer, callbacks by
//! declared name + source fingerprint, and opaque payloads only by pointer
//! (a value we cannot introspect is never equal to anything else, which at
//! worst costs a caching opportunity and never reuses a stale identity).

use std::rc::Rc;

use crate::value::{Callback, NamedMap, Value};

pub trait ShallowEq {
    fn shallow_eq(&self, other: &Self) -> bool;
}

impl<T: ShallowEq> ShallowEq for Rc<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other) || (**self).shallow_eq(other)
    }
}

macro_rules! shallow_eq_by_value {
    ($($t:ty),* $(,)?) => {
        $(impl ShallowEq for $t {
            fn shallow_eq(&self, other: &Self) -> bool {
                self == other
            }
        })*
    };
}

// Plain data compares by value; render-element types built from these get
// shallow equality for free.
shallow_eq_by_value!(bool, i32, i64, u32, u64, usize, f32, f64, String);

fn callback_eq(a: &Callback, b: &Callback) -> bool {
    a.same_fn(b) || (a.name() == b.name() && a.source() == b.source())
}

/// Strict equality one level below the top: primitives by value, nested
/// aggregates by reference, callbacks by the callback rule.
fn entry_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::Int(x), Value::Float(y)) | (Value::Float(y), Value::Int(x)) => *x as f64 == *y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Callback(x), Value::Callback(y)) => callback_eq(x, y),
        (Value::List(x), Value::List(y)) => Rc::ptr_eq(x, y),
        (Value::Map(x), Value::Map(y)) => Rc::ptr_eq(x, y),
        (Value::Opaque(x), Value::Opaque(y)) => Rc::ptr_eq(x, y),
        _ => false,
    }
}

fn map_eq(a: &NamedMap, b: &NamedMap) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().all(|(name, value)| match b.get(name) {
        Some(other) => entry_eq(value, other),
        None => false,
    })
}

impl ShallowEq for Value {
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Callback(a), Value::Callback(b)) => callback_eq(a, b),
            (Value::List(a), Value::List(b)) => {
                Rc::ptr_eq(a, b)
                    || (a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| entry_eq(x, y)))
            }
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b) || map_eq(a, b),
            (Value::Opaque(a), Value::Opaque(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl ShallowEq for NamedMap {
    fn shallow_eq(&self, other: &Self) -> bool {
        map_eq(self, other)
    }
}
