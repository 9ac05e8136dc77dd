use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub type CallbackFn = Rc<dyn Fn(&[Value]) -> Value>;

/// Explicit, comparable stand-in for a closure carried in content data.
///
/// Instead of comparing serialized function bodies, a callback declares a
/// `name` and a `source` fingerprint up front; two callbacks are considered
/// the same when both match (or when they are literally the same handle).
#[derive(Clone)]
pub struct Callback {
    name: Rc<str>,
    source: Rc<str>,
    func: CallbackFn,
}

impl Callback {
    pub fn new(
        name: impl Into<Rc<str>>,
        source: impl Into<Rc<str>>,
        func: impl Fn(&[Value]) -> Value + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            func: Rc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }

    /// Same underlying function handle.
    pub fn same_fn(&self, other: &Callback) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("name", &self.name)
            .field("func", &"<callback>")
            .finish()
    }
}

/// Opaque dynamic value flowing through mappings and descriptors.
///
/// Aggregate variants are `Rc`-backed, so cloning a `Value` shares the
/// underlying allocation: a clone *is* the same logical identity. That is
/// what lets the stable caches hand out "the previous value" cheaply.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    List(Rc<Vec<Value>>),
    Map(Rc<NamedMap>),
    Callback(Callback),
    /// Host payload the comparator cannot introspect; equal only to itself.
    Opaque(Rc<dyn Any>),
}

impl Value {
    pub fn str(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(items))
    }

    pub fn map(map: NamedMap) -> Self {
        Value::Map(Rc::new(map))
    }

    pub fn opaque(payload: impl Any) -> Self {
        Value::Opaque(Rc::new(payload))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Callback(_) => "callback",
            Value::Opaque(_) => "opaque",
        }
    }

    /// Reference identity: `Rc` pointer equality for aggregate variants,
    /// plain value equality for the small copyable primitives (which have
    /// no meaningful notion of a distinct allocation).
    pub fn same_ref(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => Rc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b),
            (Value::Callback(a), Value::Callback(b)) => a.same_fn(b),
            (Value::Opaque(a), Value::Opaque(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(v) => write!(f, "Bool({v})"),
            Value::Int(v) => write!(f, "Int({v})"),
            Value::Float(v) => write!(f, "Float({v})"),
            Value::Str(v) => write!(f, "Str({v:?})"),
            Value::List(v) => f.debug_tuple("List").field(v).finish(),
            Value::Map(v) => f.debug_tuple("Map").field(v).finish(),
            Value::Callback(c) => c.fmt(f),
            Value::Opaque(_) => write!(f, "Opaque(..)"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}
impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}
impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}
impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}
impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.into())
    }
}
impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v.into())
    }
}
impl From<Callback> for Value {
    fn from(v: Callback) -> Self {
        Value::Callback(v)
    }
}

/// Mapping from a name to an opaque [`Value`]: a batch of query results,
/// mutation handles, or form-field values. Shared behind `Rc` wherever the
/// mapping's own identity matters.
#[derive(Clone, Debug, Default)]
pub struct NamedMap {
    entries: HashMap<Rc<str>, Value>,
}

impl NamedMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<Rc<str>>, value: Value) {
        self.entries.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &Rc<str>> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Rc<str>, &Value)> {
        self.entries.iter()
    }
}

impl<N: Into<Rc<str>>> FromIterator<(N, Value)> for NamedMap {
    fn from_iter<T: IntoIterator<Item = (N, Value)>>(iter: T) -> Self {
        let mut map = NamedMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

/// Key of one content unit. Numeric and string keys naming the same logical
/// slot collide through [`ContentKey::canonical`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContentKey {
    Str(Rc<str>),
    Num(i64),
}

impl ContentKey {
    /// Canonical string form, the per-cache key space.
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKey::Str(s) => write!(f, "{s}"),
            ContentKey::Num(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for ContentKey {
    fn from(v: &str) -> Self {
        ContentKey::Str(v.into())
    }
}
impl From<String> for ContentKey {
    fn from(v: String) -> Self {
        ContentKey::Str(v.into())
    }
}
impl From<i64> for ContentKey {
    fn from(v: i64) -> Self {
        ContentKey::Num(v)
    }
}
