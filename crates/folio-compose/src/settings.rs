use std::fmt;
use std::rc::Rc;

use folio_core::{ShallowEq, Value};

use crate::extract::Mappings;

/// A static settings value, or a resolver over the full mappings.
#[derive(Clone)]
pub enum SettingsSource {
    Static(Value),
    Resolver(Rc<dyn Fn(&Mappings) -> Value>),
}

impl SettingsSource {
    pub fn resolver(f: impl Fn(&Mappings) -> Value + 'static) -> Self {
        SettingsSource::Resolver(Rc::new(f))
    }
}

impl fmt::Debug for SettingsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsSource::Static(v) => f.debug_tuple("Static").field(v).finish(),
            SettingsSource::Resolver(_) => write!(f, "Resolver(..)"),
        }
    }
}

/// Memoizes the derived view settings. A candidate that is shallow-equal to
/// the last emitted value yields the last emitted value itself, so settings
/// consumers see a stable identity until something actually changes.
#[derive(Debug, Default)]
pub struct SettingsResolver {
    last: Option<Value>,
}

impl SettingsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, source: &SettingsSource, mappings: &Mappings) -> Value {
        let candidate = match source {
            SettingsSource::Static(value) => value.clone(),
            SettingsSource::Resolver(resolve) => resolve(mappings),
        };
        if let Some(last) = &self.last
            && last.shallow_eq(&candidate)
        {
            return last.clone();
        }
        self.last = Some(candidate.clone());
        candidate
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
