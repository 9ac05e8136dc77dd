use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;
use folio_core::{ComposeError, ContentKey, Value};
use smallvec::SmallVec;

use crate::extract::Mappings;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DescriptorFlags: u8 {
        /// Dropped before rendering.
        const HIDDEN = 1 << 0;
        /// Lands in the header bucket.
        const HEADER = 1 << 1;
        /// Lands in the footer bucket.
        const FOOTER = 1 << 2;
    }
}

pub type DepNames = SmallVec<[Rc<str>; 4]>;

/// One declarative unit of content: an optional key and ordering index, a
/// few flags, the declared data dependencies, and an opaque render payload.
///
/// Dependencies are opt-in: a descriptor that declares nothing gets empty
/// narrowed mappings, and its render output can never depend on mapping
/// changes without voiding the identity-stability contract.
#[derive(Clone, Debug)]
pub struct ContentDescriptor {
    pub key: Option<Value>,
    pub index: Option<Value>,
    pub flags: DescriptorFlags,
    pub used_queries: DepNames,
    pub used_form_values: DepNames,
    pub payload: Value,
}

impl ContentDescriptor {
    pub fn new(payload: Value) -> Self {
        Self {
            key: None,
            index: None,
            flags: DescriptorFlags::empty(),
            used_queries: DepNames::new(),
            used_form_values: DepNames::new(),
            payload,
        }
    }

    pub fn key(mut self, key: impl Into<Value>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn index(mut self, index: impl Into<Value>) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.flags |= DescriptorFlags::HIDDEN;
        self
    }

    pub fn header(mut self) -> Self {
        self.flags |= DescriptorFlags::HEADER;
        self
    }

    pub fn footer(mut self) -> Self {
        self.flags |= DescriptorFlags::FOOTER;
        self
    }

    pub fn uses_query(mut self, name: impl Into<Rc<str>>) -> Self {
        self.used_queries.push(name.into());
        self
    }

    pub fn uses_form_value(mut self, name: impl Into<Rc<str>>) -> Self {
        self.used_form_values.push(name.into());
        self
    }

    pub fn is_hidden(&self) -> bool {
        self.flags.contains(DescriptorFlags::HIDDEN)
    }

    /// Ordering index: the explicit one when present (must be an integer;
    /// a float with zero fraction counts), else the given position.
    pub fn resolved_index(&self, position: usize) -> Result<i64, ComposeError> {
        match &self.index {
            None => Ok(position as i64),
            Some(Value::Int(n)) => Ok(*n),
            Some(Value::Float(f)) if f.is_finite() && f.fract() == 0.0 => Ok(*f as i64),
            Some(other) => Err(ComposeError::InvalidIndex {
                position,
                found: format!("{other:?}"),
            }),
        }
    }

    /// Stable key: the explicit one when present (string or integer), else
    /// a synthetic `<prefix><ordinal>` key.
    pub fn resolved_key(
        &self,
        prefix: &str,
        ordinal: i64,
        position: usize,
    ) -> Result<ContentKey, ComposeError> {
        match &self.key {
            None => Ok(ContentKey::Str(format!("{prefix}{ordinal}").into())),
            Some(Value::Str(s)) => Ok(ContentKey::Str(s.clone())),
            Some(Value::Int(n)) => Ok(ContentKey::Num(*n)),
            Some(Value::Float(f)) if f.is_finite() && f.fract() == 0.0 => {
                Ok(ContentKey::Num(*f as i64))
            }
            Some(other) => Err(ComposeError::InvalidKey {
                position,
                found: other.type_name().to_string(),
            }),
        }
    }
}

/// Where descriptors come from: a static ordered sequence, or a function of
/// the full mappings. The dynamic form is only ever invoked once the
/// mappings are complete, so it never reads through partial data.
#[derive(Clone)]
pub enum ContentSource {
    Static(Vec<ContentDescriptor>),
    Dynamic(Rc<dyn Fn(&Mappings) -> Vec<ContentDescriptor>>),
}

impl ContentSource {
    pub fn dynamic(f: impl Fn(&Mappings) -> Vec<ContentDescriptor> + 'static) -> Self {
        ContentSource::Dynamic(Rc::new(f))
    }
}

impl fmt::Debug for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSource::Static(items) => f.debug_tuple("Static").field(items).finish(),
            ContentSource::Dynamic(_) => write!(f, "Dynamic(..)"),
        }
    }
}
