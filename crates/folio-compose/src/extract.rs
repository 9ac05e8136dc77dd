use std::rc::Rc;

use folio_core::{NamedMap, StableCache, Value};

/// The three full mappings one scope composes from. Each is behind `Rc`:
/// the owning source swaps the whole `Rc` when its logical content changes,
/// so mapping identity tracks content identity.
#[derive(Clone, Debug, Default)]
pub struct Mappings {
    pub queries: Rc<NamedMap>,
    pub mutations: Rc<NamedMap>,
    pub form_values: Rc<NamedMap>,
}

impl Mappings {
    pub fn new(queries: NamedMap, mutations: NamedMap, form_values: NamedMap) -> Self {
        Self {
            queries: Rc::new(queries),
            mutations: Rc::new(mutations),
            form_values: Rc::new(form_values),
        }
    }

    pub fn domain(&self, domain: MappingDomain) -> &NamedMap {
        match domain {
            MappingDomain::Queries => &self.queries,
            MappingDomain::Mutations => &self.mutations,
            MappingDomain::FormValues => &self.form_values,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MappingDomain {
    Queries,
    Mutations,
    FormValues,
}

/// Narrows full mappings down to a descriptor's declared dependency names,
/// keeping per-name identity stable across calls.
///
/// Three independent caches, one per domain, so a query named `user` never
/// collides with a form value named `user`. A render callback that reads
/// only its declared subset observes identical references as long as none
/// of those entries changed, no matter how often the full mapping is
/// rebuilt around them.
#[derive(Default)]
pub struct DependencyExtractor {
    queries: StableCache<Value>,
    mutations: StableCache<Value>,
    form_values: StableCache<Value>,
}

impl DependencyExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    fn cache_mut(&mut self, domain: MappingDomain) -> &mut StableCache<Value> {
        match domain {
            MappingDomain::Queries => &mut self.queries,
            MappingDomain::Mutations => &mut self.mutations,
            MappingDomain::FormValues => &mut self.form_values,
        }
    }

    /// Build the narrowed mapping for `used`: every requested name present
    /// in `source` appears, nothing else does. Each entry passes through the
    /// domain cache, so an unchanged entry comes back with its previous
    /// identity even when other entries (or the source as a whole) changed.
    pub fn extract(
        &mut self,
        domain: MappingDomain,
        source: &NamedMap,
        used: &[Rc<str>],
    ) -> NamedMap {
        let cache = self.cache_mut(domain);
        let mut narrowed = NamedMap::new();
        for name in used {
            if let Some(value) = source.get(name) {
                let stable = cache.get_or_set(name, value.clone());
                narrowed.insert(name.clone(), stable);
            }
        }
        narrowed
    }

    /// Scope teardown: drop all three domain caches.
    pub fn clear_cache(&mut self) {
        self.queries.clear();
        self.mutations.clear();
        self.form_values.clear();
    }
}
