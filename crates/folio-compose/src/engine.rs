use std::collections::HashSet;
use std::rc::Rc;

use folio_core::{
    ComposeError, ContentKey, Keyed, NamedMap, ShallowEq, StableCache, Value,
    arrays_with_key_equal, merge_by_key,
};

use crate::completeness::Completeness;
use crate::descriptor::{ContentDescriptor, ContentSource, DescriptorFlags};
use crate::extract::{DependencyExtractor, MappingDomain, Mappings};
use crate::settings::{SettingsResolver, SettingsSource};

/// Anything the render callback can produce. Blanket-implemented.
pub trait RenderElement: Clone + ShallowEq + 'static {}
impl<T> RenderElement for T where T: Clone + ShallowEq + 'static {}

/// Explicit configuration for one scope. Passed at construction instead of
/// living in process-wide state.
#[derive(Clone, Debug)]
pub struct ComposeConfig {
    /// Prefix for synthetic keys of content descriptors without one.
    pub content_key_prefix: String,
    /// Prefix for synthetic keys of auxiliary descriptors without one.
    pub form_key_prefix: String,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            content_key_prefix: "content-".into(),
            form_key_prefix: "form-element-".into(),
        }
    }
}

/// One rendered content unit: the opaque render output plus the ordering
/// and bucketing it was composed with.
#[derive(Clone, Debug)]
pub struct RenderedElement<E> {
    pub key: ContentKey,
    pub index: i64,
    pub header: bool,
    pub footer: bool,
    pub element: E,
}

impl<E> Keyed for RenderedElement<E> {
    fn key(&self) -> ContentKey {
        self.key.clone()
    }
}

impl<E: ShallowEq> ShallowEq for RenderedElement<E> {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.index == other.index
            && self.header == other.header
            && self.footer == other.footer
            && self.element.shallow_eq(&other.element)
    }
}

/// What the render callback sees for one descriptor: the descriptor itself,
/// the three narrowed mappings, and the unit's position and stable key.
///
/// The callback must be pure over these inputs; reading a mapping entry it
/// did not declare voids the identity-stability guarantees.
pub struct RenderArgs<'a> {
    pub descriptor: &'a ContentDescriptor,
    pub queries: &'a Rc<NamedMap>,
    pub mutations: &'a Rc<NamedMap>,
    pub form_values: &'a Rc<NamedMap>,
    pub position: usize,
    pub key: &'a ContentKey,
}

/// One composition request.
pub struct ComposeRequest<'a, E> {
    pub source: &'a ContentSource,
    pub mappings: &'a Mappings,
    pub completeness: Completeness,
    pub auxiliary: &'a [ContentDescriptor],
    pub render: &'a dyn Fn(RenderArgs<'_>) -> E,
}

/// Composition output: the three ordered buckets, plus the flattened raw
/// descriptor sequence (content + auxiliary, unsorted, pre-render) for
/// external bookkeeping.
#[derive(Clone, Debug)]
pub struct Composed<E> {
    pub header: Vec<RenderedElement<E>>,
    pub body: Vec<RenderedElement<E>>,
    pub footer: Vec<RenderedElement<E>>,
    pub descriptors: Vec<ContentDescriptor>,
}

impl<E> Composed<E> {
    fn empty(descriptors: Vec<ContentDescriptor>) -> Self {
        Self {
            header: Vec::new(),
            body: Vec::new(),
            footer: Vec::new(),
            descriptors,
        }
    }
}

/// Owns every cache for one content-tree instance.
///
/// A scope is strictly sequential: one composition generation completes
/// before the next begins, and a scope is never shared between concurrent
/// trees. All identity guarantees are scoped to one instance and end at
/// [`ComposeScope::reset`].
pub struct ComposeScope<E> {
    config: ComposeConfig,
    extractor: DependencyExtractor,
    narrowed_queries: StableCache<Rc<NamedMap>>,
    narrowed_mutations: StableCache<Rc<NamedMap>>,
    narrowed_form_values: StableCache<Rc<NamedMap>>,
    previous: Vec<RenderedElement<E>>,
    settings: SettingsResolver,
}

impl<E: RenderElement> Default for ComposeScope<E> {
    fn default() -> Self {
        Self::new(ComposeConfig::default())
    }
}

impl<E: RenderElement> ComposeScope<E> {
    pub fn new(config: ComposeConfig) -> Self {
        Self {
            config,
            extractor: DependencyExtractor::new(),
            narrowed_queries: StableCache::new(),
            narrowed_mutations: StableCache::new(),
            narrowed_form_values: StableCache::new(),
            previous: Vec::new(),
            settings: SettingsResolver::new(),
        }
    }

    /// Run one composition generation.
    ///
    /// While the mappings are incomplete nothing is rendered: a dynamic
    /// source is not invoked and all buckets come back empty. Static and
    /// auxiliary descriptors are still listed so callers can keep driving
    /// their completeness machinery from the declared dependencies.
    pub fn compose(
        &mut self,
        request: ComposeRequest<'_, E>,
    ) -> Result<Composed<E>, ComposeError> {
        if !request.completeness.is_complete() {
            let mut descriptors = match request.source {
                ContentSource::Static(items) => items.clone(),
                ContentSource::Dynamic(_) => Vec::new(),
            };
            descriptors.extend(request.auxiliary.iter().cloned());
            return Ok(Composed::empty(descriptors));
        }

        let content = match request.source {
            ContentSource::Static(items) => items.clone(),
            ContentSource::Dynamic(build) => build(request.mappings),
        };

        let mut descriptors = content.clone();
        descriptors.extend(request.auxiliary.iter().cloned());

        let content_prefix = self.config.content_key_prefix.clone();
        let form_prefix = self.config.form_key_prefix.clone();

        let mut rendered = Vec::with_capacity(descriptors.len());
        for (position, desc) in content.iter().filter(|d| !d.is_hidden()).enumerate() {
            let index = desc.resolved_index(position)?;
            let key = desc.resolved_key(&content_prefix, position as i64, position)?;
            rendered.push(self.render_one(desc, key, index, position, &request));
        }
        for (position, desc) in request
            .auxiliary
            .iter()
            .filter(|d| !d.is_hidden())
            .enumerate()
        {
            let index = desc.resolved_index(position)?;
            // Synthetic auxiliary keys use the explicit index when present.
            let key = desc.resolved_key(&form_prefix, index, position)?;
            rendered.push(self.render_one(desc, key, index, position, &request));
        }

        // Deterministic order: index ascending, canonical key as tie-break.
        rendered.sort_by(|a, b| {
            a.index
                .cmp(&b.index)
                .then_with(|| a.key.canonical().cmp(&b.key.canonical()))
        });

        let deduped = dedupe_last_wins(rendered);

        let reconciled = merge_by_key(&self.previous, deduped);
        if log::log_enabled!(log::Level::Trace) && arrays_with_key_equal(&reconciled, &self.previous)
        {
            log::trace!("compose: generation unchanged");
        }
        self.previous = reconciled;

        let mut out = Composed::empty(descriptors);
        for item in &self.previous {
            if item.header {
                out.header.push(item.clone());
            } else if item.footer {
                out.footer.push(item.clone());
            } else {
                out.body.push(item.clone());
            }
        }
        Ok(out)
    }

    fn render_one(
        &mut self,
        desc: &ContentDescriptor,
        key: ContentKey,
        index: i64,
        position: usize,
        request: &ComposeRequest<'_, E>,
    ) -> RenderedElement<E> {
        let slot = key.canonical();
        let mappings = request.mappings;

        // Per-entry identity comes from the extractor; whole-mapping
        // identity comes from the per-descriptor stable caches, so a
        // shallow-equal narrowed map resolves to the previous allocation.
        let queries = Rc::new(self.extractor.extract(
            MappingDomain::Queries,
            &mappings.queries,
            &desc.used_queries,
        ));
        let queries = self.narrowed_queries.get_or_set(&slot, queries);

        let mutations = Rc::new(self.extractor.extract(
            MappingDomain::Mutations,
            &mappings.mutations,
            &desc.used_queries,
        ));
        let mutations = self.narrowed_mutations.get_or_set(&slot, mutations);

        let form_values = Rc::new(self.extractor.extract(
            MappingDomain::FormValues,
            &mappings.form_values,
            &desc.used_form_values,
        ));
        let form_values = self.narrowed_form_values.get_or_set(&slot, form_values);

        let element = (request.render)(RenderArgs {
            descriptor: desc,
            queries: &queries,
            mutations: &mutations,
            form_values: &form_values,
            position,
            key: &key,
        });

        RenderedElement {
            header: desc.flags.contains(DescriptorFlags::HEADER),
            footer: desc.flags.contains(DescriptorFlags::FOOTER),
            key,
            index,
            element,
        }
    }

    /// Resolve the view settings through this scope's memo.
    pub fn resolve_settings(&mut self, source: &SettingsSource, mappings: &Mappings) -> Value {
        self.settings.resolve(source, mappings)
    }

    /// Scope teardown: drop every cache, the previous generation, and the
    /// settings memo. A reused scope afterwards behaves like a fresh one.
    pub fn reset(&mut self) {
        self.extractor.clear_cache();
        self.narrowed_queries.clear();
        self.narrowed_mutations.clear();
        self.narrowed_form_values.clear();
        self.previous.clear();
        self.settings.clear();
    }
}

/// Duplicate keys within one generation resolve last-write-wins: the last
/// occurrence keeps its sorted position, earlier ones are dropped.
fn dedupe_last_wins<E>(rendered: Vec<RenderedElement<E>>) -> Vec<RenderedElement<E>> {
    let mut seen: HashSet<String> = HashSet::with_capacity(rendered.len());
    let mut out: Vec<RenderedElement<E>> = Vec::with_capacity(rendered.len());
    let mut duplicate = false;
    for item in rendered.into_iter().rev() {
        if seen.insert(item.key.canonical()) {
            out.push(item);
        } else {
            duplicate = true;
        }
    }
    if duplicate {
        log::warn!("compose: duplicate content keys within one generation; keeping the last occurrence per key");
    }
    out.reverse();
    out
}
