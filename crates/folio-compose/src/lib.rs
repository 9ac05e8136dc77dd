//! # Content composition
//!
//! folio-compose turns a sequence of content descriptors plus three full
//! named mappings (query results, mutation handles, form values) into
//! ordered header/body/footer buckets of rendered elements, re-rendering
//! only the units whose *declared* dependencies changed.
//!
//! The moving parts, leaf to root:
//!
//! - `ContentDescriptor` / `ContentSource` — declarative content units with
//!   keys, ordering, flags, and opt-in dependency lists.
//! - `DependencyExtractor` — narrows the full mappings down to a
//!   descriptor's declared names with per-name identity stability.
//! - `Completeness` / `CompletenessTracker` — the gate that withholds
//!   rendering until every declared data source has produced data.
//! - `ComposeScope` — owns all caches for one content tree, runs a
//!   generation, reconciles it against the previous one by key, and
//!   partitions the result into buckets.
//! - `SettingsResolver` — memoized derived view settings.
//!
//! ```rust
//! use folio_compose::*;
//! use folio_core::*;
//!
//! let source = ContentSource::Static(vec![
//!     ContentDescriptor::new(Value::str("hello")).key("greeting"),
//! ]);
//! let mappings = Mappings::default();
//!
//! let mut scope: ComposeScope<Value> = ComposeScope::default();
//! let out = scope
//!     .compose(ComposeRequest {
//!         source: &source,
//!         mappings: &mappings,
//!         completeness: Completeness::Complete,
//!         auxiliary: &[],
//!         render: &|args: RenderArgs| args.descriptor.payload.clone(),
//!     })
//!     .unwrap();
//! assert_eq!(out.body.len(), 1);
//! ```
//!
//! A scope must never be shared between two concurrent content trees; all
//! identity guarantees are per scope and end at `reset()`.

pub mod completeness;
pub mod descriptor;
pub mod engine;
pub mod extract;
pub mod settings;

pub use completeness::*;
pub use descriptor::*;
pub use engine::*;
pub use extract::*;
pub use settings::*;
