//! Composes a small article page twice — once while the query data is still
//! pending, once with everything reported — and prints the buckets.
//!
//! Run with `RUST_LOG=debug` to see the engine's bookkeeping.

use folio_compose::{
    Completeness, CompletenessTracker, ComposeRequest, ComposeScope, ContentDescriptor,
    ContentSource, Mappings, RenderArgs,
};
use folio_core::{ComposeError, NamedMap, Value};

fn page_source() -> ContentSource {
    ContentSource::dynamic(|mappings| {
        let mut items = vec![
            ContentDescriptor::new(Value::str("Site banner"))
                .key("banner")
                .index(0)
                .header(),
            ContentDescriptor::new(Value::str("Article"))
                .key("article")
                .index(1)
                .uses_query("article"),
            ContentDescriptor::new(Value::str("Legal"))
                .key("legal")
                .index(9)
                .footer(),
        ];
        // Comments only exist for articles that allow them.
        if let Some(Value::Bool(true)) = mappings.queries.get("comments_enabled") {
            items.push(
                ContentDescriptor::new(Value::str("Comments"))
                    .key("comments")
                    .index(2)
                    .uses_query("comments"),
            );
        }
        items
    })
}

fn render(args: RenderArgs<'_>) -> String {
    let title = match &args.descriptor.payload {
        Value::Str(s) => s.to_string(),
        other => format!("{other:?}"),
    };
    format!("[{}] {} ({} queries in view)", args.key, title, args.queries.len())
}

fn main() -> Result<(), ComposeError> {
    env_logger::init();

    let source = page_source();
    let mut scope: ComposeScope<String> = ComposeScope::default();

    let mut tracker = CompletenessTracker::new();
    tracker.declare("article");
    tracker.declare("comments");

    let pending = Mappings::default();
    let gated = scope.compose(ComposeRequest {
        source: &source,
        mappings: &pending,
        completeness: tracker.state(),
        auxiliary: &[],
        render: &render,
    })?;
    println!(
        "while loading: {} rendered units, {} descriptors",
        gated.header.len() + gated.body.len() + gated.footer.len(),
        gated.descriptors.len(),
    );

    tracker.report("article");
    tracker.report("comments");
    assert_eq!(tracker.state(), Completeness::Complete);

    let queries: NamedMap = [
        ("article", Value::str("How stable identities tame re-renders")),
        ("comments_enabled", Value::Bool(true)),
        ("comments", Value::list(vec![Value::str("first!")])),
    ]
    .into_iter()
    .collect();
    let form_values: NamedMap = [("comment_draft", Value::str(""))].into_iter().collect();
    let mappings = Mappings::new(queries, NamedMap::new(), form_values);

    let aux = [ContentDescriptor::new(Value::str("Comment box"))
        .index(3)
        .uses_form_value("comment_draft")];

    let page = scope.compose(ComposeRequest {
        source: &source,
        mappings: &mappings,
        completeness: tracker.state(),
        auxiliary: &aux,
        render: &render,
    })?;

    for (bucket, items) in [
        ("header", &page.header),
        ("body", &page.body),
        ("footer", &page.footer),
    ] {
        println!("{bucket}:");
        for item in items {
            println!("  {}", item.element);
        }
    }
    Ok(())
}
