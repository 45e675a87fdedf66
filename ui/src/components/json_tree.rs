//! Collapsible response viewer.

use explorer_core::{JsonTree, Span, TokenClass};
use leptos::prelude::*;

/// Renders the visible lines of a response tree. Clicking a group header or
/// its collapsed placeholder toggles the group.
#[component]
pub fn JsonTreeView(tree: RwSignal<Option<JsonTree>>) -> impl IntoView {
    view! {
        <div class="json-tree text-sm bg-white border rounded p-3 overflow-x-auto">
            {move || {
                let lines = tree.with(|t| t.as_ref().map(JsonTree::lines)).unwrap_or_default();
                lines
                    .into_iter()
                    .map(|line| {
                        let spans = line.spans.into_iter().map(span_view).collect_view();
                        match line.toggle {
                            Some(path) => view! {
                                <div
                                    class="toggle"
                                    on:click=move |_| tree.update(|t| {
                                        if let Some(t) = t.as_mut() {
                                            t.toggle(&path);
                                        }
                                    })
                                >
                                    {spans}
                                </div>
                            }
                            .into_any(),
                            None => view! { <div>{spans}</div> }.into_any(),
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

fn span_view(span: Span) -> AnyView {
    let class = class_name(span.class);
    match (span.class, span.href) {
        (TokenClass::ExplorerLink, Some(href)) => {
            view! { <a class=class href=href>{span.text}</a> }.into_any()
        }
        (TokenClass::Link, Some(href)) => view! {
            <a class=class href=href target="_blank" rel="noopener">{span.text}</a>
        }
        .into_any(),
        _ => view! { <span class=class>{span.text}</span> }.into_any(),
    }
}

fn class_name(class: TokenClass) -> &'static str {
    match class {
        TokenClass::Key => "key",
        TokenClass::Null => "null",
        TokenClass::Number => "number",
        TokenClass::Boolean => "boolean",
        TokenClass::String => "string",
        TokenClass::Link => "link",
        TokenClass::ExplorerLink => "explorer_link",
        TokenClass::Punctuation => "punctuation",
        TokenClass::Placeholder => "placeholder",
        TokenClass::Raw => "raw",
    }
}
