//! Request Body Form
//!
//! Renders the editor tree of a [`SchemaForm`] and routes every user action
//! back into it by path. The tree is re-rendered from `SchemaForm::render`
//! after each action.

use explorer_core::editor::{ArrayItemView, ObjectRowView};
use explorer_core::{EditorPath, EditorView, SchemaForm};
use leptos::prelude::*;
use leptos::web_sys;
use wasm_bindgen::JsCast;

/// Root of the request body editor. Shows nothing when the selected method
/// takes no body.
#[component]
pub fn SchemaFormView(form: RwSignal<Option<SchemaForm>>) -> impl IntoView {
    let (error, set_error) = signal(Option::<String>::None);

    let apply = move |action: FormAction| {
        let mut result = Ok(());
        form.update(|f| {
            if let Some(f) = f.as_mut() {
                result = action.apply(f);
            }
        });
        match result {
            Ok(()) => set_error.set(None),
            Err(e) => {
                log::warn!("Form action rejected: {}", e);
                set_error.set(Some(e));
            }
        }
    };
    let apply = Callback::new(apply);

    view! {
        <div class="schema-form">
            {move || {
                form.with(|f| f.as_ref().and_then(SchemaForm::render)).map(|root| {
                    view! {
                        <div class="border rounded p-3 bg-white">
                            <div class="text-sm text-gray-500 mb-2">"Request body"</div>
                            {editor_view(root, EditorPath::root(), apply)}
                        </div>
                    }
                })
            }}
            {move || error.get().map(|e| view! {
                <div class="text-red-600 text-sm mt-2">{e}</div>
            })}
        </div>
    }
}

/// A user action on the form, addressed by editor path.
#[derive(Clone, Debug)]
pub enum FormAction {
    Select { path: EditorPath, index: usize },
    Remove { path: EditorPath, key: String },
    AddItem { path: EditorPath },
    RemoveItem { path: EditorPath, index: usize },
    Text { path: EditorPath, text: String },
    Checked { path: EditorPath, checked: bool },
}

impl FormAction {
    fn apply(self, form: &mut SchemaForm) -> Result<(), String> {
        let result = match self {
            FormAction::Select { path, index } => form.select_property(&path, index).map(|_| ()),
            FormAction::Remove { path, key } => form.remove_property(&path, &key),
            FormAction::AddItem { path } => form.add_item(&path).map(|_| ()),
            FormAction::RemoveItem { path, index } => form.remove_item(&path, index),
            FormAction::Text { path, text } => form.set_text(&path, &text),
            FormAction::Checked { path, checked } => form.set_checked(&path, checked),
        };
        result.map_err(|e| e.to_string())
    }
}

fn editor_view(view: EditorView, path: EditorPath, apply: Callback<FormAction>) -> AnyView {
    match view {
        EditorView::String { value } => {
            let on_change = move |ev: web_sys::Event| {
                apply.run(FormAction::Text {
                    path: path.clone(),
                    text: input_value(&ev),
                });
            };
            view! {
                <input
                    type="text"
                    class="px-2 py-1 text-sm border border-gray-300 rounded"
                    prop:value=value
                    on:change=on_change
                />
            }
            .into_any()
        }
        EditorView::Number { text } => {
            let on_change = move |ev: web_sys::Event| {
                apply.run(FormAction::Text {
                    path: path.clone(),
                    text: input_value(&ev),
                });
            };
            view! {
                <input
                    type="text"
                    inputmode="decimal"
                    class="px-2 py-1 text-sm border border-gray-300 rounded w-32"
                    prop:value=text
                    on:change=on_change
                />
            }
            .into_any()
        }
        EditorView::Boolean { checked } => {
            let on_change = move |ev: web_sys::Event| {
                let checked = ev
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                    .map(|input| input.checked())
                    .unwrap_or(false);
                apply.run(FormAction::Checked {
                    path: path.clone(),
                    checked,
                });
            };
            view! {
                <input type="checkbox" prop:checked=checked on:change=on_change />
            }
            .into_any()
        }
        EditorView::Object { rows, options } => object_view(rows, options, path, apply),
        EditorView::Array { items } => array_view(items, path, apply),
    }
}

fn object_view(
    rows: Vec<ObjectRowView>,
    options: Option<Vec<String>>,
    path: EditorPath,
    apply: Callback<FormAction>,
) -> AnyView {
    let rows = rows
        .into_iter()
        .map(|row| {
            let child = path.push_property(&row.key);
            let remove = row.removable.then(|| {
                let path = path.clone();
                let key = row.key.clone();
                view! {
                    <button
                        class="text-xs text-red-600 hover:underline"
                        on:click=move |_| apply.run(FormAction::Remove {
                            path: path.clone(),
                            key: key.clone(),
                        })
                    >
                        "remove"
                    </button>
                }
            });
            view! {
                <div class="ml-4 my-1">
                    <div class="row">
                        <span class="font-mono text-purple-800" title=row.description.unwrap_or_default()>
                            {row.label}
                        </span>
                        <span class="text-xs text-gray-400">{row.type_label}</span>
                        {remove}
                    </div>
                    <div class="ml-4">{editor_view(row.editor, child, apply)}</div>
                </div>
            }
        })
        .collect_view();

    let add_control = options.map(|options| {
        let on_change = move |ev: web_sys::Event| {
            let index = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
                .map(|select| select.selected_index())
                .unwrap_or(0);
            if index > 0 {
                apply.run(FormAction::Select {
                    path: path.clone(),
                    index: index as usize,
                });
            }
        };
        view! {
            <select class="ml-4 text-sm border border-gray-300 rounded" on:change=on_change>
                {options
                    .into_iter()
                    .enumerate()
                    .map(|(i, option)| view! { <option selected={i == 0}>{option}</option> })
                    .collect_view()}
            </select>
        }
    });

    view! {
        <div class="font-mono">
            "{"
            {rows}
            {add_control}
            <div>"}"</div>
        </div>
    }
    .into_any()
}

fn array_view(items: Vec<ArrayItemView>, path: EditorPath, apply: Callback<FormAction>) -> AnyView {
    let items = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let child = path.push_index(index);
            let path = path.clone();
            view! {
                <div class="ml-4 my-1 row">
                    {editor_view(item.editor, child, apply)}
                    <button
                        class="text-xs text-red-600 hover:underline"
                        on:click=move |_| apply.run(FormAction::RemoveItem {
                            path: path.clone(),
                            index,
                        })
                    >
                        "remove"
                    </button>
                </div>
            }
        })
        .collect_view();

    let add_path = path.clone();
    view! {
        <div class="font-mono">
            "["
            {items}
            <button
                class="ml-4 text-xs text-blue-600 hover:underline"
                on:click=move |_| apply.run(FormAction::AddItem { path: add_path.clone() })
            >
                "add item"
            </button>
            <div>"]"</div>
        </div>
    }
    .into_any()
}

fn input_value(ev: &web_sys::Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}
