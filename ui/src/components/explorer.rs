//! Explorer page for one service version: method picker, parameters,
//! request body form, and the rendered response.

use std::collections::BTreeMap;
use std::sync::Arc;

use explorer_core::{
    ApiRequest, ApiService, AppState, JsonTree, JsonTreeRenderer, ParameterLocation, SchemaForm,
};
use leptos::prelude::*;
use leptos::web_sys;
use leptos_router::hooks::{use_navigate, use_params_map};
use wasm_bindgen::JsCast;

use super::json_tree::JsonTreeView;
use super::schema_form::SchemaFormView;
use crate::api;
use crate::types::{ApiResult, ClientConfig, DeepLink};

#[component]
pub fn Explorer() -> impl IntoView {
    let params = use_params_map();
    let name = move || params.read().get("name").unwrap_or_default();
    let version = move || params.read().get("version").unwrap_or_default();

    let service = LocalResource::new(move || {
        let (name, version) = (name(), version());
        async move { api::get_service(&name, &version).await.map(Arc::new) }
    });
    let config = LocalResource::new(|| async move { api::get_config().await.ok() });

    view! {
        <div class="p-6">
            <Suspense fallback=move || view! { <div class="text-gray-500">"Loading discovery document..."</div> }>
                {move || {
                    let config = config.get().flatten();
                    service.get().map(|result| match result {
                        Ok(service) => view! { <ServiceExplorer service=service config=config /> }.into_any(),
                        Err(e) => view! {
                            <div class="text-red-600">{format!("Failed to load service: {}", e)}</div>
                        }
                        .into_any(),
                    })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn ServiceExplorer(service: Arc<ApiService>, config: Option<ClientConfig>) -> impl IntoView {
    let method_key = RwSignal::new(Option::<String>::None);
    let param_values = RwSignal::new(BTreeMap::<String, String>::new());
    let form = RwSignal::new(Option::<SchemaForm>::None);
    let response_tree = RwSignal::new(Option::<JsonTree>::None);
    let (result, set_result) = signal(Option::<Result<ApiResult, String>>::None);
    let (sending, set_sending) = signal(false);

    let select = {
        let service = service.clone();
        move |key: Option<String>, params: Vec<(String, String)>| {
            param_values.set(params.into_iter().collect());
            response_tree.set(None);
            set_result.set(None);
            form.set(key.as_ref().map(|key| {
                let mut form = SchemaForm::new(Arc::new(AppState::new(service.clone())));
                form.set_method(service.clone(), key);
                form
            }));
            method_key.set(key);
        }
    };

    // The fragment selects the method and binds parameters.
    let apply_fragment = {
        let service = service.clone();
        let select = select.clone();
        let navigate = use_navigate();
        move || {
            let hash = window().location().hash().unwrap_or_default();
            let link = DeepLink::parse(&hash);
            if link.targets_other(&service.name, &service.version) {
                if let (Some(s), Some(v)) = (&link.service, &link.version) {
                    navigate(&format!("/services/{}/{}{}", s, v, hash), Default::default());
                }
                return;
            }
            if let Some(method) = link.method.filter(|m| service.method(m).is_some()) {
                log::debug!("Deep link selects {}", method);
                select(Some(method), link.params);
            }
        }
    };
    apply_fragment();
    let handle = window_event_listener(leptos::ev::hashchange, move |_| apply_fragment());
    on_cleanup(move || handle.remove());

    let methods: Vec<String> = service.all_methods().into_iter().map(|(key, _)| key).collect();

    let on_method_change = {
        let select = select.clone();
        move |ev: web_sys::Event| {
            let key = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
                .map(|s| s.value())
                .filter(|v| !v.is_empty());
            select(key, Vec::new());
        }
    };

    let on_send = {
        let service = service.clone();
        let config = config.clone();
        move |_| {
            let Some(key) = method_key.get() else {
                return;
            };
            let mut request = match ApiRequest::for_method(&service, &key) {
                Ok(request) => request,
                Err(e) => {
                    set_result.set(Some(Err(e.to_string())));
                    return;
                }
            };
            for (name, value) in param_values.get() {
                if !value.is_empty() {
                    request.set_param(name, vec![value]);
                }
            }
            if let Some(api_key) = config.as_ref().and_then(|c| c.api_key.as_deref()) {
                request.set_api_key(api_key);
            }
            request.set_body(form.with(|f| f.as_ref().map(SchemaForm::string_value).unwrap_or_default()));

            let root_url = service.root_url.clone();
            let service = service.clone();
            set_sending.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = api::send_request(&root_url, &request).await;
                if let Ok(response) = &outcome {
                    let state = AppState::new(service).with_method(&key);
                    response_tree.set(JsonTreeRenderer::new(&state).prettify(&response.body));
                }
                set_result.set(Some(outcome));
                set_sending.set(false);
            });
        }
    };

    let title = service
        .title
        .clone()
        .unwrap_or_else(|| service.name.clone());
    let description = service.description.clone().unwrap_or_default();
    let version = service.version.clone();
    let service_for_params = service.clone();

    view! {
        <div class="space-y-4">
            <div>
                <h2 class="text-2xl font-bold">{title}" "<span class="text-gray-400">{version}</span></h2>
                <p class="text-gray-600">{description}</p>
            </div>

            <select
                class="px-3 py-2 border border-gray-300 rounded w-full"
                prop:value=move || method_key.get().unwrap_or_default()
                on:change=on_method_change
            >
                <option value="">"-- select a method --"</option>
                {methods
                    .into_iter()
                    .map(|key| view! { <option value=key.clone()>{key.clone()}</option> })
                    .collect_view()}
            </select>

            {move || {
                let service = service_for_params.clone();
                method_key.get().and_then(|key| {
                    let method = service.method(&key)?.clone();
                    Some(view! {
                        <MethodDetails
                            http_method=method.http_method.as_str()
                            path=method.path.clone()
                            description=method.description.clone().unwrap_or_default()
                        />
                        <ParameterForm
                            parameters=method
                                .parameters
                                .iter()
                                .map(|(name, p)| (name.clone(), p.location == ParameterLocation::Path || p.required, p.description.clone()))
                                .collect()
                            values=param_values
                        />
                    })
                })
            }}

            <SchemaFormView form=form />

            <button
                class="px-4 py-2 bg-blue-600 text-white rounded disabled:opacity-50"
                disabled=move || method_key.get().is_none() || sending.get()
                on:click=on_send
            >
                {move || if sending.get() { "Sending..." } else { "Execute" }}
            </button>

            {move || result.get().map(|outcome| match outcome {
                Ok(response) => view! {
                    <div class={if response.is_success() { "text-green-700" } else { "text-red-600" }}>
                        {format!("{} {}", response.status, response.status_text)}
                    </div>
                }
                .into_any(),
                Err(e) => view! { <div class="text-red-600">{e}</div> }.into_any(),
            })}

            <JsonTreeView tree=response_tree />
        </div>
    }
}

#[component]
fn MethodDetails(http_method: &'static str, path: String, description: String) -> impl IntoView {
    view! {
        <div class="text-sm">
            <span class="font-mono font-bold mr-2">{http_method}</span>
            <span class="font-mono">{path}</span>
            <p class="text-gray-600">{description}</p>
        </div>
    }
}

/// Inputs for the method's parameters: `(name, required, description)`.
#[component]
fn ParameterForm(
    parameters: Vec<(String, bool, Option<String>)>,
    values: RwSignal<BTreeMap<String, String>>,
) -> impl IntoView {
    view! {
        <div class="grid grid-cols-3 gap-2 items-center">
            {parameters
                .into_iter()
                .map(|(name, required, description)| {
                    let key = name.clone();
                    let key_for_input = name.clone();
                    view! {
                        <label class="font-mono text-sm" title=description.unwrap_or_default()>
                            {name}{required.then_some(" *")}
                        </label>
                        <input
                            type="text"
                            class="col-span-2 px-2 py-1 text-sm border border-gray-300 rounded"
                            prop:value=move || values.with(|v| v.get(&key).cloned().unwrap_or_default())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                values.update(|v| {
                                    v.insert(key_for_input.clone(), value);
                                });
                            }
                        />
                    }
                })
                .collect_view()}
        </div>
    }
}
