use crate::api;
use crate::types::{DeepLink, ServiceSummary};
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

/// Landing page: the loaded services. A deep-link fragment naming a service
/// is forwarded to that service's explorer page.
#[component]
pub fn Services() -> impl IntoView {
    let services = LocalResource::new(|| async move { api::list_services().await.ok() });

    let navigate = use_navigate();
    Effect::new(move |_| {
        let hash = window().location().hash().unwrap_or_default();
        let link = DeepLink::parse(&hash);
        if let (Some(service), Some(version)) = (link.service, link.version) {
            navigate(
                &format!("/services/{}/{}{}", service, version, hash),
                Default::default(),
            );
        }
    });

    view! {
        <div class="p-6">
            <h2 class="text-2xl font-bold mb-6">"APIs"</h2>
            <Suspense fallback=move || view! { <LoadingState /> }>
                {move || {
                    services.get().map(|data| {
                        match data {
                            Some(list) if !list.is_empty() => view! { <ServiceTable services=list /> }.into_any(),
                            Some(_) => view! { <EmptyState /> }.into_any(),
                            None => view! { <ErrorState /> }.into_any(),
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn ServiceTable(services: Vec<ServiceSummary>) -> impl IntoView {
    view! {
        <table class="min-w-full bg-white rounded shadow">
            <thead class="bg-gray-50 text-left text-xs text-gray-500 uppercase">
                <tr>
                    <th class="px-4 py-2">"Service"</th>
                    <th class="px-4 py-2">"Description"</th>
                    <th class="px-4 py-2">"Methods"</th>
                </tr>
            </thead>
            <tbody>
                {services
                    .into_iter()
                    .map(|service| {
                        let href = format!("/services/{}/{}", service.name, service.version);
                        let display_name = service.display_name();
                        view! {
                            <tr class="border-t">
                                <td class="px-4 py-2">
                                    <A href=href attr:class="text-blue-600 hover:underline">
                                        {display_name}
                                    </A>
                                </td>
                                <td class="px-4 py-2 text-sm text-gray-600">
                                    {service.description.clone().unwrap_or_default()}
                                </td>
                                <td class="px-4 py-2 text-sm">{service.methods}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

#[component]
fn LoadingState() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-blue-500"></div>
            <span class="ml-3 text-gray-500">"Loading services..."</span>
        </div>
    }
}

#[component]
fn EmptyState() -> impl IntoView {
    view! {
        <div class="text-center py-12 text-gray-500">
            "No discovery documents loaded. Add JSON or YAML documents to the discovery directory."
        </div>
    }
}

#[component]
fn ErrorState() -> impl IntoView {
    view! {
        <div class="text-center py-12 text-red-600">"Failed to load services."</div>
    }
}
