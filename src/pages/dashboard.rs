use leptos::callback::Callback;
use leptos::prelude::*;

use crate::components::detail::{DetailView, Selection};
use crate::components::flow_canvas::FlowCanvas;
use crate::components::insight_panel::InsightPanel;
use crate::components::onboarding::ConnectSourceModal;
use crate::components::top_nav::TopNav;
use crate::model::{Role, Seed};

/// Owns the page-level state (registry, active role, selection, open
/// panels) and wires it into the child views.
#[component]
pub fn Dashboard() -> impl IntoView {
	let (nodes, insights) = Seed::embedded().into_parts();
	if nodes.is_empty() {
		log::warn!("dashboard started with an empty registry");
	} else {
		log::info!("dashboard seeded with {} nodes and {} insights", nodes.len(), insights.len());
	}

	let registry = RwSignal::new(nodes);
	let role = RwSignal::new(Role::default());
	let selection = RwSignal::new(Selection::default());
	let connect_open = RwSignal::new(false);
	let insights_open = RwSignal::new(true);

	let on_select = Callback::new(move |id: String| selection.update(|s| s.select(id)));
	let on_connect = Callback::new(move |_: ()| connect_open.set(true));
	let on_close_connect = Callback::new(move |_: ()| connect_open.set(false));
	let on_added = Callback::new(move |id: String| log::info!("source {id} added to the data flow"));
	let selected = Signal::derive(move || selection.with(|s| s.selected_id().map(str::to_string)));

	view! {
		<div class="dashboard">
			<TopNav role=role on_connect=on_connect />
			<main class="dashboard-body">
				<FlowCanvas registry=registry role=role selected=selected on_select=on_select />
				<InsightPanel insights=insights open=insights_open on_select=on_select />
			</main>
			<DetailView registry=registry selection=selection />
			<Show when=move || connect_open.get()>
				<ConnectSourceModal registry=registry on_close=on_close_connect on_added=on_added />
			</Show>
		</div>
	}
}
