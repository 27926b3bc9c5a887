use leptos::callback::{Callable, Callback};
use leptos::ev;
use leptos::prelude::*;
use web_sys::{Element, MouseEvent, WheelEvent};

use super::layout::{self, Lane};
use super::viewport::{CONTENT_HEIGHT, CONTENT_WIDTH, MAX_ZOOM, MIN_ZOOM, ViewportState};
use crate::model::{FlowNode, HealthStatus, NodeKind, NodeRegistry, Role};

fn local_point(el: &Element, ev: &MouseEvent) -> (f64, f64) {
	let rect = el.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Pannable, zoomable canvas with the three node lanes.
#[component]
pub fn FlowCanvas(
	#[prop(into)] registry: Signal<NodeRegistry>,
	#[prop(into)] role: Signal<Role>,
	#[prop(into)] selected: Signal<Option<String>>,
	on_select: Callback<String>,
) -> impl IntoView {
	let viewport_ref = NodeRef::<leptos::html::Div>::new();
	let viewport = RwSignal::new(ViewportState::default());

	Effect::new(move |_| {
		let Some(el) = viewport_ref.get() else {
			return;
		};
		let (w, h) = (el.client_width() as f64, el.client_height() as f64);
		viewport.update(|v| v.initialize(w, h));
	});

	// Removed on unmount; the listener must not outlive the viewport signal.
	let resize_listener = window_event_listener(ev::resize, move |_| {
		let Some(el) = viewport_ref.get_untracked() else {
			return;
		};
		let (w, h) = (el.client_width() as f64, el.client_height() as f64);
		viewport.try_update(|v| v.resize(w, h));
	});
	on_cleanup(move || resize_listener.remove());

	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let Some(el) = viewport_ref.get_untracked() else {
			return;
		};
		let (x, y) = local_point(&el, &ev);
		viewport.update(|v| v.begin_drag(x, y));
	};

	let on_mousemove = move |ev: MouseEvent| {
		if !viewport.with_untracked(|v| v.is_dragging()) {
			return;
		}
		let Some(el) = viewport_ref.get_untracked() else {
			return;
		};
		let (x, y) = local_point(&el, &ev);
		viewport.maybe_update(|v| v.drag_to(x, y));
	};

	let on_mouseup = move |_: MouseEvent| {
		if viewport.with_untracked(|v| v.is_dragging()) {
			viewport.update(|v| v.end_drag());
		}
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(el) = viewport_ref.get_untracked() else {
			return;
		};
		let (x, y) = local_point(&el, &ev);
		let (delta, pinch) = (ev.delta_y(), ev.ctrl_key());
		viewport.maybe_update(|v| v.wheel(x, y, delta, pinch));
	};

	let lanes = move || {
		registry.with(layout::lanes)
			.into_iter()
			.enumerate()
			.map(|(i, (lane, nodes))| {
				view! {
					{(i > 0).then(|| view! { <div class="connection-pipe" aria-hidden="true"></div> })}
					<LaneColumn lane=lane nodes=nodes role=role selected=selected on_select=on_select />
				}
			})
			.collect_view()
	};

	view! {
		<div class="flow-canvas">
			<div class="canvas-heading">
				<h2>"Data Observability"</h2>
				<p>"Visualization of data flows & engines."</p>
			</div>

			<div
				node_ref=viewport_ref
				class=move || {
					if viewport.with(|v| v.is_dragging()) {
						"flow-viewport dragging"
					} else {
						"flow-viewport"
					}
				}
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseup
				on:wheel=on_wheel
				style=move || viewport.with(|v| grid_style(v.pan().x, v.pan().y, v.zoom()))
			>
				<div
					class="flow-content"
					style=move || {
						format!(
							"transform: {}; width: {}px; height: {}px;",
							viewport.with(|v| v.transform_css()),
							CONTENT_WIDTH,
							CONTENT_HEIGHT,
						)
					}
				>
					{lanes}
				</div>
			</div>

			<div class="zoom-controls">
				<button
					title="Zoom In"
					disabled=move || viewport.with(|v| v.zoom() >= MAX_ZOOM)
					on:click=move |_| {
						viewport.maybe_update(|v| v.zoom_in());
					}
				>
					"+"
				</button>
				<button
					class="zoom-readout"
					title="Reset View"
					on:click=move |_| viewport.update(|v| v.reset())
				>
					{move || format!("{}%", viewport.with(|v| v.zoom_percent()))}
				</button>
				<button
					title="Zoom Out"
					disabled=move || viewport.with(|v| v.zoom() <= MIN_ZOOM)
					on:click=move |_| {
						viewport.maybe_update(|v| v.zoom_out());
					}
				>
					"−"
				</button>
			</div>

			<div class="canvas-legend">
				<div class="legend-statuses">
					{HealthStatus::ALL
						.into_iter()
						.map(|s| {
							view! {
								<span class="legend-item">
									<span class=format!("legend-dot {}", s.css_class())></span>
									{status_title(s)}
								</span>
							}
						})
						.collect_view()}
				</div>
				<span class="legend-readout">{move || viewport.with(|v| v.readout())}</span>
			</div>
		</div>
	}
}

/// Dot-grid background that moves and scales with the content.
fn grid_style(pan_x: f64, pan_y: f64, zoom: f64) -> String {
	let cell = 24.0 * zoom;
	format!("background-position: {pan_x}px {pan_y}px; background-size: {cell}px {cell}px;")
}

fn status_title(status: HealthStatus) -> &'static str {
	match status {
		HealthStatus::Healthy => "Healthy",
		HealthStatus::Warning => "Warning",
		HealthStatus::Critical => "Critical",
	}
}

#[component]
fn LaneColumn(
	lane: Lane,
	nodes: Vec<FlowNode>,
	role: Signal<Role>,
	selected: Signal<Option<String>>,
	on_select: Callback<String>,
) -> impl IntoView {
	view! {
		<section class="lane">
			<h2 class="lane-title">{lane.title()}</h2>
			<div class="lane-cards">
				{nodes
					.into_iter()
					.map(|node| view! { <NodeCard node=node role=role selected=selected on_select=on_select /> })
					.collect_view()}
			</div>
		</section>
	}
}

fn card_class(selected: bool, relevant: bool, kind: NodeKind) -> String {
	let mut class = String::from("node-card");
	if selected {
		class.push_str(" selected");
	}
	if !relevant {
		class.push_str(" dimmed");
	}
	if kind == NodeKind::Engine {
		class.push_str(" processing");
	}
	class
}

#[component]
fn NodeCard(
	node: FlowNode,
	role: Signal<Role>,
	selected: Signal<Option<String>>,
	on_select: Callback<String>,
) -> impl IntoView {
	let id = node.id.clone();
	let (card_id, card) = (node.id.clone(), node.clone());
	let relevant = Signal::derive(move || card.is_relevant(role.get()));
	let is_selected = Signal::derive(move || selected.with(|s| s.as_deref() == Some(card_id.as_str())));
	let kind = node.kind;
	let metric = node.primary_metric().cloned();

	view! {
		<div
			class=move || card_class(is_selected.get(), relevant.get(), kind)
			on:mousedown=|ev: MouseEvent| ev.stop_propagation()
			on:click=move |_| on_select.run(id.clone())
		>
			<Show when=move || relevant.get()>
				<div class="relevance-badge">"RELEVANT"</div>
			</Show>
			<div class="card-header">
				<span class="card-kind">{kind.label()}</span>
				<h3 class="card-title">{node.label.clone()}</h3>
			</div>
			<p class="card-description">{node.description.clone()}</p>
			<div class="card-footer">
				<span class=format!("status-pill {}", node.status.css_class())>{node.status.as_str()}</span>
				{metric
					.map(|m| {
						view! {
							<div class="card-metric">
								<span class="metric-label">{m.label}</span>
								<span class="metric-value">{m.value.to_string()}</span>
							</div>
						}
					})}
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn grid_follows_pan_and_zoom() {
		assert_eq!(
			grid_style(-80.0, -60.0, 1.5),
			"background-position: -80px -60px; background-size: 36px 36px;"
		);
	}

	#[test]
	fn card_class_marks_state() {
		assert_eq!(card_class(false, true, NodeKind::Source), "node-card");
		assert_eq!(
			card_class(true, false, NodeKind::Engine),
			"node-card selected dimmed processing"
		);
	}
}
