use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::MouseEvent;

use super::export::{csv_file_name, download_csv};
use super::review::{CONFIRMATION_MS, ReviewDraft, ReviewMode};
use super::selection::{Narrative, Selection};
use crate::config::AppConfig;
use crate::model::{FlowNode, NO_UPSTREAM, NodeRegistry, Role, Trend};
use crate::services::narrative::narrate;

const NO_SAMPLE: &str = "No sample data available for this node.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
	Overview,
	Data,
}

/// Modal drill-down for the selected node. Renders nothing while the
/// selection is empty or points at an unknown id.
#[component]
pub fn DetailView(#[prop(into)] registry: Signal<NodeRegistry>, selection: RwSignal<Selection>) -> impl IntoView {
	let node = Memo::new(move |_| {
		selection.with(|s| {
			s.selected_id()
				.and_then(|id| registry.with(|r| r.find(id).cloned()))
		})
	});

	move || node.get().map(|node| view! { <DetailModal node=node selection=selection /> })
}

#[component]
fn DetailModal(node: FlowNode, selection: RwSignal<Selection>) -> impl IntoView {
	let tab = RwSignal::new(Tab::Overview);
	let close = move |_: MouseEvent| selection.update(|s| s.close());

	view! {
		<div class="modal-backdrop" on:click=close>
			<div class="modal detail-modal" on:click=|ev: MouseEvent| ev.stop_propagation()>
				<header class="modal-header">
					<div>
						<span class="card-kind">{node.kind.label()}</span>
						<span class=format!("status-pill {}", node.status.css_class())>
							{node.status.as_str()}
						</span>
						<h2>{node.label.clone()}</h2>
						<p class="modal-subtitle">{node.description.clone()}</p>
					</div>
					<button class="icon-button" title="Close" on:click=close>
						"×"
					</button>
				</header>

				<nav class="tabs">
					<button
						class=move || if tab.get() == Tab::Overview { "tab active" } else { "tab" }
						on:click=move |_| tab.set(Tab::Overview)
					>
						"Overview"
					</button>
					<button
						class=move || if tab.get() == Tab::Data { "tab active" } else { "tab" }
						on:click=move |_| tab.set(Tab::Data)
					>
						"Data"
					</button>
				</nav>

				<div class="modal-body">
					<div class:hidden=move || tab.get() != Tab::Overview>
						<Overview node=node.clone() selection=selection />
					</div>
					<div class:hidden=move || tab.get() != Tab::Data>
						<SampleData node=node.clone() />
					</div>
				</div>

				<ReviewFooter node_id=node.id.clone() selection=selection />
			</div>
		</div>
	}
}

fn trend_marker(trend: Option<Trend>) -> &'static str {
	match trend {
		Some(Trend::Up) => "▲",
		Some(Trend::Down) => "▼",
		Some(Trend::Stable) => "■",
		None => "",
	}
}

#[component]
fn Overview(node: FlowNode, selection: RwSignal<Selection>) -> impl IntoView {
	let upstream = match node.upstream() {
		Some(inputs) => inputs
			.iter()
			.map(|i| view! { <span class="chip">{i.clone()}</span> })
			.collect_view()
			.into_any(),
		None => view! { <span class="placeholder">{NO_UPSTREAM}</span> }.into_any(),
	};
	let (responsible, last_updated) = node
		.details
		.as_ref()
		.map(|d| (d.responsible.clone(), d.last_updated.clone()))
		.unwrap_or_else(|| ("Unassigned".to_string(), "Unknown".to_string()));
	let issues = node.issues().to_vec();

	view! {
		<div class="overview-grid">
			<section class="panel lineage">
				<h4>"Upstream Sources"</h4>
				<div class="chips">{upstream}</div>
				<h4>"Processing Logic"</h4>
				<p class="logic">{node.logic_text().to_string()}</p>
			</section>

			<section class="panel metadata">
				<dl>
					<dt>"Owner"</dt>
					<dd>{responsible}</dd>
					<dt>"Last Updated"</dt>
					<dd>{last_updated}</dd>
				</dl>
				<ul class="metrics">
					{node
						.metrics
						.iter()
						.map(|m| {
							view! {
								<li>
									<span class="metric-label">{m.label.clone()}</span>
									<span class="metric-value">{m.value.to_string()}</span>
									<span class="metric-trend">{trend_marker(m.trend)}</span>
								</li>
							}
						})
						.collect_view()}
				</ul>
				{(!issues.is_empty())
					.then(|| {
						view! {
							<div class="issues">
								<h4>"Active Issues"</h4>
								<ul>
									{issues
										.into_iter()
										.map(|issue| view! { <li>{issue}</li> })
										.collect_view()}
								</ul>
							</div>
						}
					})}
			</section>

			<NarrativePanel node=node selection=selection />
		</div>
	}
}

#[component]
fn NarrativePanel(node: FlowNode, selection: RwSignal<Selection>) -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();

	let run_analysis = move |_: MouseEvent| {
		let Some(ticket) = selection.try_update(|s| s.begin_narrative()).flatten() else {
			return;
		};
		let (config, node) = (config.clone(), node.clone());
		spawn_local(async move {
			let text = narrate(&config, &node).await;
			// The view may have closed or moved on; the ticket check drops it then.
			selection.try_update(|s| s.resolve_narrative(&ticket, text));
		});
	};

	let narrative = Memo::new(move |_| selection.with(|s| s.narrative().clone()));

	view! {
		<section class="panel narrative">
			<h4>"AI Analysis"</h4>
			{move || match narrative.get() {
				Narrative::Idle => {
					view! {
						<div class="narrative-idle">
							<p>
								"Generate a heuristic analysis of this node's performance and data quality patterns."
							</p>
							<button class="primary" on:click=run_analysis.clone()>
								"Run Analysis"
							</button>
						</div>
					}
						.into_any()
				}
				Narrative::Loading => {
					view! { <div class="narrative-loading">"Analyzing..."</div> }.into_any()
				}
				Narrative::Ready(text) => {
					view! {
						<div class="narrative-ready">
							<p>{text}</p>
							<span class="narrative-note">"Recommendation for human review only."</span>
						</div>
					}
						.into_any()
				}
			}}
		</section>
	}
}

#[component]
fn SampleData(node: FlowNode) -> impl IntoView {
	let Some(table) = node.sample_rows().cloned() else {
		return view! { <p class="placeholder">{NO_SAMPLE}</p> }.into_any();
	};
	let file_name = csv_file_name(&node.label);
	let csv = table.to_csv();
	let export = move |_: MouseEvent| {
		if let Err(e) = download_csv(&file_name, &csv) {
			log::error!("csv export failed: {e:?}");
		}
	};

	view! {
		<div class="sample-data">
			<div class="sample-toolbar">
				<span>{format!("{} sample rows", table.rows.len())}</span>
				<button on:click=export>"Export CSV"</button>
			</div>
			<table>
				<thead>
					<tr>
						{table
							.columns
							.iter()
							.map(|c| view! { <th>{c.clone()}</th> })
							.collect_view()}
					</tr>
				</thead>
				<tbody>
					{(0..table.rows.len())
						.map(|i| {
							view! {
								<tr>
									{table
										.columns
										.iter()
										.map(|c| view! { <td>{table.cell(i, c)}</td> })
										.collect_view()}
								</tr>
							}
						})
						.collect_view()}
				</tbody>
			</table>
		</div>
	}
		.into_any()
}

#[component]
fn ReviewFooter(node_id: String, selection: RwSignal<Selection>) -> impl IntoView {
	let draft = RwSignal::new(ReviewDraft::default());
	let mode = Memo::new(move |_| draft.with(|d| (d.mode, d.confirmed)));

	let confirm = move |_: MouseEvent| {
		if let Some(Err(e)) = draft.try_update(|d| d.confirm()) {
			log::debug!("review not confirmed: {e}");
			return;
		}
		set_timeout(
			move || {
				draft.try_update(|d| d.dismiss());
			},
			Duration::from_millis(CONFIRMATION_MS),
		);
	};

	move || match mode.get() {
		(_, true) => view! { <footer class="modal-footer success">"Request logged for review."</footer> }
			.into_any(),
		(ReviewMode::None, _) => {
			view! {
				<footer class="modal-footer">
					<span class="system-id">{format!("System ID: {node_id}")}</span>
					<div class="footer-actions">
						<button on:click=move |_| draft.update(|d| d.open(ReviewMode::Assign))>"Assign"</button>
						<button on:click=move |_| draft.update(|d| d.open(ReviewMode::Flag))>"Flag"</button>
						<button class="primary" on:click=move |_| selection.update(|s| s.close())>
							"Done"
						</button>
					</div>
				</footer>
			}
				.into_any()
		}
		(current, _) => {
			view! {
				<footer class="modal-footer review">
					<h4>{current.title()}</h4>
					{(current == ReviewMode::Assign)
						.then(|| {
							view! {
								<select on:change=move |ev| {
									if let Some(role) = Role::from_label(&event_target_value(&ev)) {
										draft.update(|d| d.assignee = role);
									}
								}>
									{Role::ALL
										.into_iter()
										.map(|r| {
											view! {
												<option
													value=r.label()
													selected=move || draft.with(|d| d.assignee == r)
												>
													{r.label()}
												</option>
											}
										})
										.collect_view()}
								</select>
							}
						})}
					<input
						type="text"
						placeholder=current.placeholder()
						prop:value=move || draft.with(|d| d.note.clone())
						on:input=move |ev| draft.update(|d| d.note = event_target_value(&ev))
					/>
					<button on:click=move |_| draft.update(|d| d.dismiss())>"Cancel"</button>
					<button
						class="primary"
						disabled=move || !draft.with(|d| d.can_confirm())
						on:click=confirm
					>
						"Confirm"
					</button>
				</footer>
			}
				.into_any()
		}
	}
}
