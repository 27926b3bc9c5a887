use std::time::Duration;

use leptos::callback::{Callable, Callback};
use leptos::prelude::*;
use web_sys::MouseEvent;

use super::flow::{MAX_TICK_INCREMENT, OnboardingFlow, OnboardingStep, SourceKind, Stamp, TICK_MS};
use crate::model::NodeRegistry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
	Upload,
	Validating,
	Success,
}

impl From<OnboardingStep> for Stage {
	fn from(step: OnboardingStep) -> Self {
		match step {
			OnboardingStep::Upload => Stage::Upload,
			OnboardingStep::Validating { .. } => Stage::Validating,
			OnboardingStep::Success => Stage::Success,
		}
	}
}

fn now_stamp() -> Stamp {
	let date = js_sys::Date::new_0();
	Stamp {
		epoch_ms: date.get_time(),
		local_time: String::from(date.to_locale_time_string("en-US")),
	}
}

/// Connect-source wizard. The validation step is simulated on a timer; on
/// finalize the new source is appended to `registry`.
#[component]
pub fn ConnectSourceModal(
	registry: RwSignal<NodeRegistry>,
	on_close: Callback<()>,
	#[prop(optional)] on_added: Option<Callback<String>>,
) -> impl IntoView {
	let flow = RwSignal::new(OnboardingFlow::default());
	let stage = Memo::new(move |_| Stage::from(flow.with(|f| f.step())));
	let interval = StoredValue::new(None::<IntervalHandle>);

	let stop_ticking = move || {
		if let Some(Some(handle)) = interval.try_get_value() {
			handle.clear();
			interval.set_value(None);
		}
	};
	on_cleanup(stop_ticking);

	let start_validation = move |_: MouseEvent| {
		match flow.try_update(|f| f.submit()) {
			Some(Ok(())) => {}
			Some(Err(e)) => {
				log::debug!("onboarding not started: {e}");
				return;
			}
			None => return,
		}
		let tick = move || {
			let step = flow.try_update(|f| f.tick(js_sys::Math::random() * MAX_TICK_INCREMENT));
			if !matches!(step, Some(OnboardingStep::Validating { .. })) {
				stop_ticking();
			}
		};
		match set_interval_with_handle(tick, Duration::from_millis(TICK_MS.into())) {
			Ok(handle) => interval.set_value(Some(handle)),
			Err(e) => log::error!("could not start validation timer: {e:?}"),
		}
	};

	let finalize = move |_: MouseEvent| {
		let stamp = now_stamp();
		let outcome = registry
			.try_update(|reg| flow.try_update(|f| f.finalize(reg, &stamp)))
			.flatten();
		match outcome {
			Some(Ok(id)) => {
				if let Some(cb) = on_added {
					cb.run(id);
				}
				on_close.run(());
			}
			Some(Err(e)) => log::warn!("onboarding finalize failed: {e}"),
			None => {}
		}
	};

	let close = move |_: MouseEvent| on_close.run(());

	let body = move || match stage.get() {
		Stage::Upload => view! {
			<div class="onboarding-upload">
				<label>
					"Source Name"
					<input
						type="text"
						placeholder="e.g., Q3 Lab Snapshot (Conceptual)"
						prop:value=move || flow.with(|f| f.name().to_string())
						on:input=move |ev| flow.update(|f| f.set_name(event_target_value(&ev)))
					/>
				</label>
				<div class="source-kinds">
					<button
						class=move || kind_class(flow.with(|f| f.kind()) == SourceKind::Lab)
						on:click=move |_| flow.update(|f| f.set_kind(SourceKind::Lab))
					>
						"Lab File (Sample)"
					</button>
					<button
						class=move || kind_class(flow.with(|f| f.kind()) == SourceKind::ExternalDb)
						on:click=move |_| flow.update(|f| f.set_kind(SourceKind::ExternalDb))
					>
						"Ext. DB (Config)"
					</button>
				</div>
			</div>
		}
		.into_any(),
		Stage::Validating => view! {
			<div class="onboarding-validating">
				<div class="progress-value">
					{move || format!("{}%", flow.with(|f| f.progress()).round())}
				</div>
				<div class="progress-track">
					<div
						class="progress-bar"
						style=move || format!("width: {}%;", flow.with(|f| f.progress()))
					></div>
				</div>
				<ul class="checkpoints">
					{move || {
						flow.with(|f| f.checkpoints())
							.into_iter()
							.map(|(label, done)| {
								view! { <li class:done=done>{label}</li> }
							})
							.collect_view()
					}}
				</ul>
			</div>
		}
		.into_any(),
		Stage::Success => view! {
			<div class="onboarding-success">
				<h3>"Snapshot Mapped"</h3>
				<p>"The conceptual dataset has been mapped to the data flow for lineage tracing."</p>
			</div>
		}
		.into_any(),
	};

	let footer = move || match stage.get() {
		Stage::Upload => view! {
			<button on:click=close>"Cancel"</button>
			<button
				class="primary"
				disabled=move || !flow.with(|f| f.can_submit())
				on:click=start_validation
			>
				"Validate & Map"
			</button>
		}
		.into_any(),
		Stage::Validating => view! { <span class="hint">"Validating..."</span> }.into_any(),
		Stage::Success => view! {
			<button class="primary" on:click=finalize>
				"Add to Data Flow"
			</button>
		}
		.into_any(),
	};

	view! {
		<div class="modal-backdrop" on:click=close>
			<div class="modal connect-modal" on:click=|ev: MouseEvent| ev.stop_propagation()>
				<header class="modal-header">
					<h2>"Connect Data Source"</h2>
					<button class="icon-button" title="Close" on:click=close>
						"×"
					</button>
				</header>
				<p class="disclaimer">
					"This workflow demonstrates conceptual onboarding of new datasets for insight generation. It does not process live PII or execute real ETL."
				</p>
				<div class="modal-body">{body}</div>
				<footer class="modal-footer">{footer}</footer>
			</div>
		</div>
	}
}

fn kind_class(active: bool) -> &'static str {
	if active { "kind-option active" } else { "kind-option" }
}
