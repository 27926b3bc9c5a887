use leptos::callback::{Callable, Callback};
use leptos::prelude::*;

use crate::model::InsightCard;

/// Collapsible side panel listing the seeded insights. Clicking a card
/// selects the node it was derived from.
#[component]
pub fn InsightPanel(insights: Vec<InsightCard>, open: RwSignal<bool>, on_select: Callback<String>) -> impl IntoView {
	let count = insights.len();
	let cards = insights
		.into_iter()
		.map(|card| {
			let related = card.related_node_id.clone();
			view! {
				<article class="insight-card" on:click=move |_| on_select.run(related.clone())>
					<header>
						<span class=format!("status-pill {}", card.severity.css_class())>
							{card.kind.label()}
						</span>
						<span class="confidence">{format!("{}% confidence", card.confidence_percent())}</span>
					</header>
					<h3>{card.title}</h3>
					<p>{card.description}</p>
					<p class="recommendation">{card.recommendation}</p>
				</article>
			}
		})
		.collect_view();

	view! {
		<aside class=move || if open.get() { "insight-panel open" } else { "insight-panel" }>
			<button class="panel-toggle" on:click=move |_| open.update(|o| *o = !*o)>
				{move || if open.get() { "Hide Insights".to_string() } else { format!("Insights ({count})") }}
			</button>
			<div class="insight-list" class:hidden=move || !open.get()>
				{cards}
			</div>
		</aside>
	}
}
