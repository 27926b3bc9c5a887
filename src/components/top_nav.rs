use leptos::callback::{Callable, Callback};
use leptos::prelude::*;

use crate::model::Role;

/// Header bar: product title, active-role picker and the connect button.
#[component]
pub fn TopNav(role: RwSignal<Role>, on_connect: Callback<()>) -> impl IntoView {
	let on_role_change = move |ev: leptos::ev::Event| match Role::from_label(&event_target_value(&ev)) {
		Some(next) => role.set(next),
		None => log::warn!("unknown role selected: {}", event_target_value(&ev)),
	};

	view! {
		<nav class="top-nav">
			<div class="brand">
				<span class="brand-title">"Trial Flow Canvas"</span>
				<span class="brand-subtitle">"Clinical data observability"</span>
			</div>
			<div class="nav-actions">
				<label class="role-picker">
					<span>"View as"</span>
					<select on:change=on_role_change>
						{Role::ALL
							.into_iter()
							.map(|r| {
								view! {
									<option value=r.label() selected=move || role.get() == r>
										{r.label()}
									</option>
								}
							})
							.collect_view()}
					</select>
				</label>
				<button class="primary" on:click=move |_| on_connect.run(())>
					"Connect Source"
				</button>
			</div>
		</nav>
	}
}
