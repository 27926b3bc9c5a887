use leptos::prelude::*;
use trial_flow_canvas::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App)
}
