pub mod detail;
pub mod flow_canvas;
pub mod insight_panel;
pub mod onboarding;
pub mod top_nav;
