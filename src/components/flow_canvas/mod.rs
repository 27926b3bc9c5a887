mod component;
mod layout;
mod viewport;

pub use component::FlowCanvas;
