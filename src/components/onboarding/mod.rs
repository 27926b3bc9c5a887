mod component;
mod flow;

pub use component::ConnectSourceModal;
