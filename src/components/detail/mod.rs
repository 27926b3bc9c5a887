mod component;
mod export;
mod review;
mod selection;

pub use component::DetailView;
pub use selection::Selection;
