mod builder;
mod component;
mod render;
mod state;
mod tooltip;
mod types;

pub use builder::build_graph;
pub use component::ReviewGraph;
pub use render::node_fill;
pub use types::{Group, ReviewRecord, Tone};
