pub mod builder;
pub mod palette;

pub use builder::{build_flow_graph, FlowEdge, FlowGraph};
pub use palette::{color_for, DEFAULT_NODE_COLOR, LINK_COLOR};
