//! Domain records shared by every view: nodes, roles, the registry and its seed.

mod node;
mod registry;
mod role;
mod seed;

pub use node::{
	FlowNode, HealthStatus, InsightCard, Metric, NO_UPSTREAM, NodeDetails, NodeKind, SampleTable,
	Scalar, Trend,
};
pub use registry::NodeRegistry;
pub use role::Role;
pub use seed::Seed;
