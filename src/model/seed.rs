use serde::Deserialize;

use super::node::{FlowNode, InsightCard};
use super::registry::NodeRegistry;

const SEED_JSON: &str = include_str!("seed.json");

/// The dataset the dashboard starts from.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Seed {
	pub nodes: Vec<FlowNode>,
	#[serde(default)]
	pub insights: Vec<InsightCard>,
}

impl Seed {
	pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// The embedded seed. A malformed document is logged and yields an empty
	/// dashboard rather than a crash.
	pub fn embedded() -> Self {
		match Self::parse(SEED_JSON) {
			Ok(seed) => seed,
			Err(e) => {
				log::error!("embedded seed is malformed: {e}");
				Self::default()
			}
		}
	}

	pub fn into_parts(self) -> (NodeRegistry, Vec<InsightCard>) {
		(NodeRegistry::from_nodes(self.nodes), self.insights)
	}
}
