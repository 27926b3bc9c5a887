use crate::model::{FlowNode, NodeKind, NodeRegistry};

/// One of the three fixed columns of the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lane {
	Sources,
	Engines,
	Insights,
}

impl Lane {
	pub const ALL: [Lane; 3] = [Lane::Sources, Lane::Engines, Lane::Insights];

	pub fn kind(self) -> NodeKind {
		match self {
			Lane::Sources => NodeKind::Source,
			Lane::Engines => NodeKind::Engine,
			Lane::Insights => NodeKind::Insight,
		}
	}

	pub fn title(self) -> &'static str {
		match self {
			Lane::Sources => "Data Sources",
			Lane::Engines => "Processing Engines",
			Lane::Insights => "Actionable Insights",
		}
	}
}

/// Nodes of each lane in registry order, lanes left to right.
pub fn lanes(registry: &NodeRegistry) -> [(Lane, Vec<FlowNode>); 3] {
	Lane::ALL.map(|lane| (lane, registry.of_kind(lane.kind()).cloned().collect()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::Seed;

	#[test]
	fn every_node_lands_in_its_kind_lane() {
		let (registry, _) = Seed::embedded().into_parts();
		let grouped = lanes(&registry);
		let total: usize = grouped.iter().map(|(_, nodes)| nodes.len()).sum();
		assert_eq!(total, registry.len());
		for (lane, nodes) in &grouped {
			assert!(nodes.iter().all(|n| n.kind == lane.kind()));
		}
	}

	#[test]
	fn lane_order_is_fixed_and_preserves_insertion() {
		let (registry, _) = Seed::embedded().into_parts();
		let grouped = lanes(&registry);
		let titles: Vec<_> = grouped.iter().map(|(l, _)| l.title()).collect();
		assert_eq!(titles, ["Data Sources", "Processing Engines", "Actionable Insights"]);
		let source_ids: Vec<_> = grouped[0].1.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(source_ids, ["src-1", "src-2", "src-3", "src-4", "src-5"]);
	}
}
