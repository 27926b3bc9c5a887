use thiserror::Error;

use super::node::{FlowNode, NodeKind};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
	#[error("node id `{0}` is already registered")]
	DuplicateId(String),
}

/// Append-only, insertion-ordered collection of nodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeRegistry {
	nodes: Vec<FlowNode>,
}

impl NodeRegistry {
	/// Build from a seed list. Later duplicates of an id are dropped.
	pub fn from_nodes(nodes: impl IntoIterator<Item = FlowNode>) -> Self {
		let mut registry = Self::default();
		for node in nodes {
			if let Err(e) = registry.add(node) {
				log::warn!("skipping seed node: {e}");
			}
		}
		registry
	}

	pub fn add(&mut self, node: FlowNode) -> Result<&[FlowNode], RegistryError> {
		if self.contains(&node.id) {
			return Err(RegistryError::DuplicateId(node.id));
		}
		self.nodes.push(node);
		Ok(&self.nodes)
	}

	pub fn find(&self, id: &str) -> Option<&FlowNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn contains(&self, id: &str) -> bool {
		self.find(id).is_some()
	}

	pub fn of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &FlowNode> {
		self.nodes.iter().filter(move |n| n.kind == kind)
	}

	#[cfg(test)]
	pub fn iter(&self) -> impl Iterator<Item = &FlowNode> {
		self.nodes.iter()
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::node::HealthStatus;

	fn node(id: &str, kind: NodeKind) -> FlowNode {
		FlowNode {
			id: id.into(),
			label: id.to_uppercase(),
			kind,
			status: HealthStatus::Healthy,
			description: String::new(),
			role_relevance: vec![],
			inputs: None,
			logic: None,
			metrics: vec![],
			details: None,
			sample: None,
		}
	}

	#[test]
	fn add_appends_in_order() {
		let mut reg = NodeRegistry::default();
		reg.add(node("a", NodeKind::Source)).unwrap();
		let all = reg.add(node("b", NodeKind::Engine)).unwrap();
		let ids: Vec<_> = all.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["a", "b"]);
		assert_eq!(reg.len(), 2);
	}

	#[test]
	fn duplicate_id_is_rejected_without_growth() {
		let mut reg = NodeRegistry::from_nodes([node("a", NodeKind::Source)]);
		let err = reg.add(node("a", NodeKind::Insight)).unwrap_err();
		assert_eq!(err, RegistryError::DuplicateId("a".into()));
		assert_eq!(reg.len(), 1);
		assert_eq!(reg.find("a").unwrap().kind, NodeKind::Source);
	}

	#[test]
	fn seed_duplicates_are_skipped() {
		let reg = NodeRegistry::from_nodes([
			node("a", NodeKind::Source),
			node("a", NodeKind::Engine),
			node("b", NodeKind::Engine),
		]);
		assert_eq!(reg.len(), 2);
		assert_eq!(reg.of_kind(NodeKind::Engine).count(), 1);
	}

	#[test]
	fn find_misses_unknown_id() {
		let reg = NodeRegistry::default();
		assert!(reg.is_empty());
		assert!(reg.find("ghost").is_none());
	}
}
