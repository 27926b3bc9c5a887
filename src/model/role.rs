use std::fmt;

use serde::{Deserialize, Serialize};

use super::node::FlowNode;

/// The viewer's job function. Drives highlighting only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
	#[default]
	Executive,
	#[serde(rename = "Data Manager")]
	DataManager,
	#[serde(rename = "CRA")]
	Cra,
	Safety,
}

impl Role {
	pub const ALL: [Role; 4] = [Role::Executive, Role::DataManager, Role::Cra, Role::Safety];

	pub fn label(self) -> &'static str {
		match self {
			Role::Executive => "Executive",
			Role::DataManager => "Data Manager",
			Role::Cra => "CRA",
			Role::Safety => "Safety",
		}
	}

	pub fn from_label(label: &str) -> Option<Role> {
		Role::ALL.into_iter().find(|r| r.label() == label)
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// True iff `role` is listed in the node's relevance set.
pub fn is_relevant(node: &FlowNode, role: Role) -> bool {
	node.role_relevance.contains(&role)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::node::{HealthStatus, NodeKind};

	fn node_for(roles: Vec<Role>) -> FlowNode {
		FlowNode {
			id: "n".into(),
			label: "n".into(),
			kind: NodeKind::Insight,
			status: HealthStatus::Healthy,
			description: String::new(),
			role_relevance: roles,
			inputs: None,
			logic: None,
			metrics: vec![],
			details: None,
			sample: None,
		}
	}

	#[test]
	fn relevance_is_membership() {
		let node = node_for(vec![Role::Cra, Role::Executive]);
		assert!(is_relevant(&node, Role::Cra));
		assert!(is_relevant(&node, Role::Executive));
		assert!(!is_relevant(&node, Role::Safety));
		assert!(!is_relevant(&node, Role::DataManager));
	}

	#[test]
	fn empty_relevance_matches_nothing() {
		let node = node_for(vec![]);
		assert!(Role::ALL.iter().all(|r| !node.is_relevant(*r)));
	}

	#[test]
	fn labels_round_trip_through_lookup() {
		for role in Role::ALL {
			assert_eq!(Role::from_label(role.label()), Some(role));
		}
		assert_eq!(Role::from_label("Sponsor"), None);
	}
}
