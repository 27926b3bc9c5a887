/// State of the generated narrative for the open node.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Narrative {
	#[default]
	Idle,
	Loading,
	Ready(String),
}

/// Identifies one narrative request. A result is applied only while its
/// ticket is still current.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NarrativeTicket {
	pub node_id: String,
	seq: u64,
}

/// Which node's detail view is open, plus its narrative.
///
/// `seq` increases on every select, close and request, so a result that
/// arrives after the view moved on no longer matches and is dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
	selected: Option<String>,
	seq: u64,
	narrative: Narrative,
}

impl Selection {
	pub fn selected_id(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	pub fn is_selected(&self, id: &str) -> bool {
		self.selected.as_deref() == Some(id)
	}

	pub fn narrative(&self) -> &Narrative {
		&self.narrative
	}

	pub fn select(&mut self, id: impl Into<String>) {
		let id = id.into();
		if self.is_selected(&id) {
			return;
		}
		self.selected = Some(id);
		self.seq += 1;
		self.narrative = Narrative::Idle;
	}

	pub fn close(&mut self) {
		self.selected = None;
		self.seq += 1;
		self.narrative = Narrative::Idle;
	}

	/// Start a narrative request for the open node. `None` when nothing is
	/// open or a request is already pending.
	pub fn begin_narrative(&mut self) -> Option<NarrativeTicket> {
		let node_id = self.selected.clone()?;
		if self.narrative == Narrative::Loading {
			return None;
		}
		self.seq += 1;
		self.narrative = Narrative::Loading;
		Some(NarrativeTicket {
			node_id,
			seq: self.seq,
		})
	}

	/// Apply a finished request. Returns false, changing nothing, for a
	/// stale ticket.
	pub fn resolve_narrative(&mut self, ticket: &NarrativeTicket, text: String) -> bool {
		if ticket.seq != self.seq || !self.is_selected(&ticket.node_id) {
			log::debug!("discarding stale narrative for {}", ticket.node_id);
			return false;
		}
		self.narrative = Narrative::Ready(text);
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn select_and_close() {
		let mut sel = Selection::default();
		assert_eq!(sel.selected_id(), None);
		sel.select("src-1");
		assert!(sel.is_selected("src-1"));
		sel.close();
		assert_eq!(sel.selected_id(), None);
		assert_eq!(sel.narrative(), &Narrative::Idle);
	}

	#[test]
	fn narrative_needs_an_open_node() {
		let mut sel = Selection::default();
		assert!(sel.begin_narrative().is_none());
	}

	#[test]
	fn current_ticket_resolves() {
		let mut sel = Selection::default();
		sel.select("out-2");
		let ticket = sel.begin_narrative().unwrap();
		assert_eq!(sel.narrative(), &Narrative::Loading);
		assert!(sel.resolve_narrative(&ticket, "The data suggests...".into()));
		assert_eq!(sel.narrative(), &Narrative::Ready("The data suggests...".into()));
	}

	#[test]
	fn second_request_while_pending_is_ignored() {
		let mut sel = Selection::default();
		sel.select("out-2");
		let first = sel.begin_narrative().unwrap();
		assert!(sel.begin_narrative().is_none());
		assert!(sel.resolve_narrative(&first, "ok".into()));
	}

	#[test]
	fn result_after_close_is_discarded() {
		let mut sel = Selection::default();
		sel.select("out-2");
		let ticket = sel.begin_narrative().unwrap();
		sel.close();
		assert!(!sel.resolve_narrative(&ticket, "late".into()));
		assert_eq!(sel.narrative(), &Narrative::Idle);
	}

	#[test]
	fn result_for_reopened_node_only_counts_latest_request() {
		let mut sel = Selection::default();
		sel.select("out-2");
		let old = sel.begin_narrative().unwrap();
		sel.close();
		sel.select("out-2");
		let new = sel.begin_narrative().unwrap();
		assert!(!sel.resolve_narrative(&old, "old".into()));
		assert_eq!(sel.narrative(), &Narrative::Loading);
		assert!(sel.resolve_narrative(&new, "new".into()));
		assert_eq!(sel.narrative(), &Narrative::Ready("new".into()));
	}

	#[test]
	fn switching_nodes_drops_pending_result() {
		let mut sel = Selection::default();
		sel.select("a");
		let ticket = sel.begin_narrative().unwrap();
		sel.select("b");
		assert!(!sel.resolve_narrative(&ticket, "for a".into()));
		assert_eq!(sel.narrative(), &Narrative::Idle);
	}

	#[test]
	fn reselecting_same_node_keeps_narrative() {
		let mut sel = Selection::default();
		sel.select("a");
		let ticket = sel.begin_narrative().unwrap();
		sel.select("a");
		assert!(sel.resolve_narrative(&ticket, "kept".into()));
	}
}
