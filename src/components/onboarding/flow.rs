use std::collections::HashMap;

use thiserror::Error;

use crate::model::{
	FlowNode, HealthStatus, Metric, NodeDetails, NodeKind, NodeRegistry, Role, SampleTable,
	Scalar, Trend,
};

/// Interval between validation ticks.
pub const TICK_MS: u32 = 300;
/// Upper bound of the random progress increment per tick.
pub const MAX_TICK_INCREMENT: f64 = 15.0;

pub const CHECKPOINTS: [(f64, &str); 3] = [
	(20.0, "Visualizing Data Stream..."),
	(50.0, "Verifying Schema Match..."),
	(80.0, "Calculating Quality Metrics..."),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SourceKind {
	#[default]
	Lab,
	ExternalDb,
}

impl SourceKind {
	fn describe(self) -> &'static str {
		match self {
			SourceKind::Lab => "Laboratory",
			SourceKind::ExternalDb => "External DB",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OnboardingStep {
	Upload,
	Validating { progress: f64 },
	Success,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OnboardingError {
	#[error("a source name is required")]
	MissingName,
	#[error("validation already started")]
	AlreadySubmitted,
	#[error("validation has not finished")]
	NotReady,
}

/// Wall-clock reading supplied by the caller at finalize time.
#[derive(Clone, Debug, PartialEq)]
pub struct Stamp {
	pub epoch_ms: f64,
	pub local_time: String,
}

/// The connect-source wizard: name a snapshot, watch a simulated
/// validation, then append it to the registry.
#[derive(Clone, Debug, PartialEq)]
pub struct OnboardingFlow {
	step: OnboardingStep,
	name: String,
	kind: SourceKind,
}

impl Default for OnboardingFlow {
	fn default() -> Self {
		Self {
			step: OnboardingStep::Upload,
			name: String::new(),
			kind: SourceKind::default(),
		}
	}
}

impl OnboardingFlow {
	pub fn step(&self) -> OnboardingStep {
		self.step
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn kind(&self) -> SourceKind {
		self.kind
	}

	pub fn set_name(&mut self, name: impl Into<String>) {
		if self.step == OnboardingStep::Upload {
			self.name = name.into();
		}
	}

	pub fn set_kind(&mut self, kind: SourceKind) {
		if self.step == OnboardingStep::Upload {
			self.kind = kind;
		}
	}

	pub fn can_submit(&self) -> bool {
		self.step == OnboardingStep::Upload && !self.name.trim().is_empty()
	}

	pub fn submit(&mut self) -> Result<(), OnboardingError> {
		if self.step != OnboardingStep::Upload {
			return Err(OnboardingError::AlreadySubmitted);
		}
		if self.name.trim().is_empty() {
			return Err(OnboardingError::MissingName);
		}
		self.step = OnboardingStep::Validating { progress: 0.0 };
		Ok(())
	}

	/// Advance validation by `increment` percent. Progress stops at exactly
	/// 100; the tick after that moves to `Success`. Negative or NaN
	/// increments count as zero.
	pub fn tick(&mut self, increment: f64) -> OnboardingStep {
		if let OnboardingStep::Validating { progress } = self.step {
			self.step = if progress >= 100.0 {
				OnboardingStep::Success
			} else {
				let inc = if increment.is_nan() { 0.0 } else { increment.max(0.0) };
				OnboardingStep::Validating {
					progress: (progress + inc).min(100.0),
				}
			};
		}
		self.step
	}

	pub fn progress(&self) -> f64 {
		match self.step {
			OnboardingStep::Upload => 0.0,
			OnboardingStep::Validating { progress } => progress,
			OnboardingStep::Success => 100.0,
		}
	}

	/// Checkpoint labels with whether each has been passed.
	pub fn checkpoints(&self) -> [(&'static str, bool); 3] {
		let progress = self.progress();
		CHECKPOINTS.map(|(at, label)| (label, progress > at))
	}

	/// Append the onboarded snapshot to `registry` and return its id.
	pub fn finalize(
		&mut self,
		registry: &mut NodeRegistry,
		stamp: &Stamp,
	) -> Result<String, OnboardingError> {
		if self.step != OnboardingStep::Success {
			return Err(OnboardingError::NotReady);
		}
		let id = snapshot_id(stamp.epoch_ms, registry);
		let node = self.snapshot_node(id.clone(), &stamp.local_time);
		// `snapshot_id` already avoided every registered id.
		if let Err(e) = registry.add(node) {
			log::error!("onboarded node rejected: {e}");
			return Err(OnboardingError::NotReady);
		}
		log::info!("onboarded source `{}` as {id}", self.name.trim());
		*self = Self::default();
		Ok(id)
	}

	fn snapshot_node(&self, id: String, local_time: &str) -> FlowNode {
		let row = |cells: [(&str, &str); 5]| -> HashMap<String, Scalar> {
			cells
				.into_iter()
				.map(|(k, v)| (k.to_string(), Scalar::from(v)))
				.collect()
		};
		FlowNode {
			id,
			label: self.name.trim().to_string(),
			kind: NodeKind::Source,
			status: HealthStatus::Healthy,
			description: format!(
				"Snapshot Data: {} import. Conceptual onboarding for lineage tracing.",
				self.kind.describe()
			),
			role_relevance: vec![Role::DataManager, Role::Cra],
			inputs: None,
			logic: None,
			metrics: vec![Metric {
				label: "Records Mapped".into(),
				value: Scalar::from("N/A (Snapshot)"),
				trend: Some(Trend::Stable),
			}],
			details: Some(NodeDetails {
				responsible: "Data Operations".into(),
				last_updated: local_time.to_string(),
				issues: vec![],
				raw_fields: vec![
					"Conceptual_Field_1".into(),
					"Conceptual_Field_2".into(),
					"Mapped_ID".into(),
				],
			}),
			sample: Some(SampleTable {
				columns: ["Subject", "Date", "Test", "Result", "Flag"]
					.map(String::from)
					.to_vec(),
				rows: vec![
					row([
						("Subject", "1099"),
						("Date", "2024-05-20"),
						("Test", "WBC"),
						("Result", "5.5"),
						("Flag", "None"),
					]),
					row([
						("Subject", "1100"),
						("Date", "2024-05-21"),
						("Test", "RBC"),
						("Result", "4.2"),
						("Flag", "Low"),
					]),
				],
			}),
		}
	}
}

/// `src-snap-<ms>`, suffixed `-1`, `-2`, ... until unused in `registry`.
pub fn snapshot_id(epoch_ms: f64, registry: &NodeRegistry) -> String {
	let ms = if epoch_ms.is_finite() { epoch_ms.max(0.0) as u64 } else { 0 };
	let base = format!("src-snap-{ms}");
	if !registry.contains(&base) {
		return base;
	}
	let mut n = 1u32;
	loop {
		let candidate = format!("{base}-{n}");
		if !registry.contains(&candidate) {
			return candidate;
		}
		n += 1;
	}
}
