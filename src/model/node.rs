use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use super::role::Role;

pub const NO_UPSTREAM: &str = "No upstream dependencies";
pub const DEFAULT_LOGIC: &str = "Standard data extraction and aggregation.";

/// Which lane a node belongs to. Fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
	#[serde(rename = "DATASET")]
	Source,
	#[serde(rename = "ENGINE")]
	Engine,
	#[serde(rename = "INSIGHT")]
	Insight,
}

impl NodeKind {
	pub fn label(self) -> &'static str {
		match self {
			NodeKind::Source => "Dataset",
			NodeKind::Engine => "Engine",
			NodeKind::Insight => "Insight",
		}
	}

	/// Wire name, used in generated prompts.
	pub fn code(self) -> &'static str {
		match self {
			NodeKind::Source => "DATASET",
			NodeKind::Engine => "ENGINE",
			NodeKind::Insight => "INSIGHT",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
	Healthy,
	Warning,
	Critical,
}

impl HealthStatus {
	pub const ALL: [HealthStatus; 3] = [
		HealthStatus::Healthy,
		HealthStatus::Warning,
		HealthStatus::Critical,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			HealthStatus::Healthy => "HEALTHY",
			HealthStatus::Warning => "WARNING",
			HealthStatus::Critical => "CRITICAL",
		}
	}

	/// CSS modifier used by status pills and legend dots.
	pub fn css_class(self) -> &'static str {
		match self {
			HealthStatus::Healthy => "status-healthy",
			HealthStatus::Warning => "status-warning",
			HealthStatus::Critical => "status-critical",
		}
	}
}

impl fmt::Display for HealthStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
	Up,
	Down,
	Stable,
}

/// A cell or metric value: either a number or free text.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
	Number(f64),
	Text(String),
}

impl Scalar {
	fn as_integer(&self) -> Option<i64> {
		match self {
			Scalar::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Some(*n as i64),
			_ => None,
		}
	}
}

/// Integral numbers are written as JSON integers (`2`, not `2.0`).
impl Serialize for Scalar {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		if let Some(i) = self.as_integer() {
			return serializer.serialize_i64(i);
		}
		match self {
			Scalar::Number(n) => serializer.serialize_f64(*n),
			Scalar::Text(s) => serializer.serialize_str(s),
		}
	}
}

impl fmt::Display for Scalar {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Some(i) = self.as_integer() {
			return write!(f, "{i}");
		}
		match self {
			Scalar::Number(n) => write!(f, "{}", n),
			Scalar::Text(s) => f.write_str(s),
		}
	}
}

impl From<&str> for Scalar {
	fn from(s: &str) -> Self {
		Scalar::Text(s.to_string())
	}
}

impl From<f64> for Scalar {
	fn from(n: f64) -> Self {
		Scalar::Number(n)
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metric {
	pub label: String,
	pub value: Scalar,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub trend: Option<Trend>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDetails {
	pub responsible: String,
	pub last_updated: String,
	#[serde(default)]
	pub issues: Vec<String>,
	#[serde(default)]
	pub raw_fields: Vec<String>,
}

/// A handful of example rows shown in the detail view's data tab.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleTable {
	pub columns: Vec<String>,
	pub rows: Vec<HashMap<String, Scalar>>,
}

impl SampleTable {
	/// Cell text for `column` in `row`, empty when the row has no such cell.
	pub fn cell(&self, row: usize, column: &str) -> String {
		self.rows
			.get(row)
			.and_then(|r| r.get(column))
			.map(|v| v.to_string())
			.unwrap_or_default()
	}

	/// Render as CSV with a header line. Cells containing a comma, quote or
	/// newline are quoted, inner quotes doubled.
	pub fn to_csv(&self) -> String {
		let mut out = String::new();
		let header: Vec<String> = self.columns.iter().map(|c| csv_field(c)).collect();
		out.push_str(&header.join(","));
		out.push('\n');
		for i in 0..self.rows.len() {
			let line: Vec<String> = self
				.columns
				.iter()
				.map(|c| csv_field(&self.cell(i, c)))
				.collect();
			out.push_str(&line.join(","));
			out.push('\n');
		}
		out
	}
}

fn csv_field(raw: &str) -> String {
	if raw.contains([',', '"', '\n', '\r']) {
		format!("\"{}\"", raw.replace('"', "\"\""))
	} else {
		raw.to_string()
	}
}

/// A source, engine or insight shown on the canvas.
///
/// `inputs` names upstream nodes by label for display only; they are not
/// resolved into edges. `logic` is descriptive text and is never evaluated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
	pub id: String,
	pub label: String,
	#[serde(rename = "type")]
	pub kind: NodeKind,
	pub status: HealthStatus,
	pub description: String,
	#[serde(default)]
	pub role_relevance: Vec<Role>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub inputs: Option<Vec<String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub logic: Option<String>,
	#[serde(default)]
	pub metrics: Vec<Metric>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub details: Option<NodeDetails>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sample: Option<SampleTable>,
}

impl FlowNode {
	pub fn is_relevant(&self, role: Role) -> bool {
		super::role::is_relevant(self, role)
	}

	pub fn primary_metric(&self) -> Option<&Metric> {
		self.metrics.first()
	}

	/// Upstream labels, or `None` when the node has no (non-empty) inputs.
	pub fn upstream(&self) -> Option<&[String]> {
		self.inputs.as_deref().filter(|i| !i.is_empty())
	}

	pub fn logic_text(&self) -> &str {
		self.logic
			.as_deref()
			.filter(|l| !l.trim().is_empty())
			.unwrap_or(DEFAULT_LOGIC)
	}

	pub fn issues(&self) -> &[String] {
		self.details.as_ref().map(|d| d.issues.as_slice()).unwrap_or(&[])
	}

	pub fn sample_rows(&self) -> Option<&SampleTable> {
		self.sample.as_ref().filter(|s| !s.rows.is_empty())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
	Risk,
	Anomaly,
	Performance,
}

impl InsightKind {
	pub fn label(self) -> &'static str {
		match self {
			InsightKind::Risk => "Risk",
			InsightKind::Anomaly => "Anomaly",
			InsightKind::Performance => "Performance",
		}
	}
}

/// A headline finding pointing at the node it was derived from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightCard {
	pub id: String,
	pub title: String,
	pub description: String,
	pub confidence: f64,
	pub related_node_id: String,
	#[serde(rename = "type")]
	pub kind: InsightKind,
	pub severity: HealthStatus,
	pub recommendation: String,
}

impl InsightCard {
	pub fn confidence_percent(&self) -> u32 {
		(self.confidence.clamp(0.0, 1.0) * 100.0).round() as u32
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn bare(id: &str) -> FlowNode {
		FlowNode {
			id: id.into(),
			label: "Lab Data".into(),
			kind: NodeKind::Source,
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
	fn scalar_display_drops_integral_fraction() {
		assert_eq!(Scalar::Number(12.0).to_string(), "12");
		assert_eq!(Scalar::Number(5.5).to_string(), "5.5");
		assert_eq!(Scalar::from("94%").to_string(), "94%");
	}

	#[test]
	fn scalar_json_writes_integral_numbers_as_integers() {
		let values = vec![Scalar::Number(2.0), Scalar::Number(98.5), Scalar::from("Yes")];
		assert_eq!(serde_json::to_string(&values).unwrap(), r#"[2,98.5,"Yes"]"#);
		let back: Vec<Scalar> = serde_json::from_str("[2,98.5,\"Yes\"]").unwrap();
		assert_eq!(back, values);
	}

	#[test]
	fn missing_optional_fields_use_placeholders() {
		let mut node = bare("a");
		assert!(node.upstream().is_none());
		assert_eq!(node.logic_text(), DEFAULT_LOGIC);
		assert!(node.issues().is_empty());
		assert!(node.sample_rows().is_none());

		node.inputs = Some(vec![]);
		node.logic = Some("   ".into());
		assert!(node.upstream().is_none());
		assert_eq!(node.logic_text(), DEFAULT_LOGIC);
	}

	#[test]
	fn csv_quotes_awkward_cells() {
		let mut row = HashMap::new();
		row.insert("Site".to_string(), Scalar::from("US, 01"));
		row.insert("Note".to_string(), Scalar::from("said \"hi\""));
		row.insert("Count".to_string(), Scalar::Number(3.0));
		let table = SampleTable {
			columns: vec!["Site".into(), "Count".into(), "Note".into(), "Missing".into()],
			rows: vec![row],
		};
		assert_eq!(
			table.to_csv(),
			"Site,Count,Note,Missing\n\"US, 01\",3,\"said \"\"hi\"\"\",\n"
		);
	}

	#[test]
	fn node_json_uses_camel_case_field_names() {
		let json = r#"{
			"id": "proc-9",
			"label": "Engine",
			"type": "ENGINE",
			"status": "WARNING",
			"description": "d",
			"roleRelevance": ["Data Manager"],
			"metrics": [{ "label": "Pages", "value": 14, "trend": "up" }],
			"details": { "responsible": "System", "lastUpdated": "Daily" }
		}"#;
		let node: FlowNode = serde_json::from_str(json).unwrap();
		assert_eq!(node.kind, NodeKind::Engine);
		assert_eq!(node.status, HealthStatus::Warning);
		assert_eq!(node.role_relevance, vec![Role::DataManager]);
		assert_eq!(node.primary_metric().unwrap().value, Scalar::Number(14.0));
		assert_eq!(node.primary_metric().unwrap().trend, Some(Trend::Up));
		assert!(node.issues().is_empty());
	}

	#[test]
	fn confidence_rounds_to_percent() {
		let card = InsightCard {
			id: "i".into(),
			title: "t".into(),
			description: "d".into(),
			confidence: 0.89,
			related_node_id: "n".into(),
			kind: InsightKind::Risk,
			severity: HealthStatus::Critical,
			recommendation: "r".into(),
		};
		assert_eq!(card.confidence_percent(), 89);
	}
}
