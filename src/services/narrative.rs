//! Narrative analysis for a single node via the Gemini `generateContent` API.
//!
//! Nothing here fails loudly: every error path ends in one of the fixed
//! fallback strings so the detail view always has something to show.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;
use crate::model::FlowNode;

pub const MISSING_KEY_TEXT: &str =
	"AI analysis unavailable (Missing API Key). Please configure the environment.";
pub const CONNECTION_ERROR_TEXT: &str =
	"Unable to generate recommendation due to a connection error.";
pub const EMPTY_RESPONSE_TEXT: &str = "Recommendation generated, but no text returned.";

#[derive(Debug, Error)]
pub enum NarrativeError {
	#[error("no API key configured")]
	MissingApiKey,
	#[error("request failed: {0}")]
	Network(String),
	#[error("http error: {0}")]
	Http(u16),
	#[error("malformed response: {0}")]
	Decode(#[from] serde_json::Error),
	#[error("response contained no text")]
	Empty,
}

impl NarrativeError {
	pub fn fallback_text(&self) -> &'static str {
		match self {
			NarrativeError::MissingApiKey => MISSING_KEY_TEXT,
			NarrativeError::Empty => EMPTY_RESPONSE_TEXT,
			NarrativeError::Network(_) | NarrativeError::Http(_) | NarrativeError::Decode(_) => {
				CONNECTION_ERROR_TEXT
			}
		}
	}
}

/// Prompt asking for an explanation of the node's status and two
/// recommendations, phrased as advice for a human reviewer.
pub fn build_prompt(node: &FlowNode) -> String {
	let inputs = node
		.upstream()
		.map(|i| i.join(", "))
		.unwrap_or_else(|| "N/A (Source)".to_string());
	let logic = node.logic.as_deref().unwrap_or("N/A");
	let metrics = serde_json::to_string(&node.metrics).unwrap_or_else(|_| "[]".to_string());
	let issues = if node.issues().is_empty() {
		"None".to_string()
	} else {
		node.issues().join(", ")
	};
	let status = node.status;

	format!(
		"You are a Clinical Data Scientist Assistant providing recommendations for human review.

CONTEXT:
Analyzing Data Node: \"{label}\" ({kind}).
Status: {status}
Upstream Inputs: {inputs}
Logic/Threshold: {logic}
Current Metrics: {metrics}
Current Issues: {issues}

TASK:
1. Explain *why* the node status is {status} based on the metrics/logic.
2. Provide 2 prioritized **recommendations** for the human user to investigate (e.g., \"Recommend verifying source documents\", \"Suggest querying Site\").
3. State the confidence level in this recommendation based on the data provided.

CONSTRAINTS:
- Use phrases like \"The data suggests...\", \"It is recommended to...\", \"Potential area for review...\".
- DO NOT use autonomous language like \"I have flagged...\", \"Executing...\", \"Correcting...\".
- DO NOT imply you have taken action. You are an analysis tool only.
- Keep it under 150 words.
",
		label = node.label,
		kind = node.kind.code(),
	)
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
	contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
	parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
	text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
	#[serde(default)]
	candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
	content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
	#[serde(default)]
	parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
	text: Option<String>,
}

pub fn request_body(prompt: &str) -> Result<String, serde_json::Error> {
	serde_json::to_string(&GenerateRequest {
		contents: [RequestContent {
			parts: [RequestPart { text: prompt }],
		}],
	})
}

/// Text of the first candidate, parts concatenated.
pub fn extract_text(body: &str) -> Result<String, NarrativeError> {
	let response: GenerateResponse = serde_json::from_str(body)?;
	let text: String = response
		.candidates
		.into_iter()
		.next()
		.and_then(|c| c.content)
		.map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
		.unwrap_or_default();
	let text = text.trim();
	if text.is_empty() {
		Err(NarrativeError::Empty)
	} else {
		Ok(text.to_string())
	}
}

pub struct GeminiClient {
	api_key: String,
	url: String,
}

impl GeminiClient {
	pub fn from_config(config: &AppConfig) -> Result<Self, NarrativeError> {
		let api_key = config.api_key.clone().ok_or(NarrativeError::MissingApiKey)?;
		Ok(Self {
			api_key,
			url: format!("{}/models/{}:generateContent", config.endpoint, config.model),
		})
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	pub async fn generate(&self, prompt: &str) -> Result<String, NarrativeError> {
		let body = request_body(prompt)?;
		let raw = post_json(&self.url, &self.api_key, &body).await?;
		extract_text(&raw)
	}
}

/// Generate the narrative for `node`, degrading to a fallback string.
pub async fn narrate(config: &AppConfig, node: &FlowNode) -> String {
	let result = match GeminiClient::from_config(config) {
		Ok(client) => {
			log::debug!("requesting narrative for {} from {}", node.id, client.url());
			client.generate(&build_prompt(node)).await
		}
		Err(e) => Err(e),
	};
	match result {
		Ok(text) => text,
		Err(NarrativeError::MissingApiKey) => {
			log::warn!("narrative for {} skipped: no API key", node.id);
			MISSING_KEY_TEXT.to_string()
		}
		Err(e) => {
			log::error!("narrative for {} failed: {e}", node.id);
			e.fallback_text().to_string()
		}
	}
}

#[cfg(target_arch = "wasm32")]
async fn post_json(url: &str, api_key: &str, body: &str) -> Result<String, NarrativeError> {
	use wasm_bindgen::{JsCast, JsValue};
	use wasm_bindgen_futures::JsFuture;

	let js_err = |e: JsValue| NarrativeError::Network(format!("{e:?}"));

	let opts = web_sys::RequestInit::new();
	opts.set_method("POST");
	opts.set_body(&JsValue::from_str(body));

	let headers = web_sys::Headers::new().map_err(js_err)?;
	headers.set("Content-Type", "application/json").map_err(js_err)?;
	headers.set("x-goog-api-key", api_key).map_err(js_err)?;
	opts.set_headers(&headers);

	let request = web_sys::Request::new_with_str_and_init(url, &opts).map_err(js_err)?;
	let window = web_sys::window().ok_or_else(|| NarrativeError::Network("no window".into()))?;
	let resp_value = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(js_err)?;
	let resp: web_sys::Response = resp_value.dyn_into().map_err(js_err)?;

	if !resp.ok() {
		return Err(NarrativeError::Http(resp.status()));
	}

	let text = JsFuture::from(resp.text().map_err(js_err)?)
		.await
		.map_err(js_err)?;
	text.as_string()
		.ok_or_else(|| NarrativeError::Network("response body was not text".into()))
}

#[cfg(not(target_arch = "wasm32"))]
async fn post_json(_url: &str, _api_key: &str, _body: &str) -> Result<String, NarrativeError> {
	Err(NarrativeError::Network(
		"text generation requires the browser build".to_string(),
	))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::Seed;

	fn node(id: &str) -> FlowNode {
		let (registry, _) = Seed::embedded().into_parts();
		registry.find(id).unwrap().clone()
	}

	#[test]
	fn prompt_carries_node_fields() {
		let prompt = build_prompt(&node("out-2"));
		assert!(prompt.contains("Analyzing Data Node: \"High-Risk Sites\" (INSIGHT)."));
		assert!(prompt.contains("Status: CRITICAL"));
		assert!(prompt.contains("Upstream Inputs: Visit Compliance Engine, Lab Data"));
		assert!(prompt.contains("Logic/Threshold: Site flagged if"));
		assert!(prompt.contains(r#"Current Metrics: [{"label":"Flagged Sites","value":2,"trend":"stable"}]"#));
		assert!(prompt.contains("Current Issues: Site IN-07, Site US-03"));
		assert!(prompt.contains("Keep it under 150 words."));
	}

	#[test]
	fn prompt_uses_placeholders_for_sources() {
		let prompt = build_prompt(&node("src-5"));
		assert!(prompt.contains("Upstream Inputs: N/A (Source)"));
		assert!(prompt.contains("Logic/Threshold: N/A"));
		assert!(prompt.contains("Current Issues: None"));
	}

	#[test]
	fn request_body_wraps_prompt() {
		let body = request_body("hi \"there\"").unwrap();
		assert_eq!(body, r#"{"contents":[{"parts":[{"text":"hi \"there\""}]}]}"#);
	}

	#[test]
	fn extract_text_joins_first_candidate_parts() {
		let body = r#"{"candidates":[{"content":{"parts":[{"text":"The data "},{"text":"suggests review."}]}},{"content":{"parts":[{"text":"ignored"}]}}]}"#;
		assert_eq!(extract_text(body).unwrap(), "The data suggests review.");
	}

	#[test]
	fn extract_text_maps_failures_to_fallbacks() {
		let empty = extract_text(r#"{"candidates":[]}"#).unwrap_err();
		assert_eq!(empty.fallback_text(), EMPTY_RESPONSE_TEXT);
		let blank = extract_text(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#)
			.unwrap_err();
		assert!(matches!(blank, NarrativeError::Empty));
		let garbage = extract_text("<html>").unwrap_err();
		assert_eq!(garbage.fallback_text(), CONNECTION_ERROR_TEXT);
		assert_eq!(NarrativeError::Http(503).fallback_text(), CONNECTION_ERROR_TEXT);
	}

	#[test]
	fn client_requires_api_key() {
		let err = GeminiClient::from_config(&AppConfig::default()).err().unwrap();
		assert_eq!(err.fallback_text(), MISSING_KEY_TEXT);

		let cfg = AppConfig::from_values(Some("k"), None, None, None);
		let client = GeminiClient::from_config(&cfg).unwrap();
		assert_eq!(
			client.url(),
			"https://generativelanguage.googleapis.com/v1beta/models/gemini-flash-lite-latest:generateContent"
		);
	}
}
