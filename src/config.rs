//! Build-time configuration, handed to the view tree through context.

use log::Level;

/// Model used when `GEMINI_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gemini-flash-lite-latest";
/// Base URL of the Gemini REST API.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Runtime settings for the dashboard.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
	/// Credential for the text-generation service. `None` disables it.
	pub api_key: Option<String>,
	/// Model name placed in the request path.
	pub model: String,
	/// API base URL without a trailing slash.
	pub endpoint: String,
	/// Maximum level forwarded to the browser console.
	pub log_level: Level,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_key: None,
			model: DEFAULT_MODEL.to_string(),
			endpoint: DEFAULT_ENDPOINT.to_string(),
			log_level: Level::Debug,
		}
	}
}

impl AppConfig {
	/// Values baked in when the bundle was built: `GEMINI_API_KEY`,
	/// `GEMINI_MODEL`, `GEMINI_ENDPOINT`, `TRIAL_FLOW_LOG`.
	pub fn from_build_env() -> Self {
		Self::from_values(
			option_env!("GEMINI_API_KEY"),
			option_env!("GEMINI_MODEL"),
			option_env!("GEMINI_ENDPOINT"),
			option_env!("TRIAL_FLOW_LOG"),
		)
	}

	/// Build from raw optional strings; blank or unparsable values fall back
	/// to the defaults.
	pub fn from_values(
		api_key: Option<&str>,
		model: Option<&str>,
		endpoint: Option<&str>,
		log_level: Option<&str>,
	) -> Self {
		let defaults = Self::default();
		fn non_blank(v: Option<&str>) -> Option<&str> {
			v.map(str::trim).filter(|v| !v.is_empty())
		}
		Self {
			api_key: non_blank(api_key).map(String::from),
			model: non_blank(model).map(String::from).unwrap_or(defaults.model),
			endpoint: non_blank(endpoint)
				.map(|e| e.trim_end_matches('/').to_string())
				.unwrap_or(defaults.endpoint),
			log_level: non_blank(log_level)
				.and_then(|l| l.parse().ok())
				.unwrap_or(defaults.log_level),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn blank_values_fall_back_to_defaults() {
		let cfg = AppConfig::from_values(Some("  "), None, Some(""), Some("nonsense"));
		assert_eq!(cfg, AppConfig::default());
	}

	#[test]
	fn explicit_values_are_used() {
		let cfg = AppConfig::from_values(
			Some("k-123"),
			Some("gemini-pro"),
			Some("https://example.test/v1/"),
			Some("warn"),
		);
		assert_eq!(cfg.api_key.as_deref(), Some("k-123"));
		assert_eq!(cfg.model, "gemini-pro");
		assert_eq!(cfg.endpoint, "https://example.test/v1");
		assert_eq!(cfg.log_level, Level::Warn);
	}

	#[test]
	fn padded_values_are_trimmed() {
		let cfg = AppConfig::from_values(Some("  key \n"), Some(" gemini-pro "), None, Some(" error "));
		assert_eq!(cfg.api_key.as_deref(), Some("key"));
		assert_eq!(cfg.model, "gemini-pro");
		assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
		assert_eq!(cfg.log_level, Level::Error);
	}
}
