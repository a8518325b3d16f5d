//! Cross-origin settings for the HTTP API.
//!
//! ```yaml
//! cors:
//!   allowed_origins:
//!     - "https://painel.example.org"
//!     - "*.example.net"
//!   max_age_seconds: 3600
//! ```

use serde::Deserialize;

pub const DEFAULT_MAX_AGE_SECONDS: u64 = 86400;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
	/// Origins allowed to call the API. Defaults to `["*"]`.
	/// Supports:
	/// - `*` to allow all origins
	/// - exact origins like `https://example.com`
	/// - a leading glob like `*.example.com`
	/// - a trailing glob like `https://dev-*`
	/// - regular expressions enclosed in slashes like `/^https://(a|b)\.example\.com$/`
	#[serde(default = "default_allowed_origins")]
	pub allowed_origins: Vec<String>,

	/// How long browsers may cache preflight responses. Defaults to one day.
	#[serde(default)]
	pub max_age_seconds: Option<u64>,
}

fn default_allowed_origins() -> Vec<String> {
	vec!["*".to_string()]
}

impl CorsConfig {
	pub fn max_age_seconds(&self) -> u64 {
		self.max_age_seconds.unwrap_or(DEFAULT_MAX_AGE_SECONDS)
	}
}

impl Default for CorsConfig {
	fn default() -> Self {
		Self {
			allowed_origins: default_allowed_origins(),
			max_age_seconds: None,
		}
	}
}
