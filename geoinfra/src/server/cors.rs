//! Builds the CORS layer from [`CorsConfig`].
//!
//! Origin patterns:
//! - `*` allows every origin
//! - `*.example.com` matches by suffix
//! - `https://dev-*` matches by prefix
//! - `/^https://(a|b)\.example\.com$/` is a regular expression
//! - anything else must match exactly
//!
//! The API takes JSON bodies, so `POST` and the `Content-Type` header are allowed as well.

use crate::config::CorsConfig;
use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method, header, request::Parts};
use regex::Regex;
use std::{sync::LazyLock, time::Duration};
use tower_http::cors::{AllowOrigin, CorsLayer};

static SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\*([^*]+)$").unwrap());
static PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([^*]+)\*$").unwrap());
static REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/(.+)/$").unwrap());

#[derive(Debug)]
enum OriginPattern {
	Any,
	Suffix(String),
	Prefix(String),
	Regex(Regex),
	Exact(String),
}

impl OriginPattern {
	fn parse(pattern: &str) -> Result<OriginPattern> {
		Ok(if pattern == "*" {
			OriginPattern::Any
		} else if let Some(c) = SUFFIX.captures(pattern) {
			OriginPattern::Suffix(c[1].to_string())
		} else if let Some(c) = PREFIX.captures(pattern) {
			OriginPattern::Prefix(c[1].to_string())
		} else if let Some(c) = REGEX.captures(pattern) {
			OriginPattern::Regex(Regex::new(&c[1]).with_context(|| format!("invalid origin pattern '{pattern}'"))?)
		} else {
			OriginPattern::Exact(pattern.to_string())
		})
	}

	fn matches(&self, origin: &str) -> bool {
		match self {
			OriginPattern::Any => true,
			OriginPattern::Suffix(suffix) => origin.ends_with(suffix.as_str()),
			OriginPattern::Prefix(prefix) => origin.starts_with(prefix.as_str()),
			OriginPattern::Regex(regex) => regex.is_match(origin),
			OriginPattern::Exact(exact) => origin == exact,
		}
	}
}

pub fn build_cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
	let patterns = config
		.allowed_origins
		.iter()
		.map(|p| OriginPattern::parse(p))
		.collect::<Result<Vec<_>>>()?;
	log::debug!("allowed origins: {patterns:?}");

	Ok(CorsLayer::new()
		.allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _: &Parts| {
			let origin = origin.to_str().unwrap_or("");
			patterns.iter().any(|p| p.matches(origin))
		}))
		.allow_methods([Method::GET, Method::POST])
		.allow_headers([header::CONTENT_TYPE])
		.max_age(Duration::from_secs(config.max_age_seconds())))
}
