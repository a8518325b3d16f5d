use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;
use url::Url;

static WEB_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
	RegexBuilder::new(r"^(https?://|www\.)")
		.case_insensitive(true)
		.build()
		.unwrap()
});

/// Escapes text for use in HTML content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#39;"),
			_ => escaped.push(c),
		}
	}
	escaped
}

/// Accepts a string that looks like a web address and returns it as an absolute URL.
///
/// Only `http://…`, `https://…` and `www.…` are accepted (case-insensitive, surrounding
/// whitespace ignored). A bare `www.` address gets `https://` prepended.
///
/// ```
/// use geoinfra_geometry::popup::safe_url;
///
/// assert_eq!(safe_url("www.portodesantos.com.br").as_deref(), Some("https://www.portodesantos.com.br/"));
/// assert_eq!(safe_url("javascript:alert(1)"), None);
/// ```
pub fn safe_url(raw: &str) -> Option<String> {
	let text = raw.trim();
	if !WEB_ADDRESS.is_match(text) {
		return None;
	}
	let absolute = if text.to_ascii_lowercase().starts_with("http") {
		text.to_string()
	} else {
		format!("https://{text}")
	};
	let url = Url::parse(&absolute).ok()?;
	matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}
