//! Text normalization shared by search projection and thread matching.

use std::sync::OnceLock;

use regex::Regex;

fn reply_marker() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();

	// Matches one leading reply marker: `Re:`, `RE :`, `Re[2]:`, etc.
	// Forward markers (`Fwd:`, `FW:`) are part of the subject and stay.
	PATTERN.get_or_init(|| {
		Regex::new(r"(?i)^re\s*(\[\d+\])?\s*:\s*").expect("reply marker pattern is valid")
	})
}

fn blank_run() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();

	PATTERN.get_or_init(|| Regex::new(r"\n\s*\n+").expect("blank run pattern is valid"))
}

/// Strips every leading reply marker from a subject and trims whitespace.
///
/// Reply chains stack markers (`Re: Re[2]: Budget`), so stripping repeats
/// until no marker is left. Idempotent; an absent subject normalizes to the
/// empty string, which is a valid thread key of its own.
pub fn normalize_subject(subject: Option<&str>) -> String {
	let mut normalized = subject.unwrap_or_default().trim();

	while let Some(marker) = reply_marker().find(normalized) {
		normalized = normalized[marker.end()..].trim_start();
	}

	normalized.trim().to_string()
}

/// Collapses runs of blank lines down to a single blank line.
pub fn normalize_newlines(text: Option<&str>) -> String {
	let Some(text) = text else {
		return String::new();
	};

	blank_run().replace_all(text, "\n\n").into_owned()
}

/// Returns at most the first `max_chars` characters of `body`.
pub fn truncate_body(body: Option<&str>, max_chars: usize) -> String {
	let Some(body) = body else {
		return String::new();
	};

	if body.chars().count() <= max_chars {
		return body.to_string();
	}

	body.chars().take(max_chars).collect()
}
