use time::OffsetDateTime;
use uuid::Uuid;

/// One imported email. Written by the import pipeline, read-only here.
///
/// Every field except the id may be absent; query and display logic must
/// tolerate any combination of missing values.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct EmailRecord {
	pub email_id: Uuid,
	pub subject: Option<String>,
	pub sender: Option<String>,
	pub recipient: Option<String>,
	pub date: Option<OffsetDateTime>,
	pub body: String,
	pub tag: Option<String>,
}

/// A record paired with the relevance score the retrieval engine attached
/// at query time. Scores are never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEmail {
	pub record: EmailRecord,
	pub score: f32,
}

/// Filters shared by both retrieval modes. Tag is an exact match; the date
/// range is inclusive and each bound is independent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
	pub tag: Option<String>,
	pub date_start: Option<OffsetDateTime>,
	pub date_end: Option<OffsetDateTime>,
}

/// Page-indexed semantic query. Pages are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorQuery {
	pub text: String,
	pub filters: SearchFilters,
	pub page: u32,
	pub page_size: u32,
}

/// Cursor-indexed keyword query. The token is owned by the engine; callers
/// pass it through without interpreting it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextQuery {
	pub text: String,
	pub filters: SearchFilters,
	pub page_size: u32,
	pub cursor: Option<TextCursor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextCursor {
	pub token: String,
	pub direction: TextDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
	After,
	Before,
}

/// One engine page of keyword results with the cursors needed to resume
/// either way from its edges.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPage {
	pub results: Vec<ScoredEmail>,
	pub next_token: Option<String>,
	pub prev_token: Option<String>,
	/// The engine's own signal that more rows exist in the direction of
	/// traversal, independent of page fullness.
	pub has_more: bool,
}

/// The (from, to) pair of a thread seed. Candidate matching treats the pair
/// as unordered; absent participants are compared as empty strings, never as
/// wildcards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantPair {
	pub sender: String,
	pub recipient: String,
}
impl ParticipantPair {
	pub fn of(record: &EmailRecord) -> Self {
		Self {
			sender: record.sender.clone().unwrap_or_default(),
			recipient: record.recipient.clone().unwrap_or_default(),
		}
	}
}
