//! Keyword search over the generated tsvector, with keyset cursors.
//!
//! Result order is ascending email id, not relevance, so a cursor marks an
//! exact boundary in a stable stream and resuming never duplicates or skips
//! a row at the page edge. Tokens encode the boundary row id; they are
//! produced and consumed only here and are opaque to every caller.

use sqlx::{Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
	Error, Result,
	db::Db,
	models::{EmailRecord, ScoredEmail, TextDirection, TextPage, TextQuery},
};

#[derive(Debug, sqlx::FromRow)]
struct TextRow {
	email_id: Uuid,
	subject: Option<String>,
	sender: Option<String>,
	recipient: Option<String>,
	date: Option<OffsetDateTime>,
	body: String,
	tag: Option<String>,
	score: f32,
}
impl TextRow {
	fn into_scored(self) -> ScoredEmail {
		ScoredEmail {
			record: EmailRecord {
				email_id: self.email_id,
				subject: self.subject,
				sender: self.sender,
				recipient: self.recipient,
				date: self.date,
				body: self.body,
				tag: self.tag,
			},
			score: self.score,
		}
	}
}

pub async fn text_search(db: &Db, query: &TextQuery) -> Result<TextPage> {
	let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
		"SELECT email_id, subject, sender, recipient, date, body, tag, \
		 ts_rank(search_tsv, websearch_to_tsquery('english', ",
	);

	builder.push_bind(query.text.as_str());
	builder.push(")) AS score FROM emails WHERE search_tsv @@ websearch_to_tsquery('english', ");
	builder.push_bind(query.text.as_str());
	builder.push(")");

	// Filter clauses first. The cursor clause is appended strictly after
	// them and never replaces the WHERE list built so far.
	if let Some(tag) = query.filters.tag.as_deref() {
		builder.push(" AND tag = ");
		builder.push_bind(tag);
	}
	if let Some(start) = query.filters.date_start {
		builder.push(" AND date >= ");
		builder.push_bind(start);
	}
	if let Some(end) = query.filters.date_end {
		builder.push(" AND date <= ");
		builder.push_bind(end);
	}

	let direction = match query.cursor.as_ref() {
		Some(cursor) => {
			let boundary = decode_token(&cursor.token)?;

			match cursor.direction {
				TextDirection::After => builder.push(" AND email_id > "),
				TextDirection::Before => builder.push(" AND email_id < "),
			};
			builder.push_bind(boundary);

			cursor.direction
		},
		None => TextDirection::After,
	};

	match direction {
		TextDirection::After => builder.push(" ORDER BY email_id ASC"),
		TextDirection::Before => builder.push(" ORDER BY email_id DESC"),
	};
	// One extra row answers "is there another page" without a second query.
	builder.push(" LIMIT ");
	builder.push_bind(i64::from(query.page_size) + 1);

	let mut rows: Vec<TextRow> = builder.build_query_as().fetch_all(&db.pool).await?;
	let has_more = rows.len() > query.page_size as usize;

	rows.truncate(query.page_size as usize);

	if direction == TextDirection::Before {
		// Backward pages are read descending; flip them so every page the
		// caller sees runs in ascending id order.
		rows.reverse();
	}

	let results: Vec<ScoredEmail> = rows.into_iter().map(TextRow::into_scored).collect();
	let prev_token = results.first().map(|hit| encode_token(hit.record.email_id));
	let next_token = results.last().map(|hit| encode_token(hit.record.email_id));

	Ok(TextPage { results, next_token, prev_token, has_more })
}

fn encode_token(email_id: Uuid) -> String {
	email_id.simple().to_string()
}

fn decode_token(token: &str) -> Result<Uuid> {
	Uuid::parse_str(token)
		.map_err(|_| Error::InvalidArgument(format!("Malformed pagination token: {token}.")))
}
