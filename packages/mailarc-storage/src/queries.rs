use std::collections::HashMap;

use uuid::Uuid;

use crate::{
	Result,
	db::Db,
	models::{EmailRecord, ParticipantPair},
};

const RECORD_COLUMNS: &str = "email_id, subject, sender, recipient, date, body, tag";

pub async fn fetch_email(db: &Db, email_id: Uuid) -> Result<Option<EmailRecord>> {
	let record = sqlx::query_as::<_, EmailRecord>(&format!(
		"SELECT {RECORD_COLUMNS} FROM emails WHERE email_id = $1"
	))
	.bind(email_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(record)
}

/// Fetches a batch of records and returns them in the order of `ids`.
/// Ids with no backing record are skipped.
pub async fn fetch_emails_ranked(db: &Db, ids: &[Uuid]) -> Result<Vec<EmailRecord>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows = sqlx::query_as::<_, EmailRecord>(&format!(
		"SELECT {RECORD_COLUMNS} FROM emails WHERE email_id = ANY($1)"
	))
	.bind(ids)
	.fetch_all(&db.pool)
	.await?;
	let mut by_id: HashMap<Uuid, EmailRecord> =
		rows.into_iter().map(|record| (record.email_id, record)).collect();

	Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
}

pub async fn distinct_tags(db: &Db) -> Result<Vec<String>> {
	let tags = sqlx::query_scalar::<_, String>(
		"SELECT DISTINCT tag FROM emails WHERE tag IS NOT NULL AND tag <> '' ORDER BY tag",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(tags)
}

/// All records whose (sender, recipient) pair equals the seed's pair in
/// either direction. Reply chains swap the two, so both orientations belong
/// to the same conversation. Absent participants are stored as NULL and
/// compared as empty strings.
pub async fn thread_candidates(db: &Db, pair: &ParticipantPair) -> Result<Vec<EmailRecord>> {
	let rows = sqlx::query_as::<_, EmailRecord>(&format!(
		"SELECT {RECORD_COLUMNS} FROM emails \
		 WHERE (COALESCE(sender, '') = $1 AND COALESCE(recipient, '') = $2) \
		    OR (COALESCE(sender, '') = $2 AND COALESCE(recipient, '') = $1)"
	))
	.bind(pair.sender.as_str())
	.bind(pair.recipient.as_str())
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}
