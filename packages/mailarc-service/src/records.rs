//! Fetch-by-id and tag listing.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use mailarc_domain::normalize;
use mailarc_storage::models::EmailRecord;

use crate::{MailarcService, ServiceError, ServiceResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailDetail {
	pub id: Uuid,
	pub subject: Option<String>,
	pub from: Option<String>,
	pub to: Option<String>,
	#[serde(with = "time::serde::rfc3339::option")]
	pub date: Option<OffsetDateTime>,
	pub body: String,
	pub tag: Option<String>,
}
impl EmailDetail {
	fn from_record(record: EmailRecord) -> Self {
		let body = normalize::normalize_newlines(Some(record.body.as_str()));

		Self {
			id: record.email_id,
			subject: record.subject,
			from: record.sender,
			to: record.recipient,
			date: record.date,
			body,
			tag: record.tag,
		}
	}
}

impl MailarcService {
	pub async fn email(&self, raw_id: &str) -> ServiceResult<EmailDetail> {
		let email_id = parse_email_id(raw_id)?;
		let record = self
			.backend
			.records
			.fetch_by_id(email_id)
			.await?
			.ok_or_else(|| ServiceError::NotFound { message: format!("Email {email_id}.") })?;

		Ok(EmailDetail::from_record(record))
	}

	/// Distinct non-empty tags, ascending. An empty archive is an empty
	/// list, not an error.
	pub async fn tags(&self) -> ServiceResult<Vec<String>> {
		let mut tags = self.backend.records.distinct_tags().await?;

		tags.sort();

		Ok(tags)
	}
}

/// A syntactically bad id is a client error, distinct from an unknown one.
pub(crate) fn parse_email_id(raw: &str) -> ServiceResult<Uuid> {
	Uuid::parse_str(raw.trim())
		.map_err(|_| ServiceError::InvalidRequest { message: format!("Malformed email id: {raw}.") })
}
