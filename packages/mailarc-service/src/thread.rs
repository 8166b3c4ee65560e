//! Conversation reconstruction around a seed email.
//!
//! A thread is whatever shares the seed's normalized subject and its
//! participant pair in either direction. Membership in the displayed
//! sequence is additionally bounded by a date window around the seed;
//! matches outside the window are only counted.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use mailarc_domain::{normalize, window::ThreadWindow};
use mailarc_storage::models::{EmailRecord, ParticipantPair};

use crate::{MailarcService, ServiceError, ServiceResult, records};

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadRequest {
	pub email_id: String,
	pub window_days: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadEntry {
	pub id: Uuid,
	pub subject: Option<String>,
	pub from: Option<String>,
	pub to: Option<String>,
	#[serde(with = "time::serde::rfc3339::option")]
	pub date: Option<OffsetDateTime>,
	pub body: String,
	pub tag: Option<String>,
}
impl ThreadEntry {
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

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadResponse {
	pub thread: Vec<ThreadEntry>,
	/// Subject/participant matches excluded by the date window.
	pub additional_count: u32,
	pub date_window: u16,
	pub base_email_id: Uuid,
}

impl MailarcService {
	pub async fn thread(&self, req: ThreadRequest) -> ServiceResult<ThreadResponse> {
		let email_id = records::parse_email_id(&req.email_id)?;
		let days = req.window_days.unwrap_or(self.cfg.thread.default_window_days);
		let window = ThreadWindow::from_days(days).ok_or_else(|| ServiceError::InvalidRequest {
			message: format!(
				"Window must be one of {:?} days, got {days}.",
				ThreadWindow::ALLOWED_DAYS
			),
		})?;
		let seed = self
			.backend
			.records
			.fetch_by_id(email_id)
			.await?
			.ok_or_else(|| ServiceError::NotFound { message: format!("Email {email_id}.") })?;
		let subject_key = normalize::normalize_subject(seed.subject.as_deref());
		let candidates =
			self.backend.records.thread_candidates(ParticipantPair::of(&seed)).await?;
		let (mut in_window, additional_count) =
			partition(&seed, candidates, &subject_key, window);

		if !in_window.iter().any(|record| record.email_id == seed.email_id) {
			in_window.push(seed.clone());
		}

		order_chronologically(&mut in_window);

		tracing::debug!(
			seed = %seed.email_id,
			matched = in_window.len(),
			excluded = additional_count,
			"Thread resolved."
		);

		Ok(ThreadResponse {
			thread: in_window.into_iter().map(ThreadEntry::from_record).collect(),
			additional_count,
			date_window: window.days(),
			base_email_id: seed.email_id,
		})
	}
}

/// Splits candidates into the windowed thread and the excluded remainder.
/// Non-matching subjects are not part of the conversation at all and count
/// nowhere. The seed always belongs to its own thread.
fn partition(
	seed: &EmailRecord,
	candidates: Vec<EmailRecord>,
	subject_key: &str,
	window: ThreadWindow,
) -> (Vec<EmailRecord>, u32) {
	let mut in_window = Vec::new();
	let mut additional = 0_u32;

	for candidate in candidates {
		if normalize::normalize_subject(candidate.subject.as_deref()) != subject_key {
			continue;
		}
		if candidate.email_id == seed.email_id
			|| dates_within(seed.date, candidate.date, window)
		{
			in_window.push(candidate);
		} else {
			additional += 1;
		}
	}

	(in_window, additional)
}

/// True when both dates exist and the candidate falls inside the inclusive
/// window around the seed. A dateless seed anchors no window, so every other
/// match lands in the excluded count.
fn dates_within(
	seed: Option<OffsetDateTime>,
	candidate: Option<OffsetDateTime>,
	window: ThreadWindow,
) -> bool {
	let (Some(seed), Some(candidate)) = (seed, candidate) else {
		return false;
	};
	let span = window.duration();

	candidate >= seed - span && candidate <= seed + span
}

/// Date ascending so the thread reads top to bottom; dateless entries sort
/// last, ids break ties for a stable order.
fn order_chronologically(records: &mut [EmailRecord]) {
	records.sort_by(|a, b| match (a.date, b.date) {
		(Some(left), Some(right)) =>
			left.cmp(&right).then_with(|| a.email_id.cmp(&b.email_id)),
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => a.email_id.cmp(&b.email_id),
	});
}
