use time::OffsetDateTime;
use uuid::Uuid;

use mailarc_service::{ServiceError, ThreadRequest};
use mailarc_storage::models::EmailRecord;

use super::fixtures::FakeArchive;

fn day(offset: i64) -> Option<OffsetDateTime> {
	OffsetDateTime::from_unix_timestamp(1_700_000_000 + offset * 86_400).ok()
}

fn mail(
	id: u128,
	subject: &str,
	sender: &str,
	recipient: &str,
	date: Option<OffsetDateTime>,
) -> EmailRecord {
	EmailRecord {
		email_id: Uuid::from_u128(id),
		subject: Some(subject.to_string()),
		sender: Some(sender.to_string()),
		recipient: Some(recipient.to_string()),
		date,
		body: format!("Body {id}"),
		tag: None,
	}
}

fn thread_request(id: u128, window_days: Option<u16>) -> ThreadRequest {
	ThreadRequest { email_id: Uuid::from_u128(id).to_string(), window_days }
}

#[tokio::test]
async fn reconstructs_the_conversation_in_order() {
	let archive = FakeArchive::new(vec![
		mail(1, "Project X", "a@example.com", "b@example.com", day(0)),
		mail(2, "Re: Project X", "b@example.com", "a@example.com", day(3)),
		mail(3, "Re[2]: Project X", "a@example.com", "b@example.com", day(-5)),
		mail(4, "Re: Project X", "b@example.com", "a@example.com", day(200)),
		mail(5, "Project X", "c@example.com", "d@example.com", day(1)),
		mail(6, "Other topic", "a@example.com", "b@example.com", day(1)),
	]);
	let service = archive.service();

	let response = service.thread(thread_request(1, Some(30))).await.expect("thread");

	let ids: Vec<u128> = response.thread.iter().map(|entry| entry.id.as_u128()).collect();

	assert_eq!(ids, vec![3, 1, 2]);
	assert_eq!(response.additional_count, 1);
	assert_eq!(response.date_window, 30);
	assert_eq!(response.base_email_id, Uuid::from_u128(1));
}

#[tokio::test]
async fn default_window_applies_when_none_is_given() {
	let archive = FakeArchive::new(vec![
		mail(1, "Project X", "a@example.com", "b@example.com", day(0)),
		mail(2, "Re: Project X", "b@example.com", "a@example.com", day(29)),
		mail(3, "Re: Project X", "b@example.com", "a@example.com", day(31)),
	]);
	let service = archive.service();

	let response = service.thread(thread_request(1, None)).await.expect("thread");

	assert_eq!(response.thread.len(), 2);
	assert_eq!(response.additional_count, 1);
	assert_eq!(response.date_window, 30);
}

#[tokio::test]
async fn widening_the_window_pulls_excluded_matches_in() {
	let archive = FakeArchive::new(vec![
		mail(1, "Project X", "a@example.com", "b@example.com", day(0)),
		mail(2, "Re: Project X", "b@example.com", "a@example.com", day(45)),
	]);
	let service = archive.service();

	let narrow = service.thread(thread_request(1, Some(30))).await.expect("narrow");

	assert_eq!(narrow.thread.len(), 1);
	assert_eq!(narrow.additional_count, 1);

	let wide = service.thread(thread_request(1, Some(60))).await.expect("wide");

	assert_eq!(wide.thread.len(), 2);
	assert_eq!(wide.additional_count, 0);
}

#[tokio::test]
async fn unsupported_window_is_a_client_error() {
	let archive = FakeArchive::new(vec![mail(
		1,
		"Project X",
		"a@example.com",
		"b@example.com",
		day(0),
	)]);
	let service = archive.service();

	assert!(matches!(
		service.thread(thread_request(1, Some(45))).await,
		Err(ServiceError::InvalidRequest { .. })
	));
}

#[tokio::test]
async fn unknown_seed_is_not_found() {
	let archive = FakeArchive::new(Vec::new());
	let service = archive.service();

	assert!(matches!(
		service.thread(thread_request(9, Some(30))).await,
		Err(ServiceError::NotFound { .. })
	));
}

#[tokio::test]
async fn dateless_seed_yields_a_single_entry_thread() {
	let archive = FakeArchive::new(vec![
		mail(1, "Project X", "a@example.com", "b@example.com", None),
		mail(2, "Re: Project X", "b@example.com", "a@example.com", day(0)),
	]);
	let service = archive.service();

	let response = service.thread(thread_request(1, Some(30))).await.expect("thread");

	assert_eq!(response.thread.len(), 1);
	assert_eq!(response.thread[0].id, Uuid::from_u128(1));
	assert_eq!(response.additional_count, 1);
}

#[tokio::test]
async fn entry_bodies_are_newline_normalized() {
	let mut seed = mail(1, "Project X", "a@example.com", "b@example.com", day(0));

	seed.body = "line one\n\n\n\nline two".to_string();

	let archive = FakeArchive::new(vec![seed]);
	let service = archive.service();

	let response = service.thread(thread_request(1, Some(30))).await.expect("thread");

	assert_eq!(response.thread[0].body, "line one\n\nline two");
}
