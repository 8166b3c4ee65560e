use mailarc_service::{Pagination, RetrievalQuery, SearchMode, SearchRequest, ServiceError};
use mailarc_storage::models::TextDirection;
use uuid::Uuid;

use super::fixtures::{FakeArchive, email, tagged};

fn request(mode: SearchMode) -> SearchRequest {
	SearchRequest {
		query: "invoice".to_string(),
		mode,
		tag: None,
		date_start: None,
		date_end: None,
		page: None,
		token: None,
		direction: None,
		page_size: None,
	}
}

fn hit_ids(response: &mailarc_service::SearchResponse) -> Vec<u128> {
	response.results.iter().map(|hit| hit.id.as_u128()).collect()
}

#[tokio::test]
async fn text_pages_forward_without_duplicates_or_gaps() {
	let archive = FakeArchive::new((1..=5).map(email).collect());
	let service = archive.service();

	let mut req = request(SearchMode::Text);

	req.page_size = Some(2);

	let first = service.search(req.clone()).await.expect("first page");

	assert_eq!(hit_ids(&first), vec![1, 2]);

	let Pagination::Text { next_token, has_more, .. } = first.pagination else {
		panic!("expected text pagination");
	};

	assert!(has_more);

	req.token = next_token;
	req.direction = Some(TextDirection::After);

	let second = service.search(req.clone()).await.expect("second page");

	assert_eq!(hit_ids(&second), vec![3, 4]);

	let Pagination::Text { next_token, .. } = second.pagination else {
		panic!("expected text pagination");
	};

	req.token = next_token;

	let third = service.search(req).await.expect("third page");

	assert_eq!(hit_ids(&third), vec![5]);

	let Pagination::Text { has_more, .. } = third.pagination else {
		panic!("expected text pagination");
	};

	assert!(!has_more);
}

#[tokio::test]
async fn text_prev_token_returns_to_the_previous_page() {
	let archive = FakeArchive::new((1..=6).map(email).collect());
	let service = archive.service();

	let mut req = request(SearchMode::Text);

	req.page_size = Some(3);

	let first = service.search(req.clone()).await.expect("first page");
	let Pagination::Text { next_token, .. } = first.pagination else {
		panic!("expected text pagination");
	};

	req.token = next_token;
	req.direction = Some(TextDirection::After);

	let second = service.search(req.clone()).await.expect("second page");

	assert_eq!(hit_ids(&second), vec![4, 5, 6]);

	let Pagination::Text { prev_token, .. } = second.pagination else {
		panic!("expected text pagination");
	};

	req.token = prev_token;
	req.direction = Some(TextDirection::Before);

	let back = service.search(req).await.expect("previous page");

	assert_eq!(hit_ids(&back), vec![1, 2, 3]);
}

#[tokio::test]
async fn tag_filter_survives_cursor_resumption() {
	let mut emails: Vec<_> = (1..=4).map(|id| tagged(id, "Finance")).collect();

	emails.extend((5..=8).map(|id| tagged(id, "Legal")));

	let archive = FakeArchive::new(emails);
	let service = archive.service();

	let mut req = request(SearchMode::Text);

	req.tag = Some("Finance".to_string());
	req.page_size = Some(2);

	let first = service.search(req.clone()).await.expect("first page");

	assert_eq!(hit_ids(&first), vec![1, 2]);

	let Pagination::Text { next_token, .. } = first.pagination else {
		panic!("expected text pagination");
	};

	req.token = next_token;
	req.direction = Some(TextDirection::After);

	let second = service.search(req).await.expect("resumed page");

	assert_eq!(hit_ids(&second), vec![3, 4]);

	let RetrievalQuery::Text(query) = archive.last_query() else {
		panic!("expected text query");
	};

	assert_eq!(query.filters.tag.as_deref(), Some("Finance"));
	assert!(query.cursor.is_some());
}

#[tokio::test]
async fn vector_pages_walk_the_ranked_window() {
	let archive = FakeArchive::new((1..=5).map(email).collect());
	let service = archive.service();

	let mut req = request(SearchMode::Vector);

	req.page_size = Some(2);
	req.page = Some(2);

	let response = service.search(req).await.expect("page two");

	assert_eq!(hit_ids(&response), vec![3, 4]);
	assert_eq!(
		response.pagination,
		Pagination::Vector {
			page_size: 2,
			current_page: 2,
			has_more: true,
			next_page: Some(3),
			prev_page: Some(1),
		}
	);
}

#[tokio::test]
async fn vector_next_page_never_crosses_the_cap() {
	let archive = FakeArchive::new((1..=40).map(email).collect());
	let service = archive.service();

	let mut req = request(SearchMode::Vector);

	req.page_size = Some(1);
	req.page = Some(20);

	let at_cap = service.search(req.clone()).await.expect("page at cap");
	let Pagination::Vector { has_more, next_page, prev_page, .. } = at_cap.pagination else {
		panic!("expected vector pagination");
	};

	assert!(has_more);
	assert_eq!(next_page, None);
	assert_eq!(prev_page, Some(19));

	// A deep link past the cap still answers; it just cannot advance.
	req.page = Some(21);

	let past_cap = service.search(req).await.expect("page past cap");

	assert_eq!(hit_ids(&past_cap), vec![21]);

	let Pagination::Vector { next_page, .. } = past_cap.pagination else {
		panic!("expected vector pagination");
	};

	assert_eq!(next_page, None);
}

#[tokio::test]
async fn switching_modes_resets_the_cursor() {
	let archive = FakeArchive::new((1..=3).map(email).collect());
	let service = archive.service();

	let mut req = request(SearchMode::Vector);

	req.token = Some(Uuid::from_u128(2).simple().to_string());
	req.direction = Some(TextDirection::After);

	let response = service.search(req).await.expect("vector search");

	assert_eq!(hit_ids(&response), vec![1, 2, 3]);

	let RetrievalQuery::Vector(query) = archive.last_query() else {
		panic!("expected vector query");
	};

	assert_eq!(query.page, 1);
}

#[tokio::test]
async fn blank_query_is_rejected_before_any_retrieval() {
	let archive = FakeArchive::new((1..=3).map(email).collect());
	let service = archive.service();

	let mut req = request(SearchMode::Text);

	req.query = "  ".to_string();

	assert!(matches!(
		service.search(req).await,
		Err(ServiceError::InvalidRequest { .. })
	));
	assert!(archive.captured.lock().expect("capture lock").is_empty());
}
