use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use mailarc_service::{
	EmailDetail, SearchMode, SearchRequest, SearchResponse, ServiceError, ThreadRequest,
	ThreadResponse, search,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/search", get(run_search))
		.route("/v1/emails/{id}", get(email))
		.route("/v1/emails/{id}/thread", get(thread))
		.route("/v1/tags", get(tags))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
	pub query: String,
	pub mode: String,
	pub tag: Option<String>,
	pub date_start: Option<String>,
	pub date_end: Option<String>,
	pub page: Option<u32>,
	pub token: Option<String>,
	pub direction: Option<String>,
	pub page_size: Option<u32>,
}
impl SearchParams {
	fn into_request(self) -> Result<SearchRequest, ApiError> {
		let mode = SearchMode::parse(&self.mode)?;
		let direction =
			self.direction.as_deref().map(search::parse_direction).transpose()?;

		Ok(SearchRequest {
			query: self.query,
			mode,
			tag: self.tag,
			date_start: self.date_start,
			date_end: self.date_end,
			page: self.page,
			token: self.token,
			direction,
			page_size: self.page_size,
		})
	}
}

async fn run_search(
	State(state): State<AppState>,
	Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
	let request = params.into_request()?;
	let response = state.service.search(request).await?;
	Ok(Json(response))
}

async fn email(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<EmailDetail>, ApiError> {
	let response = state.service.email(&id).await?;
	Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct ThreadParams {
	pub days: Option<u16>,
}

async fn thread(
	State(state): State<AppState>,
	Path(id): Path<String>,
	Query(params): Query<ThreadParams>,
) -> Result<Json<ThreadResponse>, ApiError> {
	let request = ThreadRequest { email_id: id, window_days: params.days };
	let response = state.service.thread(request).await?;
	Ok(Json(response))
}

#[derive(Debug, Serialize)]
pub struct TagsResponse {
	pub tags: Vec<String>,
}

async fn tags(State(state): State<AppState>) -> Result<Json<TagsResponse>, ApiError> {
	let tags = state.service.tags().await?;
	Ok(Json(TagsResponse { tags }))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let (status, error_code) = match &err {
			ServiceError::InvalidRequest { .. } => (StatusCode::BAD_REQUEST, "invalid_request"),
			ServiceError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
			ServiceError::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
			ServiceError::Engine { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "retrieval_error"),
		};

		if status.is_server_error() {
			tracing::error!(error = %err, "Request failed.");
		}

		Self { status, error_code: error_code.to_string(), message: err.to_string() }
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };
		(self.status, Json(body)).into_response()
	}
}
