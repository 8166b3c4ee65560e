pub mod records;
pub mod search;
pub mod thread;

use std::{collections::HashMap, future::Future, pin::Pin, sync::Arc};

use uuid::Uuid;

use mailarc_config::Config;
use mailarc_storage::{
	db::Db,
	fts,
	models::{EmailRecord, ParticipantPair, ScoredEmail, TextPage, TextQuery, VectorQuery},
	qdrant::{self, QdrantStore},
	queries,
};

pub use records::EmailDetail;
pub use search::{
	Pagination, RetrievalQuery, SearchHit, SearchMode, SearchRequest, SearchResponse,
};
pub use thread::{ThreadEntry, ThreadRequest, ThreadResponse};

// Cursor and direction types travel with requests, so callers get them from
// here rather than from the storage crate.
pub use mailarc_storage::models::{TextCursor, TextDirection};

pub type ServiceResult<T> = Result<T, ServiceError>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The full failure taxonomy of the core. Handlers must map each kind
/// separately; in particular `NotFound` and `InvalidRequest` are never
/// collapsed into the generic fault kinds.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Retrieval engine error: {message}")]
	Engine { message: String },
}

impl From<mailarc_storage::Error> for ServiceError {
	fn from(err: mailarc_storage::Error) -> Self {
		match err {
			mailarc_storage::Error::NotFound(message) => Self::NotFound { message },
			mailarc_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			mailarc_storage::Error::Sqlx(err) => Self::Storage { message: err.to_string() },
			mailarc_storage::Error::Qdrant(err) => Self::Engine { message: err.to_string() },
		}
	}
}

/// The external retrieval engine. The core only issues fully-built queries
/// against it and consumes ranked results; embedding generation and index
/// construction live behind this seam.
pub trait RetrievalEngine
where
	Self: Send + Sync,
{
	fn vector_query(&self, query: VectorQuery) -> BoxFuture<'_, ServiceResult<Vec<ScoredEmail>>>;

	fn text_query(&self, query: TextQuery) -> BoxFuture<'_, ServiceResult<TextPage>>;
}

/// Plain record access against the archive.
pub trait RecordStore
where
	Self: Send + Sync,
{
	fn fetch_by_id(&self, email_id: Uuid) -> BoxFuture<'_, ServiceResult<Option<EmailRecord>>>;

	fn distinct_tags(&self) -> BoxFuture<'_, ServiceResult<Vec<String>>>;

	fn thread_candidates(
		&self,
		pair: ParticipantPair,
	) -> BoxFuture<'_, ServiceResult<Vec<EmailRecord>>>;
}

#[derive(Clone)]
pub struct Backend {
	pub engine: Arc<dyn RetrievalEngine>,
	pub records: Arc<dyn RecordStore>,
}
impl Backend {
	pub fn from_storage(db: Db, qdrant: QdrantStore) -> Self {
		let shared = Arc::new(StorageBackend { db, qdrant });

		Self { engine: shared.clone(), records: shared }
	}
}

pub struct MailarcService {
	pub cfg: Config,
	pub backend: Backend,
}
impl MailarcService {
	pub fn new(cfg: Config, db: Db, qdrant: QdrantStore) -> Self {
		Self { cfg, backend: Backend::from_storage(db, qdrant) }
	}

	pub fn with_backend(cfg: Config, backend: Backend) -> Self {
		Self { cfg, backend }
	}
}

/// Default backend: Qdrant ranks semantic queries, Postgres answers keyword
/// queries and record access.
struct StorageBackend {
	db: Db,
	qdrant: QdrantStore,
}

impl RetrievalEngine for StorageBackend {
	fn vector_query(&self, query: VectorQuery) -> BoxFuture<'_, ServiceResult<Vec<ScoredEmail>>> {
		Box::pin(async move {
			let hits = qdrant::vector_search(&self.qdrant, &query).await?;
			let ids: Vec<Uuid> = hits.iter().map(|(id, _)| *id).collect();
			let records = queries::fetch_emails_ranked(&self.db, &ids).await?;

			if records.len() != ids.len() {
				// The index can run ahead of the record store while an import
				// is replaying; serve what exists.
				tracing::warn!(
					ranked = ids.len(),
					resolved = records.len(),
					"Retrieval engine returned ids with no backing record."
				);
			}

			let mut scores: HashMap<Uuid, f32> = hits.into_iter().collect();

			Ok(records
				.into_iter()
				.map(|record| {
					let score = scores.remove(&record.email_id).unwrap_or_default();

					ScoredEmail { record, score }
				})
				.collect())
		})
	}

	fn text_query(&self, query: TextQuery) -> BoxFuture<'_, ServiceResult<TextPage>> {
		Box::pin(async move { Ok(fts::text_search(&self.db, &query).await?) })
	}
}

impl RecordStore for StorageBackend {
	fn fetch_by_id(&self, email_id: Uuid) -> BoxFuture<'_, ServiceResult<Option<EmailRecord>>> {
		Box::pin(async move { Ok(queries::fetch_email(&self.db, email_id).await?) })
	}

	fn distinct_tags(&self) -> BoxFuture<'_, ServiceResult<Vec<String>>> {
		Box::pin(async move { Ok(queries::distinct_tags(&self.db).await?) })
	}

	fn thread_candidates(
		&self,
		pair: ParticipantPair,
	) -> BoxFuture<'_, ServiceResult<Vec<EmailRecord>>> {
		Box::pin(async move { Ok(queries::thread_candidates(&self.db, &pair).await?) })
	}
}
