use std::sync::Arc;

use mailarc_service::MailarcService;
use mailarc_storage::{db::Db, qdrant::QdrantStore};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<MailarcService>,
}
impl AppState {
	pub async fn new(config: mailarc_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let qdrant = QdrantStore::new(&config.storage.qdrant)?;
		let service = MailarcService::new(config, db, qdrant);

		Ok(Self { service: Arc::new(service) })
	}

	pub fn with_service(service: MailarcService) -> Self {
		Self { service: Arc::new(service) }
	}
}
