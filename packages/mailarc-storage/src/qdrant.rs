pub const DENSE_VECTOR_NAME: &str = "dense";

use qdrant_client::qdrant::{
	Condition, Document, Filter, Query, QueryPointsBuilder, Range, ScoredPoint,
	point_id::PointIdOptions,
};
use uuid::Uuid;

use crate::{Result, models::VectorQuery};

pub struct QdrantStore {
	pub client: qdrant_client::Qdrant,
	pub collection: String,
	pub model: String,
}
impl QdrantStore {
	pub fn new(cfg: &mailarc_config::Qdrant) -> Result<Self> {
		let client = qdrant_client::Qdrant::from_url(&cfg.url).build()?;

		Ok(Self { client, collection: cfg.collection.clone(), model: cfg.model.clone() })
	}
}

/// Runs one page of a semantic query and returns ranked (email id, score)
/// pairs. The query text is embedded by the engine itself via `Document`
/// inference; this service never computes vectors.
pub async fn vector_search(store: &QdrantStore, query: &VectorQuery) -> Result<Vec<(Uuid, f32)>> {
	let filter = build_filter(query);
	let mut search = QueryPointsBuilder::new(store.collection.clone())
		.query(Query::new_nearest(Document::new(query.text.clone(), store.model.clone())))
		.using(DENSE_VECTOR_NAME);

	if let Some(filter) = filter {
		search = search.filter(filter);
	}

	// The page window is attached only after every filter condition is in
	// place; nothing below this point rebuilds the query.
	let offset = u64::from(query.page.saturating_sub(1)) * u64::from(query.page_size);
	let search = search.limit(u64::from(query.page_size)).offset(offset);
	let response = store.client.query(search).await?;

	Ok(response.result.iter().filter_map(point_hit).collect())
}

fn build_filter(query: &VectorQuery) -> Option<Filter> {
	let mut must = Vec::new();

	if let Some(tag) = query.filters.tag.as_deref() {
		must.push(Condition::matches("tag", tag.to_string()));
	}
	if query.filters.date_start.is_some() || query.filters.date_end.is_some() {
		let range = Range {
			gte: query.filters.date_start.map(|bound| bound.unix_timestamp() as f64),
			lte: query.filters.date_end.map(|bound| bound.unix_timestamp() as f64),
			..Default::default()
		};

		must.push(Condition::range("date", range));
	}

	if must.is_empty() {
		None
	} else {
		Some(Filter { must, should: Vec::new(), must_not: Vec::new(), min_should: None })
	}
}

fn point_hit(point: &ScoredPoint) -> Option<(Uuid, f32)> {
	match point.id.as_ref()?.point_id_options.as_ref()? {
		PointIdOptions::Uuid(raw) => Uuid::parse_str(raw).ok().map(|id| (id, point.score)),
		PointIdOptions::Num(_) => None,
	}
}
