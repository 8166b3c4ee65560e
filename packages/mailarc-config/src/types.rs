use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub search: Search,
	pub thread: Thread,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
	pub qdrant: Qdrant,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Qdrant {
	pub url: String,
	pub collection: String,
	/// Inference model the index was built with; the engine embeds queries
	/// server-side, this service never computes vectors.
	pub model: String,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	pub default_page_size: u32,
	pub max_page_size: u32,
	/// Deepest reachable page in vector mode; `nextPage` is never emitted
	/// at or past this bound.
	pub max_pages: u32,
	pub snippet_chars: usize,
}

#[derive(Debug, Deserialize)]
pub struct Thread {
	pub default_window_days: u16,
}
