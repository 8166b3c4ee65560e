mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Postgres, Qdrant, Search, Service, Storage, Thread};

use std::{fs, path::Path};

const ALLOWED_WINDOW_DAYS: [u16; 5] = [7, 14, 30, 60, 90];

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.log_level.is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.qdrant.url.is_empty() {
		return Err(Error::Validation {
			message: "storage.qdrant.url must be non-empty.".to_string(),
		});
	}
	if cfg.storage.qdrant.collection.is_empty() {
		return Err(Error::Validation {
			message: "storage.qdrant.collection must be non-empty.".to_string(),
		});
	}
	if cfg.storage.qdrant.model.is_empty() {
		return Err(Error::Validation {
			message: "storage.qdrant.model must be non-empty.".to_string(),
		});
	}
	if cfg.search.max_page_size == 0 {
		return Err(Error::Validation {
			message: "search.max_page_size must be greater than zero.".to_string(),
		});
	}
	if cfg.search.default_page_size == 0
		|| cfg.search.default_page_size > cfg.search.max_page_size
	{
		return Err(Error::Validation {
			message: "search.default_page_size must be between 1 and search.max_page_size."
				.to_string(),
		});
	}
	if cfg.search.max_pages == 0 {
		return Err(Error::Validation {
			message: "search.max_pages must be greater than zero.".to_string(),
		});
	}
	if cfg.search.snippet_chars == 0 {
		return Err(Error::Validation {
			message: "search.snippet_chars must be greater than zero.".to_string(),
		});
	}
	if !ALLOWED_WINDOW_DAYS.contains(&cfg.thread.default_window_days) {
		return Err(Error::Validation {
			message: format!(
				"thread.default_window_days must be one of {ALLOWED_WINDOW_DAYS:?}."
			),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	trim(&mut cfg.service.http_bind);
	trim(&mut cfg.service.log_level);
	trim(&mut cfg.storage.postgres.dsn);
	trim(&mut cfg.storage.qdrant.url);
	trim(&mut cfg.storage.qdrant.collection);
	trim(&mut cfg.storage.qdrant.model);
}

fn trim(value: &mut String) {
	let trimmed = value.trim();

	if trimmed.len() != value.len() {
		*value = trimmed.to_string();
	}
}
