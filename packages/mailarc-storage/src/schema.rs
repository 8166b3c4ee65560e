/// Schema for the read side of the archive. The import pipeline owns the
/// rows; this service only creates the table and indexes so it can start
/// against an empty database.
pub fn render_schema() -> &'static str {
	"\
CREATE TABLE IF NOT EXISTS emails (
	email_id UUID PRIMARY KEY,
	subject TEXT,
	sender TEXT,
	recipient TEXT,
	date TIMESTAMPTZ,
	body TEXT NOT NULL DEFAULT '',
	tag TEXT,
	imported_at TIMESTAMPTZ NOT NULL DEFAULT now(),
	search_tsv tsvector GENERATED ALWAYS AS (
		to_tsvector(
			'english',
			coalesce(subject, '') || ' '
				|| coalesce(sender, '') || ' '
				|| coalesce(recipient, '') || ' '
				|| coalesce(body, '')
		)
	) STORED
);
CREATE INDEX IF NOT EXISTS idx_emails_search_tsv ON emails USING GIN (search_tsv);
CREATE INDEX IF NOT EXISTS idx_emails_tag ON emails (tag);
CREATE INDEX IF NOT EXISTS idx_emails_participants ON emails (sender, recipient);
CREATE INDEX IF NOT EXISTS idx_emails_date ON emails (date)"
}
