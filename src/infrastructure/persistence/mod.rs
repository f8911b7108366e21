mod pg_pool;
mod repositories;
mod search_pattern;

pub use pg_pool::{create_pool, run_migrations};
pub use repositories::{InMemoryDocumentStore, PgDocumentStore};
pub use search_pattern::search_regex;
