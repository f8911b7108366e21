use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{DocumentStore, RepositoryError};
use crate::domain::DocumentRecord;

use super::super::search_regex;

const INVALID_REGULAR_EXPRESSION: &str = "2201B";

pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    name: String,
    text: String,
    created_at: DateTime<Utc>,
}

impl From<DocumentRow> for DocumentRecord {
    fn from(row: DocumentRow) -> Self {
        Self {
            name: row.name,
            text: row.text,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    #[instrument(skip(self, record), fields(name = %record.name, text_chars = record.text.len()))]
    async fn store(&self, record: &DocumentRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO document_texts (id, name, text, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.name)
        .bind(&record.text)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self, pattern))]
    async fn search(&self, pattern: &str) -> Result<Vec<DocumentRecord>, RepositoryError> {
        let expression = search_regex(pattern);

        let rows = match self.fetch_matching(&expression).await {
            Err(e) if is_invalid_regex(&e) => {
                tracing::debug!(error = %e, "Postgres rejected search pattern, matching literally");
                self.fetch_matching(&regex::escape(pattern)).await
            }
            other => other,
        }
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(rows.into_iter().map(DocumentRecord::from).collect())
    }
}

impl PgDocumentStore {
    async fn fetch_matching(&self, expression: &str) -> Result<Vec<DocumentRow>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT name, text, created_at
            FROM document_texts
            WHERE text ~* $1
            ORDER BY created_at, id
            "#,
        )
        .bind(expression)
        .fetch_all(&self.pool)
        .await
    }
}

/// Postgres speaks ARE, not Rust regex syntax, so a pattern `search_regex`
/// accepts can still be rejected here (`(?P<n>...)`, `\z`).
fn is_invalid_regex(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(INVALID_REGULAR_EXPRESSION)
    )
}
