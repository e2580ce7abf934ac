use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::collections::BTreeSet;

use super::VocabStore;
use crate::error::VocabError;
use crate::models::{NewVocab, Vocab};

/// Stays well under SQLite's bound parameter limit / 单条语句的最大参数数
const DELETE_CHUNK: usize = 500;

/// SQLite-backed vocabulary store / SQLite 词汇存储
#[derive(Clone)]
pub struct SqliteVocabStore {
    pool: SqlitePool,
}

impl SqliteVocabStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VocabStore for SqliteVocabStore {
    async fn list_all(&self) -> Result<Vec<Vocab>, VocabError> {
        let vocabs = sqlx::query_as::<_, Vocab>(
            "SELECT id, word, context, source, zipf, created_at FROM vocabs ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(vocabs)
    }

    async fn get(&self, id: i64) -> Result<Option<Vocab>, VocabError> {
        let vocab = sqlx::query_as::<_, Vocab>(
            "SELECT id, word, context, source, zipf, created_at FROM vocabs WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(vocab)
    }

    async fn insert(&self, vocab: &NewVocab) -> Result<Vocab, VocabError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO vocabs (word, context, source, zipf, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&vocab.word)
        .bind(&vocab.context)
        .bind(&vocab.source)
        .bind(vocab.zipf)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Vocab {
            id: result.last_insert_rowid(),
            word: vocab.word.clone(),
            context: vocab.context.clone(),
            source: vocab.source.clone(),
            zipf: vocab.zipf,
            created_at: now,
        })
    }

    async fn delete_many(&self, ids: &BTreeSet<i64>) -> Result<u64, VocabError> {
        if ids.is_empty() {
            return Ok(0);
        }

        // Dropping the transaction without commit rolls everything back
        let mut tx = self.pool.begin().await?;
        let ids: Vec<i64> = ids.iter().copied().collect();
        let mut removed = 0u64;

        for chunk in ids.chunks(DELETE_CHUNK) {
            let mut builder: QueryBuilder<Sqlite> =
                QueryBuilder::new("DELETE FROM vocabs WHERE id IN (");
            let mut separated = builder.separated(", ");
            for id in chunk {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");

            let result = builder.build().execute(&mut *tx).await?;
            removed += result.rows_affected();
        }

        tx.commit().await?;
        Ok(removed)
    }

    async fn count(&self) -> Result<i64, VocabError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vocabs")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }
}
