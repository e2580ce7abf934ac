//! Vocabulary storage interface / 词汇存储接口

use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::error::VocabError;
use crate::models::{NewVocab, Vocab};

mod sqlite;

pub use sqlite::SqliteVocabStore;

/// Storage backend interface (primitive operations only) / 存储后端接口
#[async_trait]
pub trait VocabStore: Send + Sync {
    /// All entries in insertion order / 按插入顺序返回全部条目
    async fn list_all(&self) -> Result<Vec<Vocab>, VocabError>;

    /// Single entry by id / 按ID获取
    async fn get(&self, id: i64) -> Result<Option<Vocab>, VocabError>;

    /// Insert and return the stored entry with its new id / 插入条目
    async fn insert(&self, vocab: &NewVocab) -> Result<Vocab, VocabError>;

    /// Remove all given ids in one transaction, returning rows removed.
    /// Unknown ids are skipped. / 批量删除（单事务）
    async fn delete_many(&self, ids: &BTreeSet<i64>) -> Result<u64, VocabError>;

    /// Total entry count / 条目总数
    async fn count(&self) -> Result<i64, VocabError>;
}
