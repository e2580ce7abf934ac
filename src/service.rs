//! List view controller / 列表视图控制器
//!
//! Filters the vocabulary list by a search term and applies single or bulk
//! deletions. Selection state lives entirely on the client; it only reaches
//! the server as the id set passed to [`VocabService::delete`].

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::VocabError;
use crate::models::{CreateVocabRequest, NewVocab, Vocab};
use crate::store::VocabStore;

/// Longest accepted search term / 搜索词最大长度
pub const MAX_QUERY_LEN: usize = 200;

/// Trim the raw search term; blank means "match everything" / 规范化搜索词
pub fn normalize_query(query: Option<&str>) -> Result<Option<String>, VocabError> {
    let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) else {
        return Ok(None);
    };
    if query.chars().count() > MAX_QUERY_LEN {
        return Err(VocabError::InvalidInput(format!(
            "Search term must be at most {} characters",
            MAX_QUERY_LEN
        )));
    }
    Ok(Some(query.to_lowercase()))
}

/// Case-insensitive substring match on the word / 单词子串匹配（忽略大小写）
///
/// `needle` must already be lower-cased.
pub fn word_matches(vocab: &Vocab, needle: &str) -> bool {
    vocab.word.to_lowercase().contains(needle)
}

#[derive(Clone)]
pub struct VocabService {
    store: Arc<dyn VocabStore>,
}

impl VocabService {
    pub fn new(store: Arc<dyn VocabStore>) -> Self {
        Self { store }
    }

    /// Entries matching `query`, in insertion order / 按搜索词过滤
    pub async fn list(&self, query: Option<&str>) -> Result<Vec<Vocab>, VocabError> {
        let needle = normalize_query(query)?;
        let vocabs = self.store.list_all().await?;

        Ok(match needle {
            Some(needle) => vocabs.into_iter().filter(|v| word_matches(v, &needle)).collect(),
            None => vocabs,
        })
    }

    /// Remove the selected entries atomically / 批量删除
    pub async fn delete(&self, ids: &BTreeSet<i64>) -> Result<u64, VocabError> {
        if ids.is_empty() {
            return Err(VocabError::InvalidInput("No vocabs selected".to_string()));
        }
        let removed = self.store.delete_many(ids).await?;
        tracing::info!("Deleted {} of {} selected vocabs", removed, ids.len());
        Ok(removed)
    }

    /// Remove one entry, reporting whether it existed / 删除单个条目
    pub async fn delete_one(&self, id: i64) -> Result<bool, VocabError> {
        Ok(self.delete(&BTreeSet::from([id])).await? > 0)
    }

    pub async fn count(&self) -> Result<i64, VocabError> {
        self.store.count().await
    }

    pub async fn get(&self, id: i64) -> Result<Vocab, VocabError> {
        self.store.get(id).await?.ok_or(VocabError::NotFound(id))
    }

    /// Validate and store a new entry / 新增词汇
    pub async fn create(&self, req: &CreateVocabRequest) -> Result<Vocab, VocabError> {
        let new_vocab = NewVocab::try_from(req)?;
        let vocab = self.store.insert(&new_vocab).await?;
        tracing::info!("Added vocab {} ({})", vocab.id, vocab.word);
        Ok(vocab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use crate::store::SqliteVocabStore;

    async fn service() -> VocabService {
        let store = SqliteVocabStore::new(memory_pool().await);
        VocabService::new(Arc::new(store))
    }

    async fn add(service: &VocabService, word: &str) -> Vocab {
        service
            .create(&CreateVocabRequest {
                word: word.to_string(),
                ..Default::default()
            })
            .await
            .unwrap()
    }

    fn ids(vocabs: &[Vocab]) -> Vec<i64> {
        vocabs.iter().map(|v| v.id).collect()
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query(None).unwrap(), None);
        assert_eq!(normalize_query(Some("   ")).unwrap(), None);
        assert_eq!(normalize_query(Some(" PHEM ")).unwrap().as_deref(), Some("phem"));
        let long = "x".repeat(MAX_QUERY_LEN + 1);
        assert!(matches!(
            normalize_query(Some(&long)),
            Err(VocabError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_ephemeral_ubiquitous_scenario() {
        let service = service().await;
        let ephemeral = add(&service, "ephemeral").await;
        let ubiquitous = add(&service, "ubiquitous").await;

        let found = service.list(Some("phem")).await.unwrap();
        assert_eq!(ids(&found), vec![ephemeral.id]);

        let removed = service.delete(&BTreeSet::from([ephemeral.id])).await.unwrap();
        assert_eq!(removed, 1);

        let rest = service.list(None).await.unwrap();
        assert_eq!(ids(&rest), vec![ubiquitous.id]);
        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let service = service().await;
        let strasse = add(&service, "Straße").await;
        let ephemeral = add(&service, "Ephemeral").await;

        assert_eq!(ids(&service.list(Some("eph")).await.unwrap()), vec![ephemeral.id]);
        assert_eq!(ids(&service.list(Some("STRASSE")).await.unwrap()), Vec::<i64>::new());
        assert_eq!(ids(&service.list(Some("STRAß")).await.unwrap()), vec![strasse.id]);
        assert!(service.list(Some("zzz")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_ignores_context_and_source() {
        let service = service().await;
        service
            .create(&CreateVocabRequest {
                word: "laconic".to_string(),
                context: Some("a terse reply".to_string()),
                source: Some("novel".to_string()),
                zipf: Some("2.1".to_string()),
            })
            .await
            .unwrap();

        assert!(service.list(Some("terse")).await.unwrap().is_empty());
        assert!(service.list(Some("novel")).await.unwrap().is_empty());
        assert_eq!(service.list(Some("lacon")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_none_returns_insertion_order() {
        let service = service().await;
        let mut expected = Vec::new();
        for word in ["gamma", "alpha", "beta"] {
            expected.push(add(&service, word).await.id);
        }
        assert_eq!(ids(&service.list(None).await.unwrap()), expected);
        assert_eq!(ids(&service.list(Some("")).await.unwrap()), expected);
    }

    #[tokio::test]
    async fn test_delete_unknown_ids_is_noop() {
        let service = service().await;
        let kept = add(&service, "kept").await;

        let removed = service.delete(&BTreeSet::from([kept.id + 100, kept.id + 200])).await.unwrap();
        assert_eq!(removed, 0);
        assert_eq!(ids(&service.list(None).await.unwrap()), vec![kept.id]);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let service = service().await;
        let a = add(&service, "a").await;
        let b = add(&service, "b").await;
        let c = add(&service, "c").await;
        let selection = BTreeSet::from([a.id, c.id]);

        assert_eq!(service.delete(&selection).await.unwrap(), 2);
        let after_first = service.list(None).await.unwrap();
        assert_eq!(service.delete(&selection).await.unwrap(), 0);
        let after_second = service.list(None).await.unwrap();

        assert_eq!(after_first, after_second);
        assert_eq!(ids(&after_second), vec![b.id]);
    }

    #[tokio::test]
    async fn test_empty_selection_rejected() {
        let service = service().await;
        add(&service, "word").await;
        assert!(matches!(
            service.delete(&BTreeSet::new()).await,
            Err(VocabError::InvalidInput(_))
        ));
        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_one_and_get() {
        let service = service().await;
        let v = add(&service, "word").await;

        assert_eq!(service.get(v.id).await.unwrap().word, "word");
        assert!(service.delete_one(v.id).await.unwrap());
        assert!(!service.delete_one(v.id).await.unwrap());
        assert!(matches!(service.get(v.id).await, Err(VocabError::NotFound(_))));
    }
}
