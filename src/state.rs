use sqlx::SqlitePool;
use std::sync::Arc;

use crate::service::VocabService;
use crate::store::SqliteVocabStore;

/// Shared request state / 全局共享状态
pub struct AppState {
    pub db: SqlitePool,
    pub vocabs: VocabService,
}

impl AppState {
    /// Wire the SQLite store into the list view controller / 初始化状态
    pub fn new(db: SqlitePool) -> Self {
        let store = SqliteVocabStore::new(db.clone());
        Self {
            db,
            vocabs: VocabService::new(Arc::new(store)),
        }
    }
}
