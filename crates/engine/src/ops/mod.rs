use std::sync::Arc;

use sea_orm::{DatabaseConnection, DbErr};

use crate::{DbStore, EngineError, ResultEngine, TransactionStore};

mod transactions;

/// Transaction service: every read and write goes through the configured
/// [`TransactionStore`].
#[derive(Debug, Clone)]
pub struct Engine {
    store: Arc<dyn TransactionStore>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    store: Option<Arc<dyn TransactionStore>>,
}

impl EngineBuilder {
    /// Pass the required database, persisted through [`DbStore`].
    pub fn database(self, db: DatabaseConnection) -> EngineBuilder {
        self.store(Arc::new(DbStore::new(db)))
    }

    /// Pass any store implementation.
    pub fn store(mut self, store: Arc<dyn TransactionStore>) -> EngineBuilder {
        self.store = Some(store);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        let store = self.store.ok_or_else(|| {
            EngineError::Database(DbErr::Custom(
                "engine built without a transaction store".to_string(),
            ))
        })?;
        Ok(Engine { store })
    }
}
