use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{EngineError, ResultEngine, Transaction};

use super::{PageRequest, TransactionStore};

/// In-process store, records kept in creation order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Transaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored record, in creation order.
    pub async fn snapshot(&self) -> Vec<Transaction> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn create(&self, transaction: Transaction) -> ResultEngine<Transaction> {
        let stored = Transaction {
            id: Some(Uuid::new_v4().to_string()),
            ..transaction
        };
        self.records.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &str) -> ResultEngine<Option<Transaction>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|tx| tx.id.as_deref() == Some(id))
            .cloned())
    }

    async fn exists_by_id(&self, id: &str) -> ResultEngine<bool> {
        let records = self.records.read().await;
        Ok(records.iter().any(|tx| tx.id.as_deref() == Some(id)))
    }

    async fn count(&self) -> ResultEngine<u64> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn find_page(&self, page: PageRequest) -> ResultEngine<Vec<Transaction>> {
        let records = self.records.read().await;
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        Ok(records.iter().skip(skip).take(take).cloned().collect())
    }

    async fn replace(&self, transaction: Transaction) -> ResultEngine<Transaction> {
        let id = transaction.id.clone().ok_or_else(|| {
            EngineError::invalid_transaction("idnull", "A transaction to replace needs an id")
        })?;

        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|tx| tx.id.as_deref() == Some(id.as_str()))
            .ok_or_else(|| {
                EngineError::Conflict(format!("transaction {id} was removed concurrently"))
            })?;
        *slot = transaction.clone();
        Ok(transaction)
    }
}
