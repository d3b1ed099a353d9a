use crate::{
    EngineError, PageRequest, ResultEngine, Transaction, TransactionStatus, transitions,
};

use super::Engine;

impl Engine {
    /// Persists a new transaction. It must start in [`TransactionStatus::New`];
    /// the store assigns the id.
    pub async fn save(&self, transaction: Transaction) -> ResultEngine<Transaction> {
        tracing::debug!("Request to save Transaction : {transaction:?}");
        if transaction.status != TransactionStatus::New {
            return Err(EngineError::rule_violation(
                "error.transaction.status",
                "A new transaction must be created with status NEW",
            ));
        }
        self.store.create(transaction).await
    }

    /// Replaces a stored transaction with `transaction` once the status move
    /// and the order lines pass [`transitions::check_update`].
    ///
    /// Exactly one write happens, and only when every rule passes.
    pub async fn update(&self, transaction: Transaction) -> ResultEngine<Transaction> {
        tracing::debug!("Request to update Transaction : {transaction:?}");
        let id = transaction
            .id
            .as_deref()
            .ok_or_else(|| EngineError::invalid_transaction("idnull", "Invalid id"))?;

        let stored = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;

        if let Err(err) = transitions::check_update(&stored, &transaction) {
            tracing::debug!("Rejected update of Transaction {id}: {err}");
            return Err(err);
        }

        self.store.replace(transaction).await
    }

    pub async fn find_all(&self, page: PageRequest) -> ResultEngine<Vec<Transaction>> {
        tracing::debug!("Request to get all Transactions");
        self.store.find_page(page).await
    }

    pub async fn find_one(&self, id: &str) -> ResultEngine<Option<Transaction>> {
        tracing::debug!("Request to get Transaction : {id}");
        self.store.find_by_id(id).await
    }

    pub async fn exists_by_id(&self, id: &str) -> ResultEngine<bool> {
        self.store.exists_by_id(id).await
    }

    pub async fn count_all(&self) -> ResultEngine<u64> {
        self.store.count().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{MemoryStore, OrderLine, PaymentType};

    use super::*;

    async fn engine_with_store() -> (Engine, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let engine = Engine::builder().store(store.clone()).build().await.unwrap();
        (engine, store)
    }

    fn ski_transaction() -> Transaction {
        Transaction::new(
            54.80,
            PaymentType::BankCard,
            TransactionStatus::New,
            vec![
                OrderLine::new("gants de ski", 4, 10.0),
                OrderLine::new("bonnet en laine", 1, 14.80),
            ],
        )
    }

    #[tokio::test]
    async fn builder_without_store_fails() {
        assert!(Engine::builder().build().await.is_err());
    }

    #[tokio::test]
    async fn save_rejects_non_new_status_without_writing() {
        let (engine, store) = engine_with_store().await;
        let err = engine
            .save(ski_transaction().with_status(TransactionStatus::Authorized))
            .await
            .unwrap_err();

        assert_eq!(err.error_key(), Some("error.transaction.status"));
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn update_without_id_is_invalid() {
        let (engine, _store) = engine_with_store().await;
        let err = engine.update(ski_transaction()).await.unwrap_err();
        assert_eq!(err, EngineError::invalid_transaction("idnull", "Invalid id"));
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let (engine, store) = engine_with_store().await;
        let err = engine
            .update(ski_transaction().with_id("missing"))
            .await
            .unwrap_err();
        assert_eq!(err, EngineError::KeyNotFound("missing".to_string()));
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn rejected_update_leaves_store_untouched() {
        let (engine, store) = engine_with_store().await;
        let saved = engine.save(ski_transaction()).await.unwrap();
        let before = store.snapshot().await;

        let mut proposed = saved.clone().with_status(TransactionStatus::Authorized);
        proposed.orders.pop();
        proposed.price = 1.0;
        assert!(engine.update(proposed).await.is_err());

        assert_eq!(store.snapshot().await, before);
    }

    #[tokio::test]
    async fn accepted_update_replaces_every_field() {
        let (engine, _store) = engine_with_store().await;
        let saved = engine.save(ski_transaction()).await.unwrap();

        let mut proposed = saved.clone().with_status(TransactionStatus::Authorized);
        proposed.price = 60.0;
        proposed.payment_type = PaymentType::GiftCard;
        proposed.orders.reverse();
        engine.update(proposed.clone()).await.unwrap();

        let id = saved.id.as_deref().unwrap();
        assert_eq!(engine.find_one(id).await.unwrap(), Some(proposed));
    }

    #[tokio::test]
    async fn read_operations_delegate_to_store() {
        let (engine, _store) = engine_with_store().await;
        let saved = engine.save(ski_transaction()).await.unwrap();
        let id = saved.id.clone().unwrap();

        assert!(engine.exists_by_id(&id).await.unwrap());
        assert!(!engine.exists_by_id("nope").await.unwrap());
        assert_eq!(engine.count_all().await.unwrap(), 1);
        assert_eq!(engine.find_all(PageRequest::default()).await.unwrap(), vec![saved]);
        assert_eq!(engine.find_one("nope").await.unwrap(), None);
    }
}
