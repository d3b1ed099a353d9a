use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::{EngineError, OrderLine, ResultEngine, Transaction, order_lines, transactions};

use super::{PageRequest, TransactionStore};

/// Store backed by the `transactions` and `order_lines` tables.
#[derive(Debug, Clone)]
pub struct DbStore {
    database: DatabaseConnection,
}

impl DbStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }

    async fn lines_for<C: ConnectionTrait>(
        conn: &C,
        ids: Vec<String>,
    ) -> ResultEngine<HashMap<String, Vec<order_lines::Model>>> {
        let mut by_tx: HashMap<String, Vec<order_lines::Model>> = HashMap::new();
        if ids.is_empty() {
            return Ok(by_tx);
        }

        let lines = order_lines::Entity::find()
            .filter(order_lines::Column::TransactionId.is_in(ids))
            .order_by_asc(order_lines::Column::TransactionId)
            .order_by_asc(order_lines::Column::Position)
            .all(conn)
            .await?;
        for line in lines {
            by_tx.entry(line.transaction_id.clone()).or_default().push(line);
        }
        Ok(by_tx)
    }
}

async fn insert_lines<C: ConnectionTrait>(
    conn: &C,
    transaction_id: &str,
    lines: &[OrderLine],
) -> ResultEngine<()> {
    for (position, line) in lines.iter().enumerate() {
        let position = i32::try_from(position).map_err(|_| {
            EngineError::invalid_transaction("error.orders", "too many order lines")
        })?;
        order_lines::ActiveModel::for_line(transaction_id, position, line)
            .insert(conn)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl TransactionStore for DbStore {
    async fn create(&self, transaction: Transaction) -> ResultEngine<Transaction> {
        let id = Uuid::new_v4().to_string();

        let db_tx = self.database.begin().await?;
        transactions::ActiveModel::new_row(&id, &transaction, Utc::now())
            .insert(&db_tx)
            .await?;
        insert_lines(&db_tx, &id, &transaction.orders).await?;
        db_tx.commit().await?;

        Ok(Transaction {
            id: Some(id),
            ..transaction
        })
    }

    async fn find_by_id(&self, id: &str) -> ResultEngine<Option<Transaction>> {
        let Some(model) = transactions::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
        else {
            return Ok(None);
        };

        let mut lines = Self::lines_for(&self.database, vec![model.id.clone()]).await?;
        let lines = lines.remove(&model.id).unwrap_or_default();
        Transaction::from_rows(model, lines).map(Some)
    }

    async fn exists_by_id(&self, id: &str) -> ResultEngine<bool> {
        let count = transactions::Entity::find_by_id(id.to_string())
            .count(&self.database)
            .await?;
        Ok(count > 0)
    }

    async fn count(&self) -> ResultEngine<u64> {
        Ok(transactions::Entity::find().count(&self.database).await?)
    }

    async fn find_page(&self, page: PageRequest) -> ResultEngine<Vec<Transaction>> {
        if page.size == 0 {
            return Ok(Vec::new());
        }

        let models = transactions::Entity::find()
            .order_by_asc(transactions::Column::CreatedAt)
            .order_by_asc(transactions::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.database)
            .await?;

        let ids = models.iter().map(|m| m.id.clone()).collect();
        let mut lines = Self::lines_for(&self.database, ids).await?;

        models
            .into_iter()
            .map(|model| {
                let rows = lines.remove(&model.id).unwrap_or_default();
                Transaction::from_rows(model, rows)
            })
            .collect()
    }

    async fn replace(&self, transaction: Transaction) -> ResultEngine<Transaction> {
        let id = transaction.id.clone().ok_or_else(|| {
            EngineError::invalid_transaction("idnull", "A transaction to replace needs an id")
        })?;

        let db_tx = self.database.begin().await?;
        transactions::ActiveModel::replacement(&id, &transaction)
            .update(&db_tx)
            .await
            .map_err(|err| match err {
                DbErr::RecordNotUpdated => {
                    EngineError::Conflict(format!("transaction {id} was removed concurrently"))
                }
                other => EngineError::Database(other),
            })?;
        order_lines::Entity::delete_many()
            .filter(order_lines::Column::TransactionId.eq(id.as_str()))
            .exec(&db_tx)
            .await?;
        insert_lines(&db_tx, &id, &transaction.orders).await?;
        db_tx.commit().await?;

        Ok(transaction)
    }
}
