//! Persistence of transactions.
//!
//! The engine only talks to a [`TransactionStore`]; [`DbStore`] is the
//! database-backed one and [`MemoryStore`] keeps everything in process.

use async_trait::async_trait;

use crate::{ResultEngine, Transaction};

mod db;
mod memory;

pub use db::DbStore;
pub use memory::MemoryStore;

/// Zero-based page of a listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    pub const DEFAULT_SIZE: u64 = 20;

    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    /// Largest offset or limit a database query can bind (SQL integers are `i64`).
    pub const MAX_ROWS: u64 = i64::MAX as u64;

    /// Rows to skip, capped at [`Self::MAX_ROWS`]; pages past the end are empty.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size).min(Self::MAX_ROWS)
    }

    pub fn limit(&self) -> u64 {
        self.size.min(Self::MAX_ROWS)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_SIZE)
    }
}

/// Storage keyed by transaction id.
///
/// Implementations must give read-after-write consistency for a single id.
#[async_trait]
pub trait TransactionStore: Send + Sync + std::fmt::Debug {
    /// Persists a new transaction, assigning its id. Any id already set on
    /// `transaction` is ignored.
    async fn create(&self, transaction: Transaction) -> ResultEngine<Transaction>;

    async fn find_by_id(&self, id: &str) -> ResultEngine<Option<Transaction>>;

    async fn exists_by_id(&self, id: &str) -> ResultEngine<bool>;

    async fn count(&self) -> ResultEngine<u64>;

    /// One page in creation order.
    async fn find_page(&self, page: PageRequest) -> ResultEngine<Vec<Transaction>>;

    /// Overwrites the record with the same id. Fails with
    /// [`EngineError::Conflict`](crate::EngineError::Conflict) when the record
    /// is gone.
    async fn replace(&self, transaction: Transaction) -> ResultEngine<Transaction>;
}
