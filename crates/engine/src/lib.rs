//! Payment transaction engine.
//!
//! Records transactions through a [`TransactionStore`] and guards every update
//! with the rules in [`transitions`]: status only moves along
//! `NEW → AUTHORIZED → CAPTURED` and order lines never change once stored.

pub use error::EngineError;
pub use ops::{Engine, EngineBuilder};
pub use sea_orm::DbErr;
pub use order_lines::OrderLine;
pub use store::{DbStore, MemoryStore, PageRequest, TransactionStore};
pub use transactions::{PaymentType, Transaction, TransactionStatus};

mod error;
mod ops;
mod order_lines;
mod store;
mod transactions;
pub mod transitions;

/// Entity name carried by domain errors.
pub const ENTITY_NAME: &str = "transaction";

type ResultEngine<T> = Result<T, EngineError>;
