//! Transaction primitives.
//!
//! A `Transaction` is a payment record: a price, a payment type, a lifecycle
//! status and the [`OrderLine`]s it is made of.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{EngineError, OrderLine};

use super::order_lines;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaymentType {
    BankCard,
    GiftCard,
    Paypal,
}

impl PaymentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BankCard => "BANK_CARD",
            Self::GiftCard => "GIFT_CARD",
            Self::Paypal => "PAYPAL",
        }
    }
}

impl TryFrom<&str> for PaymentType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "BANK_CARD" => Ok(Self::BankCard),
            "GIFT_CARD" => Ok(Self::GiftCard),
            "PAYPAL" => Ok(Self::Paypal),
            other => Err(EngineError::invalid_transaction(
                "error.type",
                format!("invalid payment type: {other}"),
            )),
        }
    }
}

/// Lifecycle status of a transaction.
///
/// Conceptually ordered `New → Authorized → Captured`; the legal moves are
/// decided by [`TransactionStatus::can_transition_to`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    New,
    Authorized,
    Captured,
}

impl TransactionStatus {
    pub const ALL: [Self; 3] = [Self::New, Self::Authorized, Self::Captured];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Authorized => "AUTHORIZED",
            Self::Captured => "CAPTURED",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TransactionStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "NEW" => Ok(Self::New),
            "AUTHORIZED" => Ok(Self::Authorized),
            "CAPTURED" => Ok(Self::Captured),
            other => Err(EngineError::invalid_transaction(
                "error.status",
                format!("invalid transaction status: {other}"),
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    /// Assigned by the store on first persistence.
    pub id: Option<String>,
    pub price: f64,
    pub payment_type: PaymentType,
    pub status: TransactionStatus,
    pub orders: Vec<OrderLine>,
}

impl Transaction {
    pub fn new(
        price: f64,
        payment_type: PaymentType,
        status: TransactionStatus,
        orders: Vec<OrderLine>,
    ) -> Self {
        Self {
            id: None,
            price,
            payment_type,
            status,
            orders,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub price: f64,
    pub payment_type: String,
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_lines::Entity")]
    OrderLines,
}

impl Related<super::order_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Full row for a freshly created transaction.
    pub(crate) fn new_row(id: &str, tx: &Transaction, created_at: DateTime<Utc>) -> Self {
        Self {
            id: ActiveValue::Set(id.to_string()),
            price: ActiveValue::Set(tx.price),
            payment_type: ActiveValue::Set(tx.payment_type.as_str().to_string()),
            status: ActiveValue::Set(tx.status.as_str().to_string()),
            created_at: ActiveValue::Set(created_at),
        }
    }

    /// Mutable columns only; `created_at` is left untouched.
    pub(crate) fn replacement(id: &str, tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Unchanged(id.to_string()),
            price: ActiveValue::Set(tx.price),
            payment_type: ActiveValue::Set(tx.payment_type.as_str().to_string()),
            status: ActiveValue::Set(tx.status.as_str().to_string()),
            ..Default::default()
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(model.id),
            price: model.price,
            payment_type: PaymentType::try_from(model.payment_type.as_str())?,
            status: TransactionStatus::try_from(model.status.as_str())?,
            orders: Vec::new(),
        })
    }
}

impl Transaction {
    pub(crate) fn from_rows(
        model: Model,
        lines: Vec<order_lines::Model>,
    ) -> Result<Self, EngineError> {
        let mut tx = Self::try_from(model)?;
        tx.orders = lines.into_iter().map(OrderLine::from).collect();
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_use_upper_case_names() {
        assert_eq!(PaymentType::BankCard.as_str(), "BANK_CARD");
        assert_eq!(TransactionStatus::Authorized.to_string(), "AUTHORIZED");
        for status in TransactionStatus::ALL {
            assert_eq!(TransactionStatus::try_from(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_stored_status_is_rejected() {
        let err = TransactionStatus::try_from("REFUNDED").unwrap_err();
        assert_eq!(err.error_key(), Some("error.status"));
    }
}
