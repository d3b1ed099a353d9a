//! Shape checks on incoming transaction bodies.
//!
//! Runs before the engine sees the payload; business rules live in
//! `engine::transitions`.

use api_types::transaction::TransactionBody;
use engine::{EngineError, Transaction};

use crate::transactions::{from_api_line, from_api_status, from_api_type};

/// Checks status, type, price and orders (in that order) and builds the
/// engine transaction.
pub(crate) fn into_transaction(body: TransactionBody) -> Result<Transaction, EngineError> {
    let status = body.status.ok_or_else(|| {
        EngineError::invalid_transaction("error.status", "The status must be not empty")
    })?;
    let payment_type = body.payment_type.ok_or_else(|| {
        EngineError::invalid_transaction("error.type", "The type must be not empty")
    })?;
    // Written so that NaN is rejected too.
    if !(body.price > 0.0) {
        return Err(EngineError::invalid_transaction(
            "error.price",
            "The price must be positive",
        ));
    }
    let orders = body.orders.filter(|orders| !orders.is_empty()).ok_or_else(|| {
        EngineError::invalid_transaction("error.orders", "The orders must be not empty")
    })?;
    if orders.iter().any(|line| line.product_name.trim().is_empty()) {
        return Err(EngineError::invalid_transaction(
            "error.orders",
            "The product name must be not empty",
        ));
    }

    Ok(Transaction {
        id: body.id,
        price: body.price,
        payment_type: from_api_type(payment_type),
        status: from_api_status(status),
        orders: orders.into_iter().map(from_api_line).collect(),
    })
}

#[cfg(test)]
mod tests {
    use api_types::transaction::{OrderLine, PaymentType, TransactionStatus};

    use super::*;

    fn body() -> TransactionBody {
        TransactionBody {
            id: None,
            price: 54.80,
            payment_type: Some(PaymentType::BankCard),
            status: Some(TransactionStatus::New),
            orders: Some(vec![OrderLine {
                product_name: "gants de ski".to_string(),
                quantity: 4,
                price: 10.0,
            }]),
        }
    }

    fn key_of(body: TransactionBody) -> Option<&'static str> {
        into_transaction(body).err().and_then(|err| err.error_key())
    }

    #[test]
    fn complete_body_is_accepted() {
        let tx = into_transaction(body()).unwrap();
        assert_eq!(tx.status, engine::TransactionStatus::New);
        assert_eq!(tx.payment_type, engine::PaymentType::BankCard);
        assert_eq!(tx.orders.len(), 1);
    }

    #[test]
    fn each_missing_field_has_its_key() {
        assert_eq!(
            key_of(TransactionBody {
                status: None,
                ..body()
            }),
            Some("error.status")
        );
        assert_eq!(
            key_of(TransactionBody {
                payment_type: None,
                ..body()
            }),
            Some("error.type")
        );
        assert_eq!(
            key_of(TransactionBody {
                price: 0.0,
                ..body()
            }),
            Some("error.price")
        );
        assert_eq!(
            key_of(TransactionBody {
                price: f64::NAN,
                ..body()
            }),
            Some("error.price")
        );
        assert_eq!(
            key_of(TransactionBody {
                orders: Some(vec![]),
                ..body()
            }),
            Some("error.orders")
        );
        assert_eq!(
            key_of(TransactionBody {
                orders: None,
                ..body()
            }),
            Some("error.orders")
        );
    }

    #[test]
    fn status_is_checked_first() {
        assert_eq!(key_of(TransactionBody::default()), Some("error.status"));
    }

    #[test]
    fn blank_product_name_is_rejected() {
        let mut blank = body();
        if let Some(orders) = blank.orders.as_mut() {
            orders[0].product_name = "  ".to_string();
        }
        assert_eq!(key_of(blank), Some("error.orders"));
    }
}
