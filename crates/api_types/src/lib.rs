use serde::{Deserialize, Serialize};

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum PaymentType {
        BankCard,
        GiftCard,
        Paypal,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum TransactionStatus {
        New,
        Authorized,
        Captured,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct OrderLine {
        pub product_name: String,
        pub quantity: i32,
        /// Unit price.
        pub price: f64,
    }

    /// Request body for `POST /api/transactions` and `PUT /api/transactions/{id}`.
    ///
    /// Every field is optional on the wire so that a missing field is reported
    /// as a validation problem instead of a decoding error.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct TransactionBody {
        /// Must be absent on create and equal to the path id on update.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub id: Option<String>,
        #[serde(default)]
        pub price: f64,
        #[serde(rename = "type", default)]
        pub payment_type: Option<PaymentType>,
        #[serde(default)]
        pub status: Option<TransactionStatus>,
        #[serde(default)]
        pub orders: Option<Vec<OrderLine>>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: String,
        pub price: f64,
        #[serde(rename = "type")]
        pub payment_type: PaymentType,
        pub status: TransactionStatus,
        pub orders: Vec<OrderLine>,
    }

    /// Query string of `GET /api/transactions`.
    #[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
    pub struct TransactionPage {
        /// Zero-based page index.
        pub page: Option<u64>,
        pub size: Option<u64>,
    }
}

pub mod problem {
    use super::*;

    pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

    /// RFC 7807 problem details returned on every error.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Problem {
        #[serde(rename = "type")]
        pub problem_type: String,
        pub title: String,
        pub status: u16,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub detail: Option<String>,
        /// Translation key for front-ends (`error.validation`, `error.http.404`, ...).
        pub message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub entity_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub error_key: Option<String>,
    }
}
