//! Order lines.
//!
//! An [`OrderLine`] is a purchased item inside a
//! [`Transaction`](crate::Transaction). Lines have value semantics: two lines
//! are the same line when product, quantity and unit price all match.

use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq)]
pub struct OrderLine {
    pub product_name: String,
    pub quantity: i32,
    /// Unit price.
    pub price: f64,
}

impl OrderLine {
    pub fn new(product_name: impl Into<String>, quantity: i32, price: f64) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
            price,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "order_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub transaction_id: String,
    pub position: i32,
    pub product_name: String,
    pub quantity: i32,
    pub price: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::transactions::Entity",
        from = "Column::TransactionId",
        to = "super::transactions::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Transactions,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn for_line(transaction_id: &str, position: i32, line: &OrderLine) -> Self {
        Self {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            transaction_id: ActiveValue::Set(transaction_id.to_string()),
            position: ActiveValue::Set(position),
            product_name: ActiveValue::Set(line.product_name.clone()),
            quantity: ActiveValue::Set(line.quantity),
            price: ActiveValue::Set(line.price),
        }
    }
}

impl From<Model> for OrderLine {
    fn from(model: Model) -> Self {
        Self {
            product_name: model.product_name,
            quantity: model.quantity,
            price: model.price,
        }
    }
}
