//! Transactions API endpoints

use api_types::transaction::{
    OrderLine as ApiOrderLine, PaymentType as ApiPaymentType, TransactionBody, TransactionPage,
    TransactionStatus as ApiStatus, TransactionView,
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header::LOCATION},
};
use engine::{DbErr, EngineError, PageRequest, Transaction};

use crate::{ServerError, headers, server::ServerState, validation};

const BASE_PATH: &str = "/api/transactions";
const MAX_PAGE_SIZE: u64 = 2000;

pub(crate) fn from_api_type(payment_type: ApiPaymentType) -> engine::PaymentType {
    match payment_type {
        ApiPaymentType::BankCard => engine::PaymentType::BankCard,
        ApiPaymentType::GiftCard => engine::PaymentType::GiftCard,
        ApiPaymentType::Paypal => engine::PaymentType::Paypal,
    }
}

pub(crate) fn from_api_status(status: ApiStatus) -> engine::TransactionStatus {
    match status {
        ApiStatus::New => engine::TransactionStatus::New,
        ApiStatus::Authorized => engine::TransactionStatus::Authorized,
        ApiStatus::Captured => engine::TransactionStatus::Captured,
    }
}

pub(crate) fn from_api_line(line: ApiOrderLine) -> engine::OrderLine {
    engine::OrderLine {
        product_name: line.product_name,
        quantity: line.quantity,
        price: line.price,
    }
}

fn map_type(payment_type: engine::PaymentType) -> ApiPaymentType {
    match payment_type {
        engine::PaymentType::BankCard => ApiPaymentType::BankCard,
        engine::PaymentType::GiftCard => ApiPaymentType::GiftCard,
        engine::PaymentType::Paypal => ApiPaymentType::Paypal,
    }
}

fn map_status(status: engine::TransactionStatus) -> ApiStatus {
    match status {
        engine::TransactionStatus::New => ApiStatus::New,
        engine::TransactionStatus::Authorized => ApiStatus::Authorized,
        engine::TransactionStatus::Captured => ApiStatus::Captured,
    }
}

/// Stored transactions always carry an id; one without is a storage fault.
fn to_view(transaction: Transaction) -> Result<TransactionView, ServerError> {
    let id = transaction
        .id
        .ok_or(EngineError::Database(DbErr::RecordNotInserted))?;

    Ok(TransactionView {
        id,
        price: transaction.price,
        payment_type: map_type(transaction.payment_type),
        status: map_status(transaction.status),
        orders: transaction
            .orders
            .into_iter()
            .map(|line| ApiOrderLine {
                product_name: line.product_name,
                quantity: line.quantity,
                price: line.price,
            })
            .collect(),
    })
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<TransactionBody>, JsonRejection>,
) -> Result<(StatusCode, HeaderMap, Json<TransactionView>), ServerError> {
    let Json(body) = payload?;
    tracing::debug!("REST request to save Transaction : {body:?}");
    if body.id.is_some() {
        return Err(ServerError::bad_request(
            "idexists",
            "A new transaction cannot already have an ID",
        ));
    }

    let transaction = validation::into_transaction(body)?;
    let view = to_view(state.engine.save(transaction).await?)?;

    let mut response_headers = headers::entity_alert("created", &view.id);
    headers::insert(
        &mut response_headers,
        &LOCATION,
        &format!("{BASE_PATH}/{}", view.id),
    );
    Ok((StatusCode::CREATED, response_headers, Json(view)))
}

pub async fn update(
    State(state): State<ServerState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<TransactionBody>, JsonRejection>,
) -> Result<(HeaderMap, Json<TransactionView>), ServerError> {
    let Path(id) = path?;
    let Json(body) = payload?;
    tracing::debug!("REST request to update Transaction : {id}, {body:?}");

    match body.id.as_deref() {
        None => return Err(ServerError::bad_request("idnull", "Invalid id")),
        Some(body_id) if body_id != id => {
            return Err(ServerError::bad_request("idinvalid", "Invalid ID"));
        }
        Some(_) => {}
    }

    let transaction = validation::into_transaction(body)?;
    if !state.engine.exists_by_id(&id).await? {
        return Err(ServerError::bad_request("idnotfound", "Entity not found"));
    }

    let view = to_view(state.engine.update(transaction).await?)?;
    let response_headers = headers::entity_alert("updated", &view.id);
    Ok((response_headers, Json(view)))
}

pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<TransactionPage>, QueryRejection>,
) -> Result<(HeaderMap, Json<Vec<TransactionView>>), ServerError> {
    let Query(query) = query?;
    tracing::debug!("REST request to get a page of Transactions");

    let page = PageRequest::new(
        query.page.unwrap_or(0),
        query
            .size
            .unwrap_or(PageRequest::DEFAULT_SIZE)
            .clamp(1, MAX_PAGE_SIZE),
    );
    let total = state.engine.count_all().await?;
    let transactions = state
        .engine
        .find_all(page)
        .await?
        .into_iter()
        .map(to_view)
        .collect::<Result<Vec<_>, _>>()?;

    Ok((
        headers::pagination(BASE_PATH, page, total),
        Json(transactions),
    ))
}

pub async fn get(
    State(state): State<ServerState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<TransactionView>, ServerError> {
    let Path(id) = path?;
    tracing::debug!("REST request to get Transaction : {id}");

    let transaction = state
        .engine
        .find_one(&id)
        .await?
        .ok_or(EngineError::KeyNotFound(id))?;
    Ok(Json(to_view(transaction)?))
}
