//! Demo transactions written at startup when `app.seed_demo` is set.

use engine::{
    Engine, EngineError, OrderLine, PageRequest, PaymentType, Transaction, TransactionStatus,
};

const DEMO_PAGE_SIZE: u64 = 10;

/// Creates a bank card payment and walks it to `CAPTURED`, then creates a
/// PayPal payment and logs the first page of the listing.
pub async fn run(engine: &Engine) -> Result<(), EngineError> {
    let ski = engine
        .save(Transaction::new(
            54.80,
            PaymentType::BankCard,
            TransactionStatus::New,
            vec![
                OrderLine::new("gants de ski", 4, 10.0),
                OrderLine::new("bonnet en laine", 1, 14.80),
            ],
        ))
        .await?;
    let ski = engine
        .update(ski.with_status(TransactionStatus::Authorized))
        .await?;
    engine
        .update(ski.with_status(TransactionStatus::Captured))
        .await?;

    engine
        .save(Transaction::new(
            208.0,
            PaymentType::Paypal,
            TransactionStatus::New,
            vec![OrderLine::new("Vélo", 1, 208.0)],
        ))
        .await?;

    for transaction in engine
        .find_all(PageRequest::new(0, DEMO_PAGE_SIZE))
        .await?
    {
        tracing::info!("{transaction:?}");
    }
    Ok(())
}
