//! Rules deciding whether a proposed transaction is a legal successor of the
//! stored one.
//!
//! Only two things are gated on update: the status move and the order lines.
//! Price and payment type may change freely.

use crate::{EngineError, OrderLine, ResultEngine, Transaction, TransactionStatus};

impl TransactionStatus {
    /// Whether a transaction stored in `self` may be updated to `next`.
    ///
    /// A captured transaction stays captured, and capture must go through
    /// `Authorized`. `Authorized → New` is allowed.
    pub fn can_transition_to(self, next: TransactionStatus) -> bool {
        use TransactionStatus::{Authorized, Captured, New};

        match (self, next) {
            (Captured, Captured) => true,
            (Captured, New | Authorized) => false,
            (New, Captured) => false,
            (New, New | Authorized) => true,
            (Authorized, New | Authorized | Captured) => true,
        }
    }
}

pub fn is_status_transition_allowed(stored: &Transaction, proposed: &Transaction) -> bool {
    stored.status.can_transition_to(proposed.status)
}

/// True when `proposed` carries exactly the stored order lines, compared as a
/// multiset (order does not matter, duplicates are counted).
pub fn are_order_lines_immutable(stored: &Transaction, proposed: &Transaction) -> bool {
    same_order_lines(&stored.orders, &proposed.orders)
}

fn same_order_lines(stored: &[OrderLine], proposed: &[OrderLine]) -> bool {
    if stored.len() != proposed.len() {
        return false;
    }

    let mut taken = vec![false; proposed.len()];
    stored.iter().all(|line| {
        match (0..proposed.len()).find(|&i| !taken[i] && proposed[i] == *line) {
            Some(i) => {
                taken[i] = true;
                true
            }
            None => false,
        }
    })
}

/// Runs the update rules in order (status first, then orders).
pub fn check_update(stored: &Transaction, proposed: &Transaction) -> ResultEngine<()> {
    if !is_status_transition_allowed(stored, proposed) {
        return Err(EngineError::rule_violation(
            "error.transaction.update",
            format!(
                "The status {} cannot be modified as {}",
                stored.status, proposed.status
            ),
        ));
    }
    if !are_order_lines_immutable(stored, proposed) {
        return Err(EngineError::rule_violation(
            "error.transaction.update",
            "Orders must be immutable",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PaymentType;
    use TransactionStatus::{Authorized, Captured, New};

    fn tx(status: TransactionStatus, orders: Vec<OrderLine>) -> Transaction {
        Transaction::new(54.80, PaymentType::BankCard, status, orders)
    }

    fn ski_orders() -> Vec<OrderLine> {
        vec![
            OrderLine::new("gants de ski", 4, 10.0),
            OrderLine::new("bonnet en laine", 1, 14.80),
        ]
    }

    #[test]
    fn identity_transition_is_always_allowed() {
        for status in TransactionStatus::ALL {
            assert!(status.can_transition_to(status), "{status} -> {status}");
        }
    }

    #[test]
    fn captured_is_locked() {
        assert!(!Captured.can_transition_to(New));
        assert!(!Captured.can_transition_to(Authorized));
    }

    #[test]
    fn capture_requires_authorization_first() {
        assert!(!New.can_transition_to(Captured));
        assert!(New.can_transition_to(Authorized));
        assert!(Authorized.can_transition_to(Captured));
    }

    #[test]
    fn authorized_may_go_back_to_new() {
        assert!(Authorized.can_transition_to(New));
    }

    #[test]
    fn status_predicate_reads_both_snapshots() {
        let stored = tx(New, ski_orders());
        assert!(is_status_transition_allowed(&stored, &tx(Authorized, ski_orders())));
        assert!(!is_status_transition_allowed(&stored, &tx(Captured, ski_orders())));
    }

    #[test]
    fn same_lines_are_immutable_even_with_duplicates() {
        let line = OrderLine::new("Vélo", 1, 208.0);
        let orders = vec![line.clone(), line.clone(), OrderLine::new("casque", 1, 30.0)];
        assert!(are_order_lines_immutable(&tx(New, orders.clone()), &tx(New, orders)));
    }

    #[test]
    fn line_order_does_not_matter() {
        let mut reversed = ski_orders();
        reversed.reverse();
        assert!(are_order_lines_immutable(&tx(New, ski_orders()), &tx(Authorized, reversed)));
    }

    #[test]
    fn changed_count_is_rejected() {
        let mut more = ski_orders();
        more.push(OrderLine::new("chaussettes", 2, 5.0));
        assert!(!are_order_lines_immutable(&tx(New, ski_orders()), &tx(New, more)));
        assert!(!are_order_lines_immutable(&tx(New, ski_orders()), &tx(New, vec![])));
    }

    #[test]
    fn changed_field_is_rejected() {
        let stored = tx(New, ski_orders());
        let mut renamed = ski_orders();
        renamed[0].product_name = "gants".to_string();
        let mut requantified = ski_orders();
        requantified[1].quantity = 2;
        let mut repriced = ski_orders();
        repriced[1].price = 15.0;

        for orders in [renamed, requantified, repriced] {
            assert!(!are_order_lines_immutable(&stored, &tx(New, orders)));
        }
    }

    #[test]
    fn duplicate_cannot_stand_in_for_a_missing_line() {
        let a = OrderLine::new("a", 1, 1.0);
        let b = OrderLine::new("b", 1, 1.0);
        let stored = tx(New, vec![a.clone(), a.clone(), b.clone()]);
        let proposed = tx(New, vec![a.clone(), b.clone(), b]);
        assert!(!are_order_lines_immutable(&stored, &proposed));
    }

    #[test]
    fn check_update_reports_status_before_orders() {
        let stored = tx(Captured, ski_orders());
        let err = check_update(&stored, &tx(Authorized, vec![])).unwrap_err();
        assert_eq!(
            err,
            EngineError::rule_violation(
                "error.transaction.update",
                "The status CAPTURED cannot be modified as AUTHORIZED"
            )
        );
    }

    #[test]
    fn check_update_reports_mutated_orders() {
        let stored = tx(New, ski_orders());
        let err = check_update(&stored, &tx(Authorized, vec![])).unwrap_err();
        assert_eq!(err.to_string(), "Orders must be immutable");
    }

    #[test]
    fn price_and_type_are_not_gated() {
        let stored = tx(New, ski_orders());
        let mut proposed = tx(Authorized, ski_orders());
        proposed.price = 99.0;
        proposed.payment_type = PaymentType::Paypal;
        assert!(check_update(&stored, &proposed).is_ok());
    }
}
