use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::status::OrderStatus;

/// One cart line captured at placement time, already joined with the book's
/// current price. `unit_price` is copied verbatim onto the resulting order
/// line so later catalog price changes never affect a placed order.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub book_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderLineView {
    pub id: Uuid,
    pub book_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub shipping_address: String,
    pub status: OrderStatus,
    pub total: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLineView>,
}

/// Summary returned by the administrative status update.
#[derive(Debug, Clone)]
pub struct StatusUpdateView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: OrderStatus,
    pub total: BigDecimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct OrderPage {
    pub items: Vec<OrderView>,
    pub total: i64,
}

/// Validates the cart snapshot before an order may be built. An empty cart
/// is a business-rule failure, distinct from any data-layer error.
pub fn require_non_empty(lines: Vec<CartLine>) -> Result<Vec<CartLine>, DomainError> {
    if lines.is_empty() {
        return Err(DomainError::EmptyCart);
    }
    Ok(lines)
}

/// Exact order total: Σ unit_price × quantity, decimal arithmetic throughout.
pub fn order_total(lines: &[CartLine]) -> BigDecimal {
    lines.iter().fold(BigDecimal::from(0), |acc, line| {
        acc + &line.unit_price * BigDecimal::from(line.quantity)
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn line(price: &str, quantity: i32) -> CartLine {
        CartLine {
            book_id: Uuid::new_v4(),
            quantity,
            unit_price: BigDecimal::from_str(price).expect("valid decimal"),
        }
    }

    #[test]
    fn total_is_exact_to_the_cent() {
        let lines = vec![line("12.50", 2), line("5.00", 1)];
        assert_eq!(order_total(&lines), BigDecimal::from_str("30.00").unwrap());
    }

    #[test]
    fn total_of_no_lines_is_zero() {
        assert_eq!(order_total(&[]), BigDecimal::from(0));
    }

    #[test]
    fn total_has_no_floating_point_drift() {
        // 0.1 × 3 is the classic binary-float trap; BigDecimal must get 0.3.
        let lines = vec![line("0.10", 3)];
        assert_eq!(order_total(&lines), BigDecimal::from_str("0.30").unwrap());
    }

    #[test]
    fn empty_snapshot_is_rejected() {
        assert!(matches!(
            require_non_empty(vec![]),
            Err(DomainError::EmptyCart)
        ));
    }

    #[test]
    fn non_empty_snapshot_passes_through() {
        let lines = require_non_empty(vec![line("9.99", 1)]).expect("should pass");
        assert_eq!(lines.len(), 1);
    }
}
