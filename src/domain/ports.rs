use uuid::Uuid;

use super::errors::DomainError;
use super::order::{OrderLineView, OrderPage, OrderView, StatusUpdateView};
use super::status::OrderStatus;

/// Persistence boundary for orders.
///
/// `place` owns the whole placement transaction: snapshotting the caller's
/// cart, writing the order and its lines, and clearing the cart are one
/// atomic unit, so two racing placements for the same user can never both
/// consume the cart.
///
/// The user-scoped lookups return `None` both when the order does not exist
/// and when it belongs to someone else; callers cannot distinguish the two.
pub trait OrderStore: Send + Sync + 'static {
    fn place(&self, user_id: Uuid, shipping_address: &str) -> Result<OrderView, DomainError>;

    fn find_for_user(&self, user_id: Uuid, order_id: Uuid)
        -> Result<Option<OrderView>, DomainError>;

    fn list_for_user(&self, user_id: Uuid, page: i64, limit: i64)
        -> Result<OrderPage, DomainError>;

    fn find_line_item(
        &self,
        user_id: Uuid,
        order_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<OrderLineView>, DomainError>;

    /// Administrative path: no ownership scoping, any status may replace any
    /// other. Fails with `NotFound` before mutating anything.
    fn update_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<StatusUpdateView, DomainError>;
}
