use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{OrderLineView, OrderPage, OrderView, StatusUpdateView};
use crate::domain::ports::OrderStore;
use crate::domain::status::OrderStatus;

/// Application facade over the order store. Placement and the status update
/// are thin delegations; the item lookups add the "invisible means not
/// found" rule on top of the scoped store queries.
pub struct OrderService<S> {
    store: S,
}

impl<S: OrderStore> OrderService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn place_order(
        &self,
        user_id: Uuid,
        shipping_address: &str,
    ) -> Result<OrderView, DomainError> {
        self.store.place(user_id, shipping_address)
    }

    pub fn list_orders(
        &self,
        user_id: Uuid,
        page: i64,
        limit: i64,
    ) -> Result<OrderPage, DomainError> {
        self.store.list_for_user(user_id, page, limit)
    }

    pub fn get_order_items(
        &self,
        user_id: Uuid,
        order_id: Uuid,
    ) -> Result<Vec<OrderLineView>, DomainError> {
        let order = self
            .store
            .find_for_user(user_id, order_id)?
            .ok_or(DomainError::NotFound)?;
        Ok(order.lines)
    }

    pub fn get_order_item(
        &self,
        user_id: Uuid,
        order_id: Uuid,
        item_id: Uuid,
    ) -> Result<OrderLineView, DomainError> {
        self.store
            .find_line_item(user_id, order_id, item_id)?
            .ok_or(DomainError::NotFound)
    }

    pub fn update_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<StatusUpdateView, DomainError> {
        self.store.update_status(order_id, status)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use chrono::Utc;

    use super::*;

    /// A canned store: holds at most one order and answers the scoped
    /// lookups from it.
    struct StubStore {
        order: Option<OrderView>,
    }

    impl OrderStore for StubStore {
        fn place(&self, _user_id: Uuid, _shipping_address: &str) -> Result<OrderView, DomainError> {
            self.order.clone().ok_or(DomainError::EmptyCart)
        }

        fn find_for_user(
            &self,
            user_id: Uuid,
            order_id: Uuid,
        ) -> Result<Option<OrderView>, DomainError> {
            Ok(self
                .order
                .clone()
                .filter(|o| o.id == order_id && o.user_id == user_id))
        }

        fn list_for_user(
            &self,
            user_id: Uuid,
            _page: i64,
            _limit: i64,
        ) -> Result<OrderPage, DomainError> {
            let items: Vec<_> = self
                .order
                .clone()
                .filter(|o| o.user_id == user_id)
                .into_iter()
                .collect();
            let total = items.len() as i64;
            Ok(OrderPage { items, total })
        }

        fn find_line_item(
            &self,
            user_id: Uuid,
            order_id: Uuid,
            item_id: Uuid,
        ) -> Result<Option<OrderLineView>, DomainError> {
            Ok(self
                .order
                .as_ref()
                .filter(|o| o.id == order_id && o.user_id == user_id)
                .and_then(|o| o.lines.iter().find(|l| l.id == item_id).cloned()))
        }

        fn update_status(
            &self,
            order_id: Uuid,
            status: OrderStatus,
        ) -> Result<StatusUpdateView, DomainError> {
            let order = self
                .order
                .as_ref()
                .filter(|o| o.id == order_id)
                .ok_or(DomainError::NotFound)?;
            Ok(StatusUpdateView {
                id: order.id,
                user_id: order.user_id,
                status,
                total: order.total.clone(),
                created_at: order.created_at,
            })
        }
    }

    fn sample_order(user_id: Uuid) -> OrderView {
        let order_id = Uuid::new_v4();
        OrderView {
            id: order_id,
            user_id,
            shipping_address: "somewhere".to_string(),
            status: OrderStatus::Pending,
            total: BigDecimal::from_str("30.00").unwrap(),
            created_at: Utc::now(),
            lines: vec![OrderLineView {
                id: Uuid::new_v4(),
                book_id: Uuid::new_v4(),
                quantity: 2,
                unit_price: BigDecimal::from_str("15.00").unwrap(),
            }],
        }
    }

    #[test]
    fn items_of_an_invisible_order_are_not_found() {
        let owner = Uuid::new_v4();
        let order = sample_order(owner);
        let order_id = order.id;
        let service = OrderService::new(StubStore { order: Some(order) });

        let result = service.get_order_items(Uuid::new_v4(), order_id);

        assert!(matches!(result, Err(DomainError::NotFound)));
    }

    #[test]
    fn items_of_an_owned_order_are_returned() {
        let owner = Uuid::new_v4();
        let order = sample_order(owner);
        let order_id = order.id;
        let service = OrderService::new(StubStore { order: Some(order) });

        let items = service.get_order_items(owner, order_id).expect("items");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn missing_line_item_is_not_found() {
        let owner = Uuid::new_v4();
        let order = sample_order(owner);
        let order_id = order.id;
        let service = OrderService::new(StubStore { order: Some(order) });

        let result = service.get_order_item(owner, order_id, Uuid::new_v4());

        assert!(matches!(result, Err(DomainError::NotFound)));
    }

    #[test]
    fn empty_cart_error_passes_through_placement() {
        let service = OrderService::new(StubStore { order: None });

        let result = service.place_order(Uuid::new_v4(), "somewhere");

        assert!(matches!(result, Err(DomainError::EmptyCart)));
    }
}
