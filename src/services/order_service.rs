use crate::data::models::order::{Order, OrderStatus};
use crate::data::models::user::User;
use crate::data::repos::implementors::order_repo::{OrderLine, OrderRepo};
use crate::services::errors::OrderServiceError;
use std::str::FromStr;

/// Read views over committed orders plus the admin-driven status workflow.
/// Order creation lives in the checkout engine.
pub struct OrderService;

impl OrderService {
    pub fn new() -> Self {
        OrderService
    }

    /// A user's order history, newest first, each order with its lines.
    pub async fn get_user_orders(
        &self,
        user_id: i32,
    ) -> Result<Vec<(Order, Vec<OrderLine>)>, OrderServiceError> {
        let repo = OrderRepo::new();

        let orders = repo
            .get_by_user_id(user_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?
            .unwrap_or_default();

        repo.attach_items(orders)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)
    }

    /// Every order with purchaser identity and lines, newest first.
    pub async fn get_all_orders_admin(
        &self,
    ) -> Result<Vec<(Order, User, Vec<OrderLine>)>, OrderServiceError> {
        let repo = OrderRepo::new();

        let with_users = repo
            .get_all_with_users()
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?
            .unwrap_or_default();

        let (orders, users): (Vec<Order>, Vec<User>) = with_users.into_iter().unzip();

        let with_items = repo
            .attach_items(orders)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?;

        Ok(with_items
            .into_iter()
            .zip(users)
            .map(|((order, lines), user)| (order, user, lines))
            .collect())
    }

    /// Advances an order along the fulfilment workflow. Steps that leave
    /// the workflow (skipping ahead, resurrecting a terminal order) are
    /// rejected.
    pub async fn update_order_status(
        &self,
        order_id: i32,
        new_status: OrderStatus,
    ) -> Result<Order, OrderServiceError> {
        let repo = OrderRepo::new();

        let order = repo
            .get_by_id(order_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?
            .ok_or(OrderServiceError::OrderNotFound)?;

        let current = OrderStatus::from_str(&order.status)
            .map_err(|_| OrderServiceError::DatabaseError)?;

        if !current.can_transition_to(new_status) {
            return Err(OrderServiceError::InvalidStatusTransition);
        }

        repo.update_status(order_id, new_status)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?;

        repo.get_by_id(order_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?
            .ok_or(OrderServiceError::OrderNotFound)
    }
}

impl Default for OrderService {
    fn default() -> Self {
        Self::new()
    }
}
