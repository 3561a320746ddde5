//! Order controller

use crate::domain::repository::DynOrderRepository;
use crate::domain::Order;
use crate::error::{ControllerError, Result};

#[derive(Clone)]
pub struct OrderController {
    orders: DynOrderRepository,
}

impl OrderController {
    pub fn new(orders: DynOrderRepository) -> Self { Self { orders } }

    pub async fn order(&self, id: &str) -> Result<Order> {
        self.orders.find(id).await?.ok_or_else(|| ControllerError::OrderNotFound.into())
    }
}
