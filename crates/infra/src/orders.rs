//! Order store.

use core::str::FromStr;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, OrderId, OrderItemId, ProductId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

/// Parses the status path segment (`/order_status/:order_id/:status`).
impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::validation(format!("unknown order status '{other}'"))),
        }
    }
}

/// A requested line: which product, how many.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A stored line of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Default)]
struct Inner {
    next_order_id: u64,
    next_item_id: u64,
    orders: BTreeMap<OrderId, Order>,
}

/// In-memory order store for tests/dev.
///
/// Every order keeps at least one item: placing an empty order and removing
/// the last item are both refused.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    inner: RwLock<Inner>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(&self, new: NewOrder) -> DomainResult<Order> {
        if new.items.is_empty() {
            return Err(DomainError::validation("an order needs at least one item"));
        }
        if new.items.iter().any(|i| i.quantity == 0) {
            return Err(DomainError::validation("item quantity must be positive"));
        }

        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.next_order_id += 1;
        let order_id = OrderId::new(inner.next_order_id);

        let mut items = Vec::with_capacity(new.items.len());
        for line in new.items {
            inner.next_item_id += 1;
            items.push(OrderItem {
                id: OrderItemId::new(inner.next_item_id),
                order_id,
                product_id: line.product_id,
                quantity: line.quantity,
            });
        }

        let order = Order {
            id: order_id,
            user_id: new.user_id,
            items,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };
        inner.orders.insert(order.id, order.clone());
        Ok(order)
    }

    pub fn get(&self, id: OrderId) -> DomainResult<Order> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.orders.get(&id).cloned().ok_or(DomainError::NotFound)
    }

    pub fn items(&self, id: OrderId) -> DomainResult<Vec<OrderItem>> {
        self.get(id).map(|order| order.items)
    }

    pub fn list_for_user(&self, user_id: UserId) -> Vec<Order> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn set_status(&self, id: OrderId, status: OrderStatus) -> DomainResult<Order> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let order = inner.orders.get_mut(&id).ok_or(DomainError::NotFound)?;
        order.status = status;
        Ok(order.clone())
    }

    pub fn delete(&self, id: OrderId) -> DomainResult<Order> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.orders.remove(&id).ok_or(DomainError::NotFound)
    }

    /// Remove one line from whichever order holds it.
    pub fn delete_item(&self, id: OrderItemId) -> DomainResult<OrderItem> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let order = inner
            .orders
            .values_mut()
            .find(|o| o.items.iter().any(|i| i.id == id))
            .ok_or(DomainError::NotFound)?;

        if order.items.len() == 1 {
            return Err(DomainError::conflict("cannot remove the last item of an order"));
        }
        let pos = order
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(DomainError::NotFound)?;
        Ok(order.items.remove(pos))
    }
}
