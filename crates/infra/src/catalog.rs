//! Product catalog store.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, ProductId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price in the smallest currency unit.
    pub price_cents: u64,
    pub stock: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: u64,
    #[serde(default)]
    pub stock: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<u64>,
    pub stock: Option<u32>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    products: BTreeMap<ProductId, Product>,
}

/// In-memory product catalog for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Inner>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ProductId) -> DomainResult<Product> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.products.get(&id).cloned().ok_or(DomainError::NotFound)
    }

    pub fn list(&self) -> Vec<Product> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.products.values().cloned().collect()
    }

    pub fn create(&self, new: NewProduct) -> DomainResult<Product> {
        if new.name.trim().is_empty() {
            return Err(DomainError::validation("product name must not be empty"));
        }

        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.next_id += 1;
        let product = Product {
            id: ProductId::new(inner.next_id),
            name: new.name.trim().to_string(),
            description: new.description,
            price_cents: new.price_cents,
            stock: new.stock,
        };
        inner.products.insert(product.id, product.clone());
        Ok(product)
    }

    pub fn update(&self, id: ProductId, changes: ProductChanges) -> DomainResult<Product> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let product = inner.products.get_mut(&id).ok_or(DomainError::NotFound)?;

        if let Some(name) = changes.name.filter(|n| !n.trim().is_empty()) {
            product.name = name.trim().to_string();
        }
        if let Some(description) = changes.description {
            product.description = description;
        }
        if let Some(price) = changes.price_cents {
            product.price_cents = price;
        }
        if let Some(stock) = changes.stock {
            product.stock = stock;
        }
        Ok(product.clone())
    }

    pub fn delete(&self, id: ProductId) -> DomainResult<Product> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.products.remove(&id).ok_or(DomainError::NotFound)
    }
}
