//! `storefront-core`: shared domain primitives.
//!
//! Identifiers and the domain error model used by every other crate. No
//! transport or storage concerns live here.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{OrderId, OrderItemId, ProductId, UserId};
