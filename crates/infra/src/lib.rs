//! Infrastructure layer: record stores behind the domain contracts.
//!
//! Only in-memory implementations exist; they back the binary and the test
//! suites. A database-backed store would implement the same traits.

pub mod catalog;
pub mod orders;
pub mod users;

pub use catalog::{InMemoryProductStore, NewProduct, Product, ProductChanges};
pub use orders::{InMemoryOrderStore, NewOrder, Order, OrderItem, OrderLine, OrderStatus};
pub use users::InMemoryUserRepository;
