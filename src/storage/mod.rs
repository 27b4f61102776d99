//! Order store implementations

pub mod in_memory;
#[cfg(feature = "mysql")]
pub mod mysql;

pub use in_memory::InMemoryOrderStore;
#[cfg(feature = "mysql")]
pub use mysql::{MysqlOrderStore, ensure_schema};
