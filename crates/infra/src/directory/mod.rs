//! Supplier directory: read access to the party records materials point at.

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

use materials_catalog::MaterialResult;
use materials_parties::{Supplier, SupplierId};

pub use in_memory::InMemorySupplierDirectory;
#[cfg(feature = "postgres")]
pub use postgres::PostgresSupplierDirectory;

/// Read-only view of the party directory.
///
/// Failures surface as `MaterialError::Unexpected`; the directory has no
/// business rules of its own.
#[async_trait::async_trait]
pub trait SupplierDirectory: Send + Sync {
    /// All suppliers ordered by id.
    async fn list(&self) -> MaterialResult<Vec<Supplier>>;

    async fn get(&self, id: SupplierId) -> MaterialResult<Option<Supplier>>;
}
