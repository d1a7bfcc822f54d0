//! Material storage: the collection of material records and the write path
//! that enforces the catalog invariants.

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

use materials_catalog::{Material, MaterialDraft, MaterialError, MaterialId, MaterialPatch, MaterialResult, MaterialType};
use materials_parties::SupplierId;

use crate::directory::SupplierDirectory;

pub use in_memory::InMemoryMaterialStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresMaterialStore;

/// Storage for material records.
///
/// Every write is all-or-nothing: `create` and `update` validate the
/// resulting record before it becomes visible, and a failed call leaves the
/// collection exactly as it was.
#[async_trait::async_trait]
pub trait MaterialStore: Send + Sync {
    /// All records, in insertion order.
    async fn list(&self) -> MaterialResult<Vec<Material>>;

    /// Records whose type equals `kind`, in insertion order.
    ///
    /// `None` (an absent or unrecognised type) matches nothing.
    async fn filter(&self, kind: Option<MaterialType>) -> MaterialResult<Vec<Material>> {
        let Some(kind) = kind else {
            return Ok(Vec::new());
        };
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|m| m.kind() == kind)
            .collect())
    }

    async fn get(&self, id: MaterialId) -> MaterialResult<Material>;

    async fn create(&self, draft: MaterialDraft) -> MaterialResult<Material>;

    /// Merge `patch` onto the stored record and replace it.
    async fn update(&self, id: MaterialId, patch: MaterialPatch) -> MaterialResult<Material>;

    async fn delete(&self, id: MaterialId) -> MaterialResult<()>;
}

/// Referential check for a supplier reference about to be written.
pub(crate) async fn ensure_supplier_exists(
    directory: &dyn SupplierDirectory,
    supplier_id: Option<SupplierId>,
) -> MaterialResult<()> {
    let Some(supplier_id) = supplier_id else {
        return Ok(());
    };
    match directory.get(supplier_id).await? {
        Some(_) => Ok(()),
        None => Err(MaterialError::unexpected(format!(
            "supplier_id {supplier_id} does not reference an existing supplier"
        ))),
    }
}
