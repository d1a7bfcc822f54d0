use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use materials_catalog::{MaterialError, MaterialResult};
use materials_core::{DomainResult, Entity, RecordId};
use materials_parties::{RegisterSupplier, Supplier, SupplierId};

use super::SupplierDirectory;

#[derive(Debug)]
struct Inner {
    next_id: RecordId,
    rows: BTreeMap<SupplierId, Supplier>,
}

/// In-memory supplier directory for tests/dev.
///
/// Stands in for the external party directory; `register` is how dev seeding
/// and tests put suppliers into it.
#[derive(Debug)]
pub struct InMemorySupplierDirectory {
    inner: RwLock<Inner>,
}

impl InMemorySupplierDirectory {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: RecordId::FIRST,
                rows: BTreeMap::new(),
            }),
        }
    }

    /// Add a supplier, assigning the next id.
    pub fn register(&self, cmd: RegisterSupplier) -> DomainResult<Supplier> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let supplier = Supplier::register(SupplierId::new(inner.next_id), cmd)?;
        inner.next_id = inner.next_id.next();
        inner.rows.insert(supplier.id(), supplier.clone());
        tracing::debug!(supplier_id = %supplier.id(), name = supplier.name(), "supplier registered");
        Ok(supplier)
    }
}

impl Default for InMemorySupplierDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SupplierDirectory for InMemorySupplierDirectory {
    async fn list(&self) -> MaterialResult<Vec<Supplier>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| MaterialError::unexpected("supplier directory lock poisoned"))?;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn get(&self, id: SupplierId) -> MaterialResult<Option<Supplier>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| MaterialError::unexpected("supplier directory lock poisoned"))?;
        Ok(inner.rows.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use materials_parties::ContactInfo;

    #[tokio::test]
    async fn registered_suppliers_are_listed_in_id_order() {
        let dir = InMemorySupplierDirectory::new();
        let a = dir.register(RegisterSupplier::named("Supplier 1")).unwrap();
        let b = dir
            .register(RegisterSupplier {
                name: "Supplier 2".to_string(),
                contact: Some(ContactInfo {
                    email: Some("supplier2@mail.com".to_string()),
                    ..Default::default()
                }),
            })
            .unwrap();

        let listed = dir.list().await.unwrap();
        assert_eq!(listed, vec![a.clone(), b]);
        assert_eq!(dir.get(a.id()).await.unwrap(), Some(a));
        assert_eq!(dir.get(SupplierId::from(42)).await.unwrap(), None);
    }

    #[test]
    fn blank_names_do_not_consume_ids() {
        let dir = InMemorySupplierDirectory::new();
        assert!(dir.register(RegisterSupplier::named(" ")).is_err());
        let s = dir.register(RegisterSupplier::named("Acme Textiles")).unwrap();
        assert_eq!(s.id(), SupplierId::from(1));
    }
}
