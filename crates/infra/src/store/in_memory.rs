use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use materials_catalog::{Material, MaterialDraft, MaterialError, MaterialId, MaterialPatch, MaterialResult};
use materials_core::{Entity, RecordId};

use super::{MaterialStore, ensure_supplier_exists};
use crate::directory::SupplierDirectory;

#[derive(Debug)]
struct Inner {
    next_id: RecordId,
    rows: BTreeMap<MaterialId, Material>,
}

/// In-memory material store for tests/dev.
///
/// Ids come from a sequence, so the `BTreeMap` iterates in insertion order.
/// Each write validates and commits under one write-lock acquisition.
pub struct InMemoryMaterialStore {
    inner: RwLock<Inner>,
    suppliers: Arc<dyn SupplierDirectory>,
}

impl InMemoryMaterialStore {
    pub fn new(suppliers: Arc<dyn SupplierDirectory>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: RecordId::FIRST,
                rows: BTreeMap::new(),
            }),
            suppliers,
        }
    }

    fn read(&self) -> MaterialResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| MaterialError::unexpected("material store lock poisoned"))
    }

    fn write(&self) -> MaterialResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| MaterialError::unexpected("material store lock poisoned"))
    }
}

#[async_trait::async_trait]
impl MaterialStore for InMemoryMaterialStore {
    async fn list(&self) -> MaterialResult<Vec<Material>> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    async fn get(&self, id: MaterialId) -> MaterialResult<Material> {
        self.read()?.rows.get(&id).cloned().ok_or(MaterialError::NotFound)
    }

    async fn create(&self, draft: MaterialDraft) -> MaterialResult<Material> {
        draft.validate()?;
        ensure_supplier_exists(self.suppliers.as_ref(), draft.supplier_id).await?;

        let mut inner = self.write()?;
        let material = Material::create(MaterialId::new(inner.next_id), draft)?;
        inner.next_id = inner.next_id.next();
        inner.rows.insert(material.id(), material.clone());
        Ok(material)
    }

    async fn update(&self, id: MaterialId, patch: MaterialPatch) -> MaterialResult<Material> {
        let exists = self.read()?.rows.contains_key(&id);
        if !exists {
            return Err(MaterialError::NotFound);
        }
        if let Some(supplier_id) = patch.supplier_id {
            ensure_supplier_exists(self.suppliers.as_ref(), supplier_id).await?;
        }

        let mut inner = self.write()?;
        // Re-read under the write lock: the record may have gone while the supplier was checked.
        let current = inner.rows.get(&id).ok_or(MaterialError::NotFound)?;
        let next = current.merged(&patch)?;
        inner.rows.insert(id, next.clone());
        Ok(next)
    }

    async fn delete(&self, id: MaterialId) -> MaterialResult<()> {
        self.write()?
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(MaterialError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemorySupplierDirectory;
    use materials_catalog::{BUY_PRICE_FLOOR_MESSAGE, Decimal, MaterialType};
    use materials_parties::{RegisterSupplier, SupplierId};
    use proptest::prelude::*;

    fn store_with_supplier() -> (InMemoryMaterialStore, SupplierId) {
        let directory = Arc::new(InMemorySupplierDirectory::new());
        let supplier = directory.register(RegisterSupplier::named("Supplier 1")).unwrap();
        (InMemoryMaterialStore::new(directory), supplier.id())
    }

    fn draft(code: &str, kind: MaterialType, buy_price: i64, supplier: SupplierId) -> MaterialDraft {
        MaterialDraft {
            code: code.to_string(),
            name: format!("Material {code}"),
            kind,
            buy_price: Decimal::from(buy_price),
            supplier_id: Some(supplier),
        }
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let (store, s) = store_with_supplier();
        store.create(draft("M001", MaterialType::Fabric, 200, s)).await.unwrap();
        store.create(draft("M002", MaterialType::Jeans, 150, s)).await.unwrap();

        let codes: Vec<_> = store.list().await.unwrap().iter().map(|m| m.code().to_string()).collect();
        assert_eq!(codes, vec!["M001", "M002"]);
    }

    #[tokio::test]
    async fn ids_are_sequential_from_one() {
        let (store, s) = store_with_supplier();
        let a = store.create(draft("M001", MaterialType::Fabric, 200, s)).await.unwrap();
        let b = store.create(draft("M002", MaterialType::Jeans, 150, s)).await.unwrap();
        assert_eq!(a.id(), MaterialId::from(1));
        assert_eq!(b.id(), MaterialId::from(2));
    }

    #[tokio::test]
    async fn filter_matches_type_exactly() {
        let (store, s) = store_with_supplier();
        store.create(draft("M001", MaterialType::Fabric, 200, s)).await.unwrap();
        store.create(draft("M002", MaterialType::Jeans, 150, s)).await.unwrap();

        let fabric = store.filter(Some(MaterialType::Fabric)).await.unwrap();
        assert_eq!(fabric.len(), 1);
        assert_eq!(fabric[0].code(), "M001");

        assert!(store.filter(Some(MaterialType::Cotton)).await.unwrap().is_empty());
        assert!(store.filter(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_below_floor_persists_nothing() {
        let (store, s) = store_with_supplier();
        let err = store.create(draft("M005", MaterialType::Jeans, 50, s)).await.unwrap_err();
        assert_eq!(err, MaterialError::ValidationFailed(BUY_PRICE_FLOOR_MESSAGE.to_string()));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_with_unknown_supplier_is_unexpected() {
        let (store, _) = store_with_supplier();
        let err = store
            .create(draft("M009", MaterialType::Cotton, 250, SupplierId::from(99)))
            .await
            .unwrap_err();
        assert!(matches!(err, MaterialError::Unexpected(_)));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_stores_new_price() {
        let (store, s) = store_with_supplier();
        let m = store.create(draft("M001", MaterialType::Fabric, 200, s)).await.unwrap();

        let updated = store.update(m.id(), MaterialPatch::buy_price(Decimal::from(300))).await.unwrap();
        assert_eq!(updated.buy_price(), Decimal::from(300));
        assert_eq!(store.get(m.id()).await.unwrap().buy_price(), Decimal::from(300));
    }

    #[tokio::test]
    async fn rejected_update_leaves_record_unchanged() {
        let (store, s) = store_with_supplier();
        let m = store.create(draft("M001", MaterialType::Fabric, 200, s)).await.unwrap();

        let patch = MaterialPatch {
            name: Some("Renamed".to_string()),
            buy_price: Some(Decimal::from(10)),
            ..Default::default()
        };
        assert!(store.update(m.id(), patch).await.is_err());
        assert_eq!(store.get(m.id()).await.unwrap(), m);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found_without_side_effects() {
        let (store, s) = store_with_supplier();
        store.create(draft("M001", MaterialType::Fabric, 200, s)).await.unwrap();
        let before = store.list().await.unwrap();

        let missing = MaterialId::from(100);
        assert_eq!(store.get(missing).await.unwrap_err(), MaterialError::NotFound);
        assert_eq!(
            store.update(missing, MaterialPatch::buy_price(Decimal::from(300))).await.unwrap_err(),
            MaterialError::NotFound
        );
        assert_eq!(store.delete(missing).await.unwrap_err(), MaterialError::NotFound);
        assert_eq!(store.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let (store, s) = store_with_supplier();
        let m = store.create(draft("M001", MaterialType::Fabric, 200, s)).await.unwrap();
        store.delete(m.id()).await.unwrap();

        assert_eq!(store.get(m.id()).await.unwrap_err(), MaterialError::NotFound);
        assert!(store.list().await.unwrap().iter().all(|x| x.code() != "M001"));
    }

    fn kind_strategy() -> impl Strategy<Value = MaterialType> {
        prop_oneof![
            Just(MaterialType::Fabric),
            Just(MaterialType::Jeans),
            Just(MaterialType::Cotton),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            .. ProptestConfig::default()
        })]

        #[test]
        fn filter_is_the_typed_subset_of_list(
            rows in prop::collection::vec((kind_strategy(), 0i64..400), 0..20),
            wanted in kind_strategy(),
        ) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            rt.block_on(async {
                let (store, s) = store_with_supplier();
                for (i, (kind, price)) in rows.iter().enumerate() {
                    let _ = store.create(draft(&format!("M{i:03}"), *kind, *price, s)).await;
                }

                let all = store.list().await.unwrap();
                prop_assert!(all.iter().all(|m| m.buy_price() >= Decimal::from(100)));

                let expected: Vec<_> = all.into_iter().filter(|m| m.kind() == wanted).collect();
                prop_assert_eq!(store.filter(Some(wanted)).await.unwrap(), expected);
                Ok(())
            })?;
        }
    }
}
