//! Postgres-backed material store.
//!
//! The buy-price floor is checked twice: in Rust before any statement runs,
//! and by the `materials_buy_price_floor` CHECK constraint. Updates lock the
//! row (`SELECT ... FOR UPDATE`) so the merge-validate-write sequence is one
//! transaction.

use std::sync::Arc;

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use materials_catalog::{
    Decimal, Material, MaterialDraft, MaterialError, MaterialId, MaterialPatch, MaterialResult, MaterialType,
};
use materials_core::Entity;
use materials_parties::SupplierId;

use super::MaterialStore;
use crate::db::{from_db_id, map_sqlx_error, to_db_id};

const COLUMNS: &str = "id, code, name, type, buy_price, supplier_id";

pub struct PostgresMaterialStore {
    pool: Arc<PgPool>,
}

impl PostgresMaterialStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn row_to_material(row: &PgRow) -> MaterialResult<Material> {
    let read = |e: sqlx::Error| MaterialError::unexpected(format!("malformed material row: {e}"));

    let id: i64 = row.try_get("id").map_err(read)?;
    let kind: String = row.try_get("type").map_err(read)?;
    let buy_price: Decimal = row.try_get("buy_price").map_err(read)?;
    let supplier_id: Option<i64> = row.try_get("supplier_id").map_err(read)?;

    Material::restore(
        MaterialId::from(from_db_id(id)?),
        row.try_get("code").map_err(read)?,
        row.try_get("name").map_err(read)?,
        kind.parse::<MaterialType>()
            .map_err(|e| MaterialError::unexpected(format!("stored row {id}: {e}")))?,
        buy_price,
        supplier_id.map(from_db_id).transpose()?.map(SupplierId::from),
    )
}

/// Key of an existing row. Ids beyond `BIGSERIAL` range cannot be stored, so
/// they are reported like any other missing record.
fn lookup_id(id: MaterialId) -> MaterialResult<i64> {
    to_db_id(id.0.as_u64()).map_err(|_| MaterialError::NotFound)
}

fn supplier_param(supplier_id: Option<SupplierId>) -> MaterialResult<Option<i64>> {
    supplier_id.map(|s| to_db_id(s.0.as_u64())).transpose()
}

#[async_trait::async_trait]
impl MaterialStore for PostgresMaterialStore {
    #[instrument(skip(self))]
    async fn list(&self) -> MaterialResult<Vec<Material>> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM materials ORDER BY id"))
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_materials", e))?;
        rows.iter().map(row_to_material).collect()
    }

    #[instrument(skip(self))]
    async fn filter(&self, kind: Option<MaterialType>) -> MaterialResult<Vec<Material>> {
        let Some(kind) = kind else {
            return Ok(Vec::new());
        };
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM materials WHERE type = $1 ORDER BY id"))
            .bind(kind.code())
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("filter_materials", e))?;
        rows.iter().map(row_to_material).collect()
    }

    #[instrument(skip(self))]
    async fn get(&self, id: MaterialId) -> MaterialResult<Material> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM materials WHERE id = $1"))
            .bind(lookup_id(id)?)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_material", e))?
            .ok_or(MaterialError::NotFound)?;
        row_to_material(&row)
    }

    #[instrument(skip(self, draft), fields(code = %draft.code))]
    async fn create(&self, draft: MaterialDraft) -> MaterialResult<Material> {
        draft.validate()?;

        let row = sqlx::query(&format!(
            "INSERT INTO materials (code, name, type, buy_price, supplier_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        ))
        .bind(&draft.code)
        .bind(&draft.name)
        .bind(draft.kind.code())
        .bind(draft.buy_price)
        .bind(supplier_param(draft.supplier_id)?)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_material", e))?;
        row_to_material(&row)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: MaterialId, patch: MaterialPatch) -> MaterialResult<Material> {
        let db_id = lookup_id(id)?;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("update_material.begin", e))?;

        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM materials WHERE id = $1 FOR UPDATE"))
            .bind(db_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("update_material.lock", e))?
            .ok_or(MaterialError::NotFound)?;

        // Dropping `tx` on an early return rolls back.
        let next = row_to_material(&row)?.merged(&patch)?;

        sqlx::query(
            "UPDATE materials SET code = $2, name = $3, type = $4, buy_price = $5, supplier_id = $6 \
             WHERE id = $1",
        )
        .bind(db_id)
        .bind(next.code())
        .bind(next.name())
        .bind(next.kind().code())
        .bind(next.buy_price())
        .bind(supplier_param(next.supplier_id())?)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("update_material", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("update_material.commit", e))?;

        tracing::debug!(material_id = %next.id(), "material updated");
        Ok(next)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: MaterialId) -> MaterialResult<()> {
        let result = sqlx::query("DELETE FROM materials WHERE id = $1")
            .bind(lookup_id(id)?)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_material", e))?;

        if result.rows_affected() == 0 {
            return Err(MaterialError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_beyond_bigserial_are_not_found() {
        assert_eq!(lookup_id(MaterialId::from(u64::MAX)), Err(MaterialError::NotFound));
        assert_eq!(lookup_id(MaterialId::from(i64::MAX as u64)), Ok(i64::MAX));
    }

    #[test]
    fn supplier_ids_beyond_bigserial_are_unexpected() {
        let err = supplier_param(Some(SupplierId::from(u64::MAX))).unwrap_err();
        assert!(matches!(err, MaterialError::Unexpected(_)));
        assert_eq!(supplier_param(None), Ok(None));
    }
}
