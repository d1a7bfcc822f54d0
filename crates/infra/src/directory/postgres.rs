use std::sync::Arc;

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use materials_catalog::{MaterialError, MaterialResult};
use materials_parties::{ContactInfo, Supplier, SupplierId};

use super::SupplierDirectory;
use crate::db::{from_db_id, map_sqlx_error, to_db_id};

/// Supplier directory backed by the `suppliers` table.
pub struct PostgresSupplierDirectory {
    pool: Arc<PgPool>,
}

impl PostgresSupplierDirectory {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn row_to_supplier(row: &PgRow) -> MaterialResult<Supplier> {
    let read = |e: sqlx::Error| MaterialError::unexpected(format!("malformed supplier row: {e}"));
    let id: i64 = row.try_get("id").map_err(read)?;
    Ok(Supplier::from_parts(
        SupplierId::from(from_db_id(id)?),
        row.try_get("name").map_err(read)?,
        ContactInfo {
            email: row.try_get("email").map_err(read)?,
            phone: row.try_get("phone").map_err(read)?,
            address: row.try_get("address").map_err(read)?,
        },
    ))
}

#[async_trait::async_trait]
impl SupplierDirectory for PostgresSupplierDirectory {
    #[instrument(skip(self))]
    async fn list(&self) -> MaterialResult<Vec<Supplier>> {
        let rows = sqlx::query("SELECT id, name, email, phone, address FROM suppliers ORDER BY id")
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_suppliers", e))?;
        rows.iter().map(row_to_supplier).collect()
    }

    #[instrument(skip(self))]
    async fn get(&self, id: SupplierId) -> MaterialResult<Option<Supplier>> {
        let row = sqlx::query("SELECT id, name, email, phone, address FROM suppliers WHERE id = $1")
            .bind(to_db_id(id.0.as_u64())?)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_supplier", e))?;
        row.as_ref().map(row_to_supplier).transpose()
    }
}
