//! Postgres wiring shared by the SQL-backed store and directory.
//!
//! ## Error Mapping
//!
//! | SQLx error | Postgres code | MaterialError |
//! |---|---|---|
//! | Database (check violation on the buy-price floor) | `23514` | `ValidationFailed` (floor message) |
//! | Database (foreign key violation) | `23503` | `Unexpected` |
//! | anything else | – | `Unexpected` |

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use materials_catalog::{BUY_PRICE_FLOOR_MESSAGE, MaterialError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS suppliers (
    id      BIGSERIAL PRIMARY KEY,
    name    TEXT NOT NULL,
    email   TEXT,
    phone   TEXT,
    address TEXT
);

CREATE TABLE IF NOT EXISTS materials (
    id          BIGSERIAL PRIMARY KEY,
    code        TEXT NOT NULL,
    name        TEXT NOT NULL,
    type        TEXT NOT NULL CHECK (type IN ('fabric', 'jeans', 'cotton')),
    buy_price   NUMERIC NOT NULL CONSTRAINT materials_buy_price_floor CHECK (buy_price >= 100),
    supplier_id BIGINT REFERENCES suppliers (id)
);

CREATE INDEX IF NOT EXISTS materials_type_idx ON materials (type);
"#;

/// Open a connection pool.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new().max_connections(10).connect(database_url).await
}

/// Create the `suppliers` and `materials` tables if they do not exist.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}

pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> MaterialError {
    match err {
        sqlx::Error::Database(db_err) => {
            if db_err.code().as_deref() == Some("23514")
                && db_err.constraint() == Some("materials_buy_price_floor")
            {
                return MaterialError::validation(BUY_PRICE_FLOOR_MESSAGE);
            }
            MaterialError::unexpected(format!("database error in {operation}: {}", db_err.message()))
        }
        sqlx::Error::PoolClosed => {
            MaterialError::unexpected(format!("connection pool closed in {operation}"))
        }
        other => MaterialError::unexpected(format!("sqlx error in {operation}: {other}")),
    }
}

/// Ids are `BIGSERIAL`; they never exceed `i64::MAX`.
pub(crate) fn to_db_id(id: u64) -> Result<i64, MaterialError> {
    i64::try_from(id).map_err(|_| MaterialError::unexpected(format!("id {id} out of range")))
}

pub(crate) fn from_db_id(id: i64) -> Result<u64, MaterialError> {
    u64::try_from(id).map_err(|_| MaterialError::unexpected(format!("negative id {id} in storage")))
}
