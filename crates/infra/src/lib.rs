//! Infrastructure layer: material storage, the supplier directory and the
//! Postgres wiring behind the `postgres` feature.

pub mod directory;
pub mod store;

#[cfg(feature = "postgres")]
pub mod db;
