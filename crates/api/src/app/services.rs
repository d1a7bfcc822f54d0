//! Store wiring: in-memory (default) or Postgres (`postgres` feature).

use std::sync::Arc;

use materials_core::DomainError;
use materials_infra::directory::{InMemorySupplierDirectory, SupplierDirectory};
use materials_infra::store::{InMemoryMaterialStore, MaterialStore};
use materials_parties::RegisterSupplier;
use thiserror::Error;

use crate::app::facade::MaterialFacade;
use crate::config::{ApiConfig, StoreBackend};

#[derive(Debug, Error)]
pub enum ServicesError {
    #[error("invalid seed supplier: {0}")]
    Seed(#[from] DomainError),

    #[cfg(feature = "postgres")]
    #[error("database setup failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("persistent stores are not compiled in (enable the `postgres` feature)")]
    PersistenceUnavailable,
}

/// Store handles shared by every request.
#[derive(Clone)]
pub struct AppServices {
    pub store: Arc<dyn MaterialStore>,
    pub suppliers: Arc<dyn SupplierDirectory>,
}

impl AppServices {
    /// In-memory stores, with `seed_suppliers` registered in order (ids 1, 2, ...).
    pub fn in_memory(seed_suppliers: &[String]) -> Result<Self, DomainError> {
        let directory = Arc::new(InMemorySupplierDirectory::new());
        for name in seed_suppliers {
            directory.register(RegisterSupplier::named(name.as_str()))?;
        }
        let store = Arc::new(InMemoryMaterialStore::new(directory.clone()));
        Ok(Self {
            store,
            suppliers: directory,
        })
    }

    #[cfg(feature = "postgres")]
    pub async fn postgres(database_url: &str) -> Result<Self, sqlx::Error> {
        use materials_infra::directory::PostgresSupplierDirectory;
        use materials_infra::store::PostgresMaterialStore;

        let pool = Arc::new(materials_infra::db::connect(database_url).await?);
        materials_infra::db::ensure_schema(&pool).await?;
        Ok(Self {
            store: Arc::new(PostgresMaterialStore::new(pool.clone())),
            suppliers: Arc::new(PostgresSupplierDirectory::new(pool)),
        })
    }

    pub fn facade(&self) -> MaterialFacade {
        MaterialFacade::new(self.store.clone(), self.suppliers.clone())
    }
}

pub async fn build_services(config: &ApiConfig) -> Result<AppServices, ServicesError> {
    match &config.store {
        StoreBackend::InMemory => {
            tracing::info!(seed_suppliers = config.seed_suppliers.len(), "using in-memory stores");
            Ok(AppServices::in_memory(&config.seed_suppliers)?)
        }
        #[cfg(feature = "postgres")]
        StoreBackend::Postgres { database_url } => {
            if !config.seed_suppliers.is_empty() {
                tracing::warn!("MATERIALS_SEED_SUPPLIERS is ignored with persistent stores");
            }
            tracing::info!("using postgres stores");
            Ok(AppServices::postgres(database_url).await?)
        }
        #[cfg(not(feature = "postgres"))]
        StoreBackend::Postgres { .. } => Err(ServicesError::PersistenceUnavailable),
    }
}
