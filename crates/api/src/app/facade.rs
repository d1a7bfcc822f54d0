//! Material facade: the externally visible catalog actions.
//!
//! Each action authorizes the caller, parses its parameters, runs one store
//! operation and folds the outcome into an [`Envelope`]. Nothing escapes as
//! a transport error.

use std::future::Future;
use std::sync::Arc;

use materials_auth::{ActionAuthorization, Permission, RolePolicy};
use materials_catalog::{MaterialDraft, MaterialError, MaterialPatch, MaterialResult, MaterialType};
use materials_infra::directory::SupplierDirectory;
use materials_infra::store::MaterialStore;

use crate::app::dto::{self, FilterParams};
use crate::app::envelope::Envelope;
use crate::authz::{self, MATERIALS_READ, MATERIALS_WRITE, PARTIES_READ};
use crate::context::PrincipalContext;

pub const DELETED_MESSAGE: &str = "Material deleted successfully";

static READ: [Permission; 1] = [Permission::from_static(MATERIALS_READ)];
static WRITE: [Permission; 1] = [Permission::from_static(MATERIALS_WRITE)];
static SUPPLIERS: [Permission; 1] = [Permission::from_static(PARTIES_READ)];
static NONE: [Permission; 0] = [];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListMaterials,
    FilterMaterials,
    GetMaterial,
    CreateMaterial,
    UpdateMaterial,
    DeleteMaterial,
    AvailableTypes,
    ListSuppliers,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::ListMaterials => "list_materials",
            Action::FilterMaterials => "filter_materials",
            Action::GetMaterial => "get_material",
            Action::CreateMaterial => "create_material",
            Action::UpdateMaterial => "update_material",
            Action::DeleteMaterial => "delete_material",
            Action::AvailableTypes => "available_types",
            Action::ListSuppliers => "list_suppliers",
        }
    }
}

impl ActionAuthorization for Action {
    fn required_permissions(&self) -> &[Permission] {
        match self {
            Action::ListMaterials | Action::FilterMaterials | Action::GetMaterial => &READ,
            Action::CreateMaterial | Action::UpdateMaterial | Action::DeleteMaterial => &WRITE,
            Action::ListSuppliers => &SUPPLIERS,
            Action::AvailableTypes => &NONE,
        }
    }
}

pub struct MaterialFacade {
    store: Arc<dyn MaterialStore>,
    suppliers: Arc<dyn SupplierDirectory>,
    policy: RolePolicy,
}

impl MaterialFacade {
    pub fn new(store: Arc<dyn MaterialStore>, suppliers: Arc<dyn SupplierDirectory>) -> Self {
        Self {
            store,
            suppliers,
            policy: authz::default_policy(),
        }
    }

    pub fn with_policy(mut self, policy: RolePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub async fn list_materials(&self, principal: &PrincipalContext) -> Envelope {
        self.run(principal, Action::ListMaterials, async {
            Ok(Envelope::Materials(self.store.list().await?))
        })
        .await
    }

    /// `params` is `{"type": code}`; an unknown or missing type yields an empty list.
    pub async fn filter_materials(&self, principal: &PrincipalContext, params: &[u8]) -> Envelope {
        self.run(principal, Action::FilterMaterials, async {
            let params: FilterParams = dto::parse_params(params)?;
            Ok(Envelope::Materials(self.store.filter(params.material_type()).await?))
        })
        .await
    }

    pub async fn get_material(&self, principal: &PrincipalContext, id: &str) -> Envelope {
        self.run(principal, Action::GetMaterial, async {
            let id = dto::parse_material_id(id)?;
            Ok(Envelope::Material(self.store.get(id).await?))
        })
        .await
    }

    pub async fn create_material(&self, principal: &PrincipalContext, params: &[u8]) -> Envelope {
        self.run(principal, Action::CreateMaterial, async {
            let draft: MaterialDraft = dto::parse_params(params)?;
            Ok(Envelope::Material(self.store.create(draft).await?))
        })
        .await
    }

    pub async fn update_material(&self, principal: &PrincipalContext, id: &str, params: &[u8]) -> Envelope {
        self.run(principal, Action::UpdateMaterial, async {
            let id = dto::parse_material_id(id)?;
            let patch: MaterialPatch = dto::parse_params(params)?;
            Ok(Envelope::Material(self.store.update(id, patch).await?))
        })
        .await
    }

    pub async fn delete_material(&self, principal: &PrincipalContext, id: &str) -> Envelope {
        self.run(principal, Action::DeleteMaterial, async {
            let id = dto::parse_material_id(id)?;
            self.store.delete(id).await?;
            Ok(Envelope::Message(DELETED_MESSAGE.to_string()))
        })
        .await
    }

    pub async fn available_types(&self, principal: &PrincipalContext) -> Envelope {
        self.run(principal, Action::AvailableTypes, async {
            Ok(Envelope::Types(MaterialType::selection()))
        })
        .await
    }

    pub async fn list_suppliers(&self, principal: &PrincipalContext) -> Envelope {
        self.run(principal, Action::ListSuppliers, async {
            let suppliers = self.suppliers.list().await?;
            Ok(Envelope::Suppliers(suppliers.iter().map(|s| s.summary()).collect()))
        })
        .await
    }

    async fn run<F>(&self, principal: &PrincipalContext, action: Action, work: F) -> Envelope
    where
        F: Future<Output = MaterialResult<Envelope>>,
    {
        let principal_id = principal.principal_id();

        if let Err(e) = authz::authorize_action(&self.policy, principal, &action) {
            tracing::info!(action = action.name(), %principal_id, error = %e, "action forbidden");
            return Envelope::error(e.to_string());
        }

        match work.await {
            Ok(envelope) => {
                tracing::info!(action = action.name(), %principal_id, "action succeeded");
                envelope
            }
            Err(e @ MaterialError::Unexpected(_)) => {
                tracing::warn!(action = action.name(), %principal_id, error = %e, "action failed");
                e.into()
            }
            Err(e) => {
                tracing::info!(action = action.name(), %principal_id, kind = e.kind(), error = %e, "action rejected");
                e.into()
            }
        }
    }
}
