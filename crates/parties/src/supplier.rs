use serde::{Deserialize, Serialize};

use materials_core::{DomainResult, Entity, RecordId, ValueObject, ensure_not_blank};

/// Supplier identifier (a party record id in the directory).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierId(pub RecordId);

impl SupplierId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for SupplierId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for SupplierId {
    fn from(value: u64) -> Self {
        Self(RecordId::from_u64(value))
    }
}

/// Contact information for a supplier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ValueObject for ContactInfo {}

/// Input for registering a supplier in a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterSupplier {
    pub name: String,
    #[serde(default)]
    pub contact: Option<ContactInfo>,
}

impl RegisterSupplier {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact: None,
        }
    }
}

/// A supplier party record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    id: SupplierId,
    name: String,
    contact: ContactInfo,
}

impl Supplier {
    /// Build a supplier record from a registration request.
    ///
    /// The directory assigns `id`; the name must not be blank.
    pub fn register(id: SupplierId, cmd: RegisterSupplier) -> DomainResult<Self> {
        ensure_not_blank("name", &cmd.name)?;
        Ok(Self {
            id,
            name: cmd.name.trim().to_string(),
            contact: cmd.contact.unwrap_or_default(),
        })
    }

    /// Rehydrate a record read back from storage.
    pub fn from_parts(id: SupplierId, name: String, contact: ContactInfo) -> Self {
        Self { id, name, contact }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn summary(&self) -> SupplierSummary {
        SupplierSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

impl Entity for Supplier {
    type Id = SupplierId;

    fn id(&self) -> SupplierId {
        self.id
    }
}

/// `{id, name}` projection exposed to catalog callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierSummary {
    pub id: SupplierId,
    pub name: String,
}
