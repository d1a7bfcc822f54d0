use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use materials_core::{Entity, RecordId, ensure_not_blank};
use materials_parties::SupplierId;

use crate::error::{MaterialError, MaterialResult};
use crate::material_type::MaterialType;

/// Lowest buy price a persisted material may carry.
pub const MIN_BUY_PRICE: Decimal = Decimal::ONE_HUNDRED;

/// Message reported when the buy-price floor is violated.
pub const BUY_PRICE_FLOOR_MESSAGE: &str = "Material Buy Price cannot be less than 100";

/// Material identifier, assigned by the store at creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(pub RecordId);

impl MaterialId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for MaterialId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for MaterialId {
    fn from(value: u64) -> Self {
        Self(RecordId::from_u64(value))
    }
}

impl core::str::FromStr for MaterialId {
    type Err = MaterialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse::<RecordId>()?))
    }
}

/// Check the buy-price floor.
pub fn validate_buy_price(buy_price: Decimal) -> MaterialResult<()> {
    if buy_price < MIN_BUY_PRICE {
        return Err(MaterialError::validation(BUY_PRICE_FLOOR_MESSAGE));
    }
    Ok(())
}

fn check_fields(code: &str, name: &str, buy_price: Decimal) -> MaterialResult<()> {
    validate_buy_price(buy_price)?;
    ensure_not_blank("code", code)?;
    ensure_not_blank("name", name)?;
    Ok(())
}

/// A catalog material record.
///
/// # Invariants
/// - `buy_price >= MIN_BUY_PRICE`
/// - `code` and `name` are not blank
///
/// Records are only built through [`Material::create`], [`Material::merged`]
/// and [`Material::restore`], all of which validate before returning. JSON
/// input arrives as a [`MaterialDraft`] or [`MaterialPatch`], never as a
/// `Material`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Material {
    id: MaterialId,
    code: String,
    name: String,
    #[serde(rename = "type")]
    kind: MaterialType,
    #[serde(with = "rust_decimal::serde::float")]
    buy_price: Decimal,
    supplier_id: Option<SupplierId>,
}

impl Material {
    /// Build a new record from a create request.
    pub fn create(id: MaterialId, draft: MaterialDraft) -> MaterialResult<Self> {
        draft.validate()?;
        Ok(Self {
            id,
            code: draft.code,
            name: draft.name,
            kind: draft.kind,
            buy_price: draft.buy_price,
            supplier_id: draft.supplier_id,
        })
    }

    /// Return the record that would result from applying `patch`.
    ///
    /// `self` is left untouched; callers swap the returned record in only
    /// after it validated, so a rejected update never leaves a half-written
    /// record behind.
    pub fn merged(&self, patch: &MaterialPatch) -> MaterialResult<Self> {
        let mut next = self.clone();
        if let Some(code) = &patch.code {
            next.code = code.clone();
        }
        if let Some(name) = &patch.name {
            next.name = name.clone();
        }
        if let Some(kind) = patch.kind {
            next.kind = kind;
        }
        if let Some(buy_price) = patch.buy_price {
            next.buy_price = buy_price;
        }
        if let Some(supplier_id) = patch.supplier_id {
            next.supplier_id = supplier_id;
        }
        next.validate()?;
        Ok(next)
    }

    /// Rehydrate a record read back from storage, re-checking invariants.
    pub fn restore(
        id: MaterialId,
        code: String,
        name: String,
        kind: MaterialType,
        buy_price: Decimal,
        supplier_id: Option<SupplierId>,
    ) -> MaterialResult<Self> {
        let material = Self {
            id,
            code,
            name,
            kind,
            buy_price,
            supplier_id,
        };
        material.validate()?;
        Ok(material)
    }

    fn validate(&self) -> MaterialResult<()> {
        check_fields(&self.code, &self.name, self.buy_price)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MaterialType {
        self.kind
    }

    pub fn buy_price(&self) -> Decimal {
        self.buy_price
    }

    pub fn supplier_id(&self) -> Option<SupplierId> {
        self.supplier_id
    }
}

impl Entity for Material {
    type Id = MaterialId;

    fn id(&self) -> MaterialId {
        self.id
    }
}

/// Field map accepted by "create material".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialDraft {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MaterialType,
    #[serde(with = "rust_decimal::serde::float")]
    pub buy_price: Decimal,
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
}

impl MaterialDraft {
    /// Run the record invariants against the draft before an id is assigned.
    pub fn validate(&self) -> MaterialResult<()> {
        check_fields(&self.code, &self.name, self.buy_price)
    }
}

/// Partial field map accepted by "update material".
///
/// Absent fields keep their stored value. `supplier_id: null` clears the
/// supplier reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialPatch {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<MaterialType>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub buy_price: Option<Decimal>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub supplier_id: Option<Option<SupplierId>>,
}

impl MaterialPatch {
    pub fn buy_price(buy_price: Decimal) -> Self {
        Self {
            buy_price: Some(buy_price),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// Distinguishes `"field": null` (Some(None)) from a missing field (None, via `default`).
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
