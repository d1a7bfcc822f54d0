//! Materials catalog domain module.
//!
//! Business rules for material records, implemented as deterministic domain
//! logic (no IO, no HTTP, no storage). Stores call into this crate to build
//! and merge records so the buy-price floor is checked in one place.

pub mod error;
pub mod material;
pub mod material_type;

pub use error::{MaterialError, MaterialResult};
pub use material::{
    BUY_PRICE_FLOOR_MESSAGE, MIN_BUY_PRICE, Material, MaterialDraft, MaterialId, MaterialPatch,
    validate_buy_price,
};
pub use material_type::MaterialType;
pub use rust_decimal::Decimal;
