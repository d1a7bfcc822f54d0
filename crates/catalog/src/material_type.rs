use core::str::FromStr;

use serde::{Deserialize, Serialize};

use materials_core::ValueObject;

use crate::error::MaterialError;

/// Closed set of material types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Fabric,
    Jeans,
    Cotton,
}

/// Selection table: (type, code, label). Row order follows the enum order.
const SELECTION: [(MaterialType, &str, &str); 3] = [
    (MaterialType::Fabric, "fabric", "Fabric"),
    (MaterialType::Jeans, "jeans", "Jeans"),
    (MaterialType::Cotton, "cotton", "Cotton"),
];

impl MaterialType {
    pub const ALL: [MaterialType; 3] = [MaterialType::Fabric, MaterialType::Jeans, MaterialType::Cotton];

    fn row(self) -> &'static (MaterialType, &'static str, &'static str) {
        &SELECTION[self as usize]
    }

    /// Stored/wire code (`fabric`, `jeans`, `cotton`).
    pub fn code(self) -> &'static str {
        self.row().1
    }

    /// Display label (`Fabric`, `Jeans`, `Cotton`).
    pub fn label(self) -> &'static str {
        self.row().2
    }

    /// All `(code, label)` pairs, independent of any stored data.
    pub fn selection() -> Vec<(&'static str, &'static str)> {
        SELECTION.iter().map(|(_, code, label)| (*code, *label)).collect()
    }
}

impl ValueObject for MaterialType {}

impl core::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for MaterialType {
    type Err = MaterialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SELECTION
            .iter()
            .find(|(_, code, _)| *code == s)
            .map(|(kind, _, _)| *kind)
            .ok_or_else(|| {
                MaterialError::validation(format!(
                    "Wrong value for material type: {s:?} (expected one of fabric, jeans, cotton)"
                ))
            })
    }
}
