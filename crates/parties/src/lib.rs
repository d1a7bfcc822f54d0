//! Parties domain module (suppliers).
//!
//! Suppliers are owned by the party directory; the materials catalog only
//! references them by id and reads `{id, name}` projections.

pub mod supplier;

pub use supplier::{ContactInfo, RegisterSupplier, Supplier, SupplierId, SupplierSummary};
