//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Records held by a store implement this so generic code can key them by id
/// without knowing the concrete record type.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
