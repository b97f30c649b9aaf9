//! Entity trait: things the card store addresses by a key.

/// A stored item with a stable lookup key.
///
/// For an issued card the key is its derived employee id. The key may change
/// when the item is edited, so callers must not cache it across mutations.
pub trait Entity {
    type Id: Clone + Eq + core::fmt::Debug + core::fmt::Display;

    fn id(&self) -> &Self::Id;

    /// Whether this entity is currently addressed by `id`.
    fn is(&self, id: &Self::Id) -> bool {
        self.id() == id
    }
}
