// Copyright 2025 Cowboy AI, LLC.

//! Entity identity
//!
//! Entities reference each other only by ID. IDs are opaque integers that are
//! unique within one entity type; the phantom parameter keeps IDs of different
//! types from being mixed up at compile time.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A typed entity ID
///
/// # Examples
///
/// ```rust
/// use review_domain::{EntityId, Team, User};
///
/// let team_id = EntityId::<Team>::new(7);
/// let user_id = EntityId::<User>::new(7);
///
/// // Same raw value, different types:
/// // let _: EntityId<User> = team_id; // ERROR!
/// assert_eq!(team_id.value(), user_id.value());
/// ```
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId<T> {
    id: u64,
    #[serde(skip)]
    _phantom: PhantomData<fn() -> T>,
}

impl<T> EntityId<T> {
    /// Placeholder carried by entities that have not been stored yet
    pub const UNASSIGNED: Self = Self::new(0);

    /// Wrap a raw ID
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    /// Get the raw ID
    pub const fn value(&self) -> u64 {
        self.id
    }
}

// Manual impls: derives would demand the same traits of `T`.
impl<T> Clone for EntityId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EntityId<T> {}

impl<T> PartialEq for EntityId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for EntityId<T> {}

impl<T> PartialOrd for EntityId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for EntityId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl<T> Hash for EntityId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.id)
    }
}

impl<T> fmt::Display for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> From<u64> for EntityId<T> {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl<T> From<EntityId<T>> for u64 {
    fn from(id: EntityId<T>) -> Self {
        id.id
    }
}

/// Trait for domain entities with identity
pub trait DomainEntity: Clone + Send + Sync + 'static {
    /// Human-readable type name used in not-found errors
    const ENTITY_TYPE: &'static str;

    /// Get the entity's ID
    fn id(&self) -> EntityId<Self>;

    /// Replace the entity's ID; used by stores when assigning one on insert
    fn set_id(&mut self, id: EntityId<Self>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Widget;

    #[test]
    fn test_ids_compare_by_value() {
        let a = EntityId::<Widget>::new(1);
        let b = EntityId::<Widget>::new(1);
        let c = EntityId::<Widget>::new(2);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a < c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_id_serializes_as_bare_integer() {
        let id = EntityId::<Widget>::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let back: EntityId<Widget> = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_display_and_debug() {
        let id = EntityId::<Widget>::new(5);
        assert_eq!(id.to_string(), "5");
        assert_eq!(format!("{id:?}"), "EntityId(5)");
        assert_eq!(u64::from(id), 5);
    }
}
