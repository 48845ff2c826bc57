//! Model capabilities and identity resolution.
//!
//! A collection can hold any [`Model`]. Every capability on the trait is
//! optional: the collection checks for identity, client identity, merge and
//! ordering support at call time and falls back to weaker strategies when a
//! capability is absent (value equality for lookup, leaving items untouched
//! on merge, keeping the current order on sort).
//!
//! # Example
//!
//! ```
//! use std::cmp::Ordering;
//! use modelarray::{Identity, Model};
//!
//! #[derive(Clone, PartialEq)]
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! impl Model for User {
//!     fn identity(&self) -> Option<Identity> {
//!         Some(Identity::Int(self.id))
//!     }
//!
//!     fn merge(&mut self, other: &Self) -> bool {
//!         self.name = other.name.clone();
//!         true
//!     }
//!
//!     fn compare(&self, other: &Self) -> Option<Ordering> {
//!         Some(self.name.cmp(&other.name))
//!     }
//! }
//! ```

use std::cmp::Ordering;
use std::fmt;

/// A primary or client key of a model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identity {
    /// A numeric key.
    Int(i64),
    /// A string key.
    Str(String),
}

impl Identity {
    /// Returns `false` for the empty keys `0` and `""`.
    ///
    /// An identity that is not truthy is treated as absent, both on the
    /// query side and on stored items.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Int(n) => *n != 0,
            Self::Str(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Identity {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Identity {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Identity {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// A value that can be stored in a [`Collection`](crate::Collection).
///
/// All methods have defaults that report the capability as absent, so plain
/// values implement the trait with an empty `impl` block.
pub trait Model: Clone + PartialEq + Send + Sync + 'static {
    /// The primary key of this model, if it has one.
    fn identity(&self) -> Option<Identity> {
        None
    }

    /// A secondary key that exists before a primary key is assigned.
    fn client_identity(&self) -> Option<Identity> {
        None
    }

    /// Absorb `other`'s attributes into `self`.
    ///
    /// Returns `false` when the model does not support merging, in which
    /// case `self` must be left unchanged.
    fn merge(&mut self, _other: &Self) -> bool {
        false
    }

    /// Three-way ordering used by [`Collection::sort`](crate::Collection::sort)
    /// when no comparator is configured.
    fn compare(&self, _other: &Self) -> Option<Ordering> {
        None
    }

    /// Whether this value is already a constructed model.
    ///
    /// Values reporting `false` are passed through the collection's model
    /// factory before they are stored.
    fn is_instance(&self) -> bool {
        true
    }
}

/// A query resolved against the items of a collection.
///
/// Most call sites pass `&model`, which converts via `From`. Bare integers
/// and strings convert to a primary-key query, so `users.get(3)` finds the
/// user whose identity is `3`. Use [`Lookup::cid`] to query by client key.
///
/// A bare string is always a key. To find a plain `String` item by value,
/// pass a reference to it instead.
#[derive(Debug)]
pub enum Lookup<'a, M> {
    /// Resolve by reference, then identity, then client identity, then value.
    Model(&'a M),
    /// Resolve by primary key.
    Identity(Identity),
    /// Resolve by client key.
    ClientIdentity(Identity),
}

impl<'a, M> Lookup<'a, M> {
    /// Query by primary key.
    pub fn id(identity: impl Into<Identity>) -> Self {
        Self::Identity(identity.into())
    }

    /// Query by client key.
    pub fn cid(identity: impl Into<Identity>) -> Self {
        Self::ClientIdentity(identity.into())
    }
}

impl<'a, M> From<&'a M> for Lookup<'a, M> {
    fn from(model: &'a M) -> Self {
        Self::Model(model)
    }
}

impl<M> From<Identity> for Lookup<'_, M> {
    fn from(identity: Identity) -> Self {
        Self::Identity(identity)
    }
}

impl<M> From<i64> for Lookup<'_, M> {
    fn from(id: i64) -> Self {
        Self::Identity(Identity::Int(id))
    }
}

impl<M> From<i32> for Lookup<'_, M> {
    fn from(id: i32) -> Self {
        Self::Identity(Identity::from(id))
    }
}

impl<'a, M> From<&'a str> for Lookup<'a, M> {
    fn from(id: &'a str) -> Self {
        Self::Identity(Identity::from(id))
    }
}

impl<M> From<String> for Lookup<'_, M> {
    fn from(id: String) -> Self {
        Self::Identity(Identity::Str(id))
    }
}

fn present(identity: Option<Identity>) -> Option<Identity> {
    identity.filter(Identity::is_truthy)
}

fn position_by_identity<M: Model>(items: &[M], identity: &Identity) -> Option<usize> {
    if !identity.is_truthy() {
        return None;
    }
    items
        .iter()
        .position(|item| present(item.identity()).as_ref() == Some(identity))
}

fn position_by_client_identity<M: Model>(items: &[M], identity: &Identity) -> Option<usize> {
    if !identity.is_truthy() {
        return None;
    }
    items
        .iter()
        .position(|item| present(item.client_identity()).as_ref() == Some(identity))
}

/// Find the index of the item in `items` that `lookup` resolves to.
///
/// A model query matches by reference first, then by primary key, then by
/// client key. Value equality is only used when the query exposes neither
/// key.
///
/// A client-key match is rejected when both sides carry a primary key and
/// the keys differ.
pub(crate) fn resolve<M: Model>(items: &[M], lookup: &Lookup<'_, M>) -> Option<usize> {
    match lookup {
        Lookup::Model(query) => {
            if let Some(index) = items.iter().position(|item| std::ptr::eq(item, *query)) {
                return Some(index);
            }

            let identity = present(query.identity());
            let client_identity = present(query.client_identity());
            if identity.is_none() && client_identity.is_none() {
                return items.iter().position(|item| item == *query);
            }

            if let Some(index) = identity
                .as_ref()
                .and_then(|id| position_by_identity(items, id))
            {
                return Some(index);
            }

            let cid = client_identity?;
            items.iter().position(|item| {
                present(item.client_identity()).as_ref() == Some(&cid)
                    && match (&identity, present(item.identity())) {
                        (Some(ours), Some(theirs)) => *ours == theirs,
                        _ => true,
                    }
            })
        }
        Lookup::Identity(identity) => position_by_identity(items, identity),
        Lookup::ClientIdentity(identity) => position_by_client_identity(items, identity),
    }
}

macro_rules! impl_value_model {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Model for $ty {
                fn compare(&self, other: &Self) -> Option<Ordering> {
                    Some(self.cmp(other))
                }
            }
        )*
    };
}

impl_value_model!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, String, &'static str);
