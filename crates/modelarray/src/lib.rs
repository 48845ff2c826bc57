//! ModelArray: observable, identity-aware collections.
//!
//! A [`Collection`] behaves like an ordered sequence of models that stays in
//! sync with an authoritative source through bulk reconciliation
//! ([`set`](Collection::set), [`reset`](Collection::reset)) and incremental
//! edits ([`push`](Collection::push), [`remove`](Collection::remove),
//! [`splice`](Collection::splice), ...). Observers receive one batched
//! [`CollectionEvent`] per affected set instead of per-item noise.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use modelarray::{Collection, EventKind, Identity, Model};
//!
//! #[derive(Clone, Debug, PartialEq)]
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
//! }
//!
//! let user = |id: i64, name: &str| User { id, name: name.to_string() };
//! let users = Collection::from_items(vec![user(3, "pg"), user(2, "mehdi")]);
//!
//! let removed = Arc::new(Mutex::new(Vec::new()));
//! let recv = removed.clone();
//! users
//!     .on(EventKind::Remove, move |event| {
//!         recv.lock().extend(event.models().iter().map(|u| u.id));
//!     })
//!     .set([user(3, "Pierre-Guillaume"), user(4, "thomas")]);
//!
//! assert_eq!(*removed.lock(), vec![2]);
//! assert_eq!(users.get(&user(3, "pg")).unwrap().name, "Pierre-Guillaume");
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────┐  mutate   ┌──────────────┐  emit   ┌──────────────┐
//! │    Caller    │─────────> │  Collection  │───────> │  Listeners   │
//! └──────────────┘           │ (RwLock Vec) │         │ (Signal per  │
//!                            └──────────────┘         │  EventKind)  │
//!                                   │                 └──────────────┘
//!                                   v
//!                            ┌──────────────┐
//!                            │ Model traits │
//!                            │ id/cid/merge │
//!                            └──────────────┘
//! ```

mod collection;
mod config;
mod error;
mod event;
#[cfg(feature = "json")]
mod json;
mod model;
pub mod prelude;

pub use collection::Collection;
pub use config::{CollectionBuilder, Comparator, ModelFactory};
pub use error::{CollectionError, Result};
pub use event::{CollectionEvent, CollectionSignals, EventKind, Removed};
pub use model::{Identity, Lookup, Model};

// Re-export core types that users may need
pub use modelarray_core::{ConnectionGuard, ConnectionId, Signal, SignalError};
