//! Convenient re-exports for common use.
//!
//! ```
//! use modelarray::prelude::*;
//!
//! let tags: Collection<String> = Collection::new();
//! tags.push(["rust".to_string()]);
//! assert_eq!(tags.len(), 1);
//! ```

pub use crate::{
    Collection, CollectionBuilder, CollectionEvent, EventKind, Identity, Lookup, Model, Removed,
};
