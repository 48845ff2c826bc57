//! The observable, identity-aware collection.
//!
//! `Collection<M>` is an ordered sequence of models that deduplicates by
//! identity on insertion, reconciles against authoritative lists with
//! [`set`](Collection::set), and notifies listeners with one batched event
//! per affected set.
//!
//! Every operation takes `&self`. The items live behind a read-write lock
//! that is released before any event is emitted, so listeners always observe
//! the post-mutation contents. Mutating the same collection from inside a
//! listener does not deadlock, but the resulting event order is unspecified.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Bound, Deref, RangeBounds};

use modelarray_core::logging::targets;
use modelarray_core::{ConnectionGuard, ConnectionId, PerfSpan};
use parking_lot::RwLock;

use crate::config::{CollectionBuilder, Comparator, ModelFactory};
use crate::error::{CollectionError, Result};
use crate::event::{CollectionEvent, CollectionSignals, EventKind};
use crate::model::{resolve, Lookup, Model};

/// An ordered, observable collection of models.
///
/// # Example
///
/// ```
/// use modelarray::{Collection, EventKind};
///
/// let users = Collection::from_items(vec!["pg", "mehdi", "jeremy"]);
///
/// users
///     .on(EventKind::Add, |event| println!("added {:?}", event.models()))
///     .push(["thomas", "pg"]);
///
/// assert_eq!(users.to_vec(), vec!["pg", "mehdi", "jeremy", "thomas"]);
/// ```
pub struct Collection<M: Model> {
    items: RwLock<Vec<M>>,
    factory: Option<ModelFactory<M>>,
    comparator: Option<Comparator<M>>,
    signals: CollectionSignals<M>,
}

impl<M: Model> Default for Collection<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> Collection<M> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a collection holding `items`, without emitting events.
    ///
    /// Duplicate items collapse to their first occurrence.
    pub fn from_items(items: Vec<M>) -> Self {
        Self::builder().items(items).build()
    }

    /// Returns a builder for configuring a collection.
    pub fn builder() -> CollectionBuilder<M> {
        CollectionBuilder::new()
    }

    pub(crate) fn from_builder(builder: CollectionBuilder<M>) -> Self {
        let collection = Self {
            items: RwLock::new(Vec::new()),
            factory: builder.factory,
            comparator: builder.comparator,
            signals: CollectionSignals::new(),
        };

        let initial = collection.admit(&[], builder.items);
        *collection.items.write() = initial;
        collection.signals.set_blocked(builder.silent);
        collection
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns a clone of the item at `index`.
    pub fn at(&self, index: usize) -> Option<M> {
        self.items.read().get(index).cloned()
    }

    /// Returns a clone of the first item.
    pub fn first(&self) -> Option<M> {
        self.items.read().first().cloned()
    }

    /// Returns a clone of the last item.
    pub fn last(&self) -> Option<M> {
        self.items.read().last().cloned()
    }

    /// Returns clones of the items in `range`, clamped to the collection.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Vec<M> {
        let items = self.items.read();
        let len = items.len();
        let start = match range.start_bound() {
            Bound::Included(&n) => n,
            Bound::Excluded(&n) => n.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&n) => n.saturating_add(1),
            Bound::Excluded(&n) => n,
            Bound::Unbounded => len,
        }
        .min(len);

        if start >= end {
            Vec::new()
        } else {
            items[start..end].to_vec()
        }
    }

    /// Returns clones of all items, in order.
    pub fn to_vec(&self) -> Vec<M> {
        self.items.read().clone()
    }

    /// Returns a reference to the items (read-only access).
    ///
    /// The collection cannot be mutated while the returned guard is alive.
    pub fn items(&self) -> impl Deref<Target = Vec<M>> + '_ {
        self.items.read()
    }

    /// Resolves `lookup` to a stored item.
    ///
    /// Resolution tries reference identity, then primary identity, then
    /// client identity, and finally value equality for queries without keys.
    pub fn get<'a>(&self, lookup: impl Into<Lookup<'a, M>>) -> Option<M> {
        let items = self.items.read();
        resolve(&items, &lookup.into()).map(|index| items[index].clone())
    }

    /// Resolves `lookup` to the position of a stored item.
    pub fn position<'a>(&self, lookup: impl Into<Lookup<'a, M>>) -> Option<usize> {
        resolve(&self.items.read(), &lookup.into())
    }

    /// Returns `true` if `lookup` resolves to a stored item.
    pub fn contains<'a>(&self, lookup: impl Into<Lookup<'a, M>>) -> bool {
        self.position(lookup).is_some()
    }

    // -------------------------------------------------------------------------
    // Insertion
    // -------------------------------------------------------------------------

    /// Appends the models that are not already present.
    ///
    /// Emits one `add` event with the appended models, if any.
    pub fn push<I>(&self, models: I) -> &Self
    where
        I: IntoIterator<Item = M>,
    {
        let added = {
            let mut items = self.items.write();
            let added = self.admit(&items, models);
            items.extend(added.iter().cloned());
            added
        };

        tracing::debug!(target: targets::COLLECTION, added = added.len(), "push");
        self.signals.emit_added(added);
        self
    }

    /// Prepends the models that are not already present, keeping their order.
    ///
    /// Emits one `add` event with the prepended models, if any.
    pub fn unshift<I>(&self, models: I) -> &Self
    where
        I: IntoIterator<Item = M>,
    {
        let added = {
            let mut items = self.items.write();
            let added = self.admit(&items, models);
            items.splice(0..0, added.iter().cloned());
            added
        };

        tracing::debug!(target: targets::COLLECTION, added = added.len(), "unshift");
        self.signals.emit_added(added);
        self
    }

    /// Inserts the models that are not already present at `index`.
    ///
    /// `index` is clamped to the collection length.
    pub fn insert_at<I>(&self, index: usize, models: I) -> &Self
    where
        I: IntoIterator<Item = M>,
    {
        self.splice(index, 0, models);
        self
    }

    // -------------------------------------------------------------------------
    // Removal
    // -------------------------------------------------------------------------

    /// Removes and returns the last item.
    ///
    /// Emits `remove` with the single removed model (not a list).
    pub fn pop(&self) -> Option<M> {
        let removed = self.items.write().pop();
        if let Some(model) = &removed {
            tracing::debug!(target: targets::COLLECTION, "pop");
            self.signals.emit_removed_one(model.clone());
        }
        removed
    }

    /// Removes and returns the first item.
    ///
    /// Emits `remove` with the single removed model (not a list).
    pub fn shift(&self) -> Option<M> {
        let removed = {
            let mut items = self.items.write();
            if items.is_empty() {
                None
            } else {
                Some(items.remove(0))
            }
        };
        if let Some(model) = &removed {
            tracing::debug!(target: targets::COLLECTION, "shift");
            self.signals.emit_removed_one(model.clone());
        }
        removed
    }

    /// Removes every stored item that one of `lookups` resolves to.
    ///
    /// Lookups that resolve to nothing are ignored, and lookups resolving to
    /// the same item remove it once. Emits one `remove` event listing the
    /// removed models in collection order, if any.
    #[tracing::instrument(skip_all, target = "modelarray::collection", level = "trace")]
    pub fn remove<'a, I>(&self, lookups: I) -> &Self
    where
        I: IntoIterator,
        I::Item: Into<Lookup<'a, M>>,
    {
        let removed = {
            let mut items = self.items.write();
            let mut positions: Vec<usize> = lookups
                .into_iter()
                .filter_map(|lookup| resolve(&items, &lookup.into()))
                .collect();
            positions.sort_unstable();
            positions.dedup();

            let mut removed: Vec<M> = positions
                .iter()
                .rev()
                .map(|&index| items.remove(index))
                .collect();
            removed.reverse();
            removed
        };

        tracing::debug!(target: targets::COLLECTION, removed = removed.len(), "remove");
        self.signals.emit_removed(removed);
        self
    }

    /// Removes `delete_count` items at `start` and inserts `models` there.
    ///
    /// Like a native splice, `start` and `delete_count` are clamped to the
    /// collection. Inserted models are deduplicated against each other and
    /// against the items that remain after deletion. Emits at most one
    /// `remove` and then at most one `add`. Returns the removed items.
    #[tracing::instrument(skip_all, target = "modelarray::collection", level = "trace")]
    pub fn splice<I>(&self, start: usize, delete_count: usize, models: I) -> Vec<M>
    where
        I: IntoIterator<Item = M>,
    {
        let (removed, added) = {
            let mut items = self.items.write();
            let len = items.len();
            let start = start.min(len);
            let end = start.saturating_add(delete_count).min(len);

            let removed: Vec<M> = items.drain(start..end).collect();
            let added = self.admit(&items, models);
            items.splice(start..start, added.iter().cloned());
            (removed, added)
        };

        tracing::debug!(
            target: targets::COLLECTION,
            removed = removed.len(),
            added = added.len(),
            "splice"
        );
        self.signals.emit_removed(removed.clone());
        self.signals.emit_added(added);
        removed
    }

    /// Like [`splice`](Self::splice), but fails instead of clamping `start`.
    pub fn try_splice<I>(&self, start: usize, delete_count: usize, models: I) -> Result<Vec<M>>
    where
        I: IntoIterator<Item = M>,
    {
        let len = self.len();
        if start > len {
            return Err(CollectionError::out_of_bounds(start, len));
        }
        Ok(self.splice(start, delete_count, models))
    }

    // -------------------------------------------------------------------------
    // Bulk operations
    // -------------------------------------------------------------------------

    /// Reconciles the contents with `models`.
    ///
    /// - Items matched by a model are merged with it and keep their
    ///   position. Duplicates within `models` collapse to their first
    ///   occurrence. Distinct models that resolve to the same stored item
    ///   (one by primary key, another by client key) are all merged into it,
    ///   in order.
    /// - Items matched by no model are removed.
    /// - Models matching no item are appended in the given order.
    ///
    /// Emits at most one `remove` and then at most one `add`. Calling `set`
    /// again with the same models emits nothing.
    #[tracing::instrument(skip_all, target = "modelarray::collection", level = "trace")]
    pub fn set<I>(&self, models: I) -> &Self
    where
        I: IntoIterator<Item = M>,
    {
        let _span = PerfSpan::new("collection.set");

        let (removed, added, merged) = {
            let mut items = self.items.write();

            let mut incoming: Vec<M> = Vec::new();
            for model in models {
                if resolve(&incoming, &Lookup::Model(&model)).is_none() {
                    incoming.push(model);
                }
            }

            let mut matched = vec![false; items.len()];
            let mut fresh = Vec::new();
            let mut merged = 0usize;
            for model in incoming {
                match resolve(&items, &Lookup::Model(&model)) {
                    Some(index) => {
                        matched[index] = true;
                        if items[index].merge(&model) {
                            merged += 1;
                        }
                    }
                    None => fresh.push(model),
                }
            }

            let mut retained = Vec::with_capacity(items.len() + fresh.len());
            let mut removed = Vec::new();
            for (item, keep) in items.drain(..).zip(matched) {
                if keep {
                    retained.push(item);
                } else {
                    removed.push(item);
                }
            }

            let added: Vec<M> = fresh.into_iter().map(|model| self.coerce(model)).collect();
            retained.extend(added.iter().cloned());
            *items = retained;
            (removed, added, merged)
        };

        tracing::debug!(
            target: targets::COLLECTION,
            removed = removed.len(),
            added = added.len(),
            merged,
            "set"
        );
        self.signals.emit_removed(removed);
        self.signals.emit_added(added);
        self
    }

    /// Replaces the contents with `models`, as given.
    ///
    /// No deduplication or merging takes place; the factory still applies.
    /// Emits exactly one `reset` event with the new contents.
    #[tracing::instrument(skip_all, target = "modelarray::collection", level = "trace")]
    pub fn reset<I>(&self, models: I) -> &Self
    where
        I: IntoIterator<Item = M>,
    {
        let contents: Vec<M> = models.into_iter().map(|model| self.coerce(model)).collect();
        *self.items.write() = contents.clone();

        tracing::debug!(target: targets::COLLECTION, len = contents.len(), "reset");
        self.signals.emit_reset(contents);
        self
    }

    /// Sorts with the configured comparator, else [`Model::compare`].
    ///
    /// Items without an ordering keep their relative order. Always emits
    /// one `sort` event.
    pub fn sort(&self) -> &Self {
        match self.comparator.clone() {
            Some(comparator) => self.sort_by(move |a, b| comparator(a, b)),
            None => self.sort_by(|a, b| a.compare(b).unwrap_or(Ordering::Equal)),
        }
    }

    /// Sorts with `compare`. Always emits one `sort` event.
    pub fn sort_by<F>(&self, compare: F) -> &Self
    where
        F: FnMut(&M, &M) -> Ordering,
    {
        self.items.write().sort_by(compare);

        tracing::debug!(target: targets::COLLECTION, "sort");
        self.signals.emit_sorted();
        self
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Registers a listener and returns the collection for chaining.
    pub fn on<F>(&self, kind: EventKind, listener: F) -> &Self
    where
        F: Fn(&CollectionEvent<M>) + Send + Sync + 'static,
    {
        self.connect(kind, listener);
        self
    }

    /// Registers a listener and returns its connection ID.
    pub fn connect<F>(&self, kind: EventKind, listener: F) -> ConnectionId
    where
        F: Fn(&CollectionEvent<M>) + Send + Sync + 'static,
    {
        self.signals.signal(kind).connect(listener)
    }

    /// Registers a listener that is removed when the guard is dropped.
    pub fn connect_scoped<F>(&self, kind: EventKind, listener: F) -> ConnectionGuard<CollectionEvent<M>>
    where
        F: Fn(&CollectionEvent<M>) + Send + Sync + 'static,
    {
        self.signals.signal(kind).connect_scoped(listener)
    }

    /// Removes one listener. Returns `false` if it was not registered.
    pub fn off(&self, kind: EventKind, id: ConnectionId) -> bool {
        self.signals.signal(kind).disconnect(id)
    }

    /// Removes one listener, failing if it was not registered.
    pub fn try_off(&self, kind: EventKind, id: ConnectionId) -> Result<()> {
        Ok(self.signals.signal(kind).try_disconnect(id)?)
    }

    /// Removes every listener of every event.
    pub fn off_all(&self) {
        self.signals.disconnect_all();
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.signals.signal(kind).connection_count()
    }

    /// Suppresses (or restores) all event emission.
    pub fn set_silent(&self, silent: bool) {
        self.signals.set_blocked(silent);
    }

    /// Whether event emission is suppressed.
    pub fn is_silent(&self) -> bool {
        self.signals.is_blocked()
    }

    /// Returns the signals of this collection.
    pub fn signals(&self) -> &CollectionSignals<M> {
        &self.signals
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Filters `candidates` down to the models an insertion may add.
    fn admit<I>(&self, current: &[M], candidates: I) -> Vec<M>
    where
        I: IntoIterator<Item = M>,
    {
        let mut accepted: Vec<M> = Vec::new();
        for candidate in candidates {
            let lookup = Lookup::Model(&candidate);
            if resolve(&accepted, &lookup).is_some() || resolve(current, &lookup).is_some() {
                continue;
            }
            accepted.push(candidate);
        }
        accepted.into_iter().map(|model| self.coerce(model)).collect()
    }

    fn coerce(&self, model: M) -> M {
        match &self.factory {
            Some(factory) if !model.is_instance() => factory(model),
            _ => model,
        }
    }
}

impl<M: Model> From<Vec<M>> for Collection<M> {
    fn from(items: Vec<M>) -> Self {
        Self::from_items(items)
    }
}

impl<M: Model> FromIterator<M> for Collection<M> {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        Self::builder().items(iter).build()
    }
}

impl<M: Model> Extend<M> for Collection<M> {
    fn extend<I: IntoIterator<Item = M>>(&mut self, iter: I) {
        self.push(iter);
    }
}

impl<M: Model + fmt::Debug> fmt::Debug for Collection<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("items", &*self.items.read())
            .field("factory", &self.factory.is_some())
            .field("comparator", &self.comparator.is_some())
            .field("silent", &self.is_silent())
            .finish()
    }
}

static_assertions::assert_impl_all!(Collection<String>: Send, Sync);
