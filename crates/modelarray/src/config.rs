//! Collection configuration.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::collection::Collection;
use crate::model::Model;

/// Turns a value that is not yet a model instance into one.
///
/// Only invoked for candidates whose [`Model::is_instance`] is `false`.
pub type ModelFactory<M> = Arc<dyn Fn(M) -> M + Send + Sync>;

/// Default three-way comparator used by [`Collection::sort`].
pub type Comparator<M> = Arc<dyn Fn(&M, &M) -> Ordering + Send + Sync>;

/// Builder for a [`Collection`].
///
/// # Example
///
/// ```
/// use modelarray::Collection;
///
/// let names = Collection::builder()
///     .comparator(|a: &String, b: &String| a.len().cmp(&b.len()))
///     .items(["pg".to_string(), "mehdi".to_string(), "pg".to_string()])
///     .build();
///
/// assert_eq!(names.len(), 2);
/// ```
pub struct CollectionBuilder<M: Model> {
    pub(crate) items: Vec<M>,
    pub(crate) factory: Option<ModelFactory<M>>,
    pub(crate) comparator: Option<Comparator<M>>,
    pub(crate) silent: bool,
}

impl<M: Model> Default for CollectionBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> CollectionBuilder<M> {
    /// Create a builder for an empty collection with no hooks.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            factory: None,
            comparator: None,
            silent: false,
        }
    }

    /// Set the model factory.
    pub fn factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(M) -> M + Send + Sync + 'static,
    {
        self.factory = Some(Arc::new(factory));
        self
    }

    /// Set the default comparator.
    pub fn comparator<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&M, &M) -> Ordering + Send + Sync + 'static,
    {
        self.comparator = Some(Arc::new(comparator));
        self
    }

    /// Add initial items.
    ///
    /// Initial items follow insertion rules (duplicates collapse, the
    /// factory applies) but no event is emitted for them.
    pub fn items<I>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = M>,
    {
        self.items.extend(items);
        self
    }

    /// Start with event emission blocked.
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Build the collection.
    pub fn build(self) -> Collection<M> {
        Collection::from_builder(self)
    }
}

impl<M: Model> fmt::Debug for CollectionBuilder<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionBuilder")
            .field("items", &self.items.len())
            .field("factory", &self.factory.is_some())
            .field("comparator", &self.comparator.is_some())
            .field("silent", &self.silent)
            .finish()
    }
}
