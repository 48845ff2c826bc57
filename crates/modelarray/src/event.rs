//! Change events emitted by collections.
//!
//! | Event    | Payload                                        |
//! |----------|------------------------------------------------|
//! | `add`    | [`CollectionEvent::Add`] with the added models |
//! | `remove` | [`CollectionEvent::Remove`], see [`Removed`]   |
//! | `reset`  | [`CollectionEvent::Reset`] with the new models |
//! | `sort`   | [`CollectionEvent::Sort`]                      |

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use modelarray_core::Signal;

use crate::error::CollectionError;

/// The name of a collection event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Models were inserted.
    Add,
    /// Models were removed.
    Remove,
    /// All models were replaced.
    Reset,
    /// Models were reordered.
    Sort,
}

impl EventKind {
    /// Every event kind, in declaration order.
    pub const ALL: [EventKind; 4] = [Self::Add, Self::Remove, Self::Reset, Self::Sort];

    /// The canonical event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Reset => "reset",
            Self::Sort => "sort",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = CollectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            "reset" => Ok(Self::Reset),
            "sort" => Ok(Self::Sort),
            other => Err(CollectionError::UnknownEvent(other.to_owned())),
        }
    }
}

/// Payload of a `remove` event.
///
/// `pop` and `shift` report the single removed model as [`Removed::One`];
/// `remove`, `splice` and `set` always report a list.
#[derive(Debug, Clone, PartialEq)]
pub enum Removed<M> {
    /// A single model removed by `pop` or `shift`.
    One(M),
    /// The models removed by a batch operation, in collection order.
    Many(Vec<M>),
}

impl<M> Removed<M> {
    /// The removed models as a slice, regardless of shape.
    pub fn as_slice(&self) -> &[M] {
        match self {
            Self::One(model) => std::slice::from_ref(model),
            Self::Many(models) => models,
        }
    }

    /// Returns the model if this payload is the single-model shape.
    pub fn as_one(&self) -> Option<&M> {
        match self {
            Self::One(model) => Some(model),
            Self::Many(_) => None,
        }
    }
}

/// A change notification delivered to collection listeners.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionEvent<M> {
    /// Models inserted by `push`, `unshift`, `splice` or `set`. Never empty.
    Add(Vec<M>),
    /// Models removed by `pop`, `shift`, `remove`, `splice` or `set`.
    Remove(Removed<M>),
    /// The complete new contents after `reset`.
    Reset(Vec<M>),
    /// The collection was sorted.
    Sort,
}

impl<M> CollectionEvent<M> {
    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Add(_) => EventKind::Add,
            Self::Remove(_) => EventKind::Remove,
            Self::Reset(_) => EventKind::Reset,
            Self::Sort => EventKind::Sort,
        }
    }

    /// The models carried by this event; empty for `sort`.
    pub fn models(&self) -> &[M] {
        match self {
            Self::Add(models) | Self::Reset(models) => models,
            Self::Remove(removed) => removed.as_slice(),
            Self::Sort => &[],
        }
    }
}

/// The per-instance listener registry of a collection.
///
/// One signal per [`EventKind`]. Only the owning collection emits; the
/// emitters skip empty payloads so that `add` and batch `remove` never
/// carry an empty list.
pub struct CollectionSignals<M> {
    add: Arc<Signal<CollectionEvent<M>>>,
    remove: Arc<Signal<CollectionEvent<M>>>,
    reset: Arc<Signal<CollectionEvent<M>>>,
    sort: Arc<Signal<CollectionEvent<M>>>,
}

impl<M: 'static> CollectionSignals<M> {
    /// Creates a new set of collection signals.
    pub(crate) fn new() -> Self {
        Self {
            add: Arc::new(Signal::new()),
            remove: Arc::new(Signal::new()),
            reset: Arc::new(Signal::new()),
            sort: Arc::new(Signal::new()),
        }
    }

    /// The signal for the given event kind.
    pub fn signal(&self, kind: EventKind) -> &Arc<Signal<CollectionEvent<M>>> {
        match kind {
            EventKind::Add => &self.add,
            EventKind::Remove => &self.remove,
            EventKind::Reset => &self.reset,
            EventKind::Sort => &self.sort,
        }
    }

    /// Emits `add` unless `models` is empty.
    pub(crate) fn emit_added(&self, models: Vec<M>) {
        if !models.is_empty() {
            self.add.emit(CollectionEvent::Add(models));
        }
    }

    /// Emits `remove` with a list payload unless `models` is empty.
    pub(crate) fn emit_removed(&self, models: Vec<M>) {
        if !models.is_empty() {
            self.remove.emit(CollectionEvent::Remove(Removed::Many(models)));
        }
    }

    /// Emits `remove` with a single-model payload.
    pub(crate) fn emit_removed_one(&self, model: M) {
        self.remove.emit(CollectionEvent::Remove(Removed::One(model)));
    }

    /// Emits `reset`, even when the new contents are empty.
    pub(crate) fn emit_reset(&self, models: Vec<M>) {
        self.reset.emit(CollectionEvent::Reset(models));
    }

    /// Emits `sort`.
    pub(crate) fn emit_sorted(&self) {
        self.sort.emit(CollectionEvent::Sort);
    }

    /// Disconnects every listener of every event.
    pub fn disconnect_all(&self) {
        for kind in EventKind::ALL {
            self.signal(kind).disconnect_all();
        }
    }

    /// Blocks or unblocks emission of every event.
    pub fn set_blocked(&self, blocked: bool) {
        for kind in EventKind::ALL {
            self.signal(kind).set_blocked(blocked);
        }
    }

    /// Whether emission of every event is currently blocked.
    pub fn is_blocked(&self) -> bool {
        EventKind::ALL
            .into_iter()
            .all(|kind| self.signal(kind).is_blocked())
    }
}
