//! Core systems for ModelArray.
//!
//! This crate provides the notification layer that observable collections
//! are built on:
//!
//! - **Signal/Slot System**: Typed, synchronous signals with slot-map backed
//!   connections and RAII connection guards
//! - **Logging**: `tracing` targets and span helpers shared by the workspace
//! - **Errors**: The error type for signal operations
//!
//! # Signal/Slot Example
//!
//! ```
//! use modelarray_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod signal;

pub use error::{Result, SignalError};
pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
