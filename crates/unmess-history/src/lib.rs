//! # unmess-history
//!
//! Image states, the operation log, and bounded undo/redo.
//!
//! - [`ImageState`] - immutable original/current pair plus metadata and log
//! - [`Operation`] - one log entry per executed edit, serializable for audit
//! - [`ImageMetadata`] - dimensions, format, size and modification tracking
//! - [`HistoryManager`] - thread-safe bounded undo/redo stacks with memory accounting
//! - [`EditSession`] - load, edit, preview, undo: the whole editing loop
//!
//! ## Dependencies
//!
//! ```text
//! unmess-core  (errors, buffers, validation, observer)
//!    ^
//! unmess-ops   (Edit, Adjustments)
//!    ^
//! unmess-history (this crate)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod history;
pub mod metadata;
pub mod operation;
pub mod session;
pub mod state;

pub use history::{HistoryManager, HistoryStats};
pub use metadata::ImageMetadata;
pub use operation::{Operation, OperationKind};
pub use session::EditSession;
pub use state::ImageState;
