//! # `multibar`
//!
//! A thread-safe, periodically redrawing multi-bar terminal progress display.
//!
//! `multibar` lets concurrently-running units of work report fractional
//! completion without managing display timing, cursor placement, or locking
//! themselves. It is designed to be:
//!
//! * **Concurrent**: arbitrary caller threads register bars and push updates;
//!   a single coarse lock keeps every frame consistent.
//! * **Self-rendering**: one background thread owns all terminal output,
//!   repainting every bar in place on a fixed interval using ANSI
//!   cursor-positioning sequences.
//! * **Infallible at the surface**: unknown ids, redundant stops, and sink
//!   write failures are silent no-ops — a progress display is a convenience,
//!   not a contract.
//!
//! ## Modules
//!
//! * [`builder`]: Fluent construction with custom sinks, intervals, and gauge widths.
//! * [`global`]: The lazily-initialized process-wide shared registry.
//! * [`io`]: Wrappers for [`std::io::Read`] and [`std::io::Write`] that advance a bar automatically.
//! * [`iter`]: Extension traits for tracking progress on Iterators.
//! * [`record`]: Per-bar state snapshots for external observers.
//! * [`registry`]: The core [`ProgressRegistry`], its redraw thread, and [`Bar`] handles.
//!
//! ## Example
//!
//! ```no_run
//! use multibar::ProgressRegistry;
//!
//! let registry = ProgressRegistry::new();
//! registry.register(1, "config files", 120);
//! registry.register(2, "checker", 40);
//!
//! // ... worker threads call registry.update(id, n) as they go ...
//!
//! registry.mark_finished(1);
//! registry.stop(); // joins the redraw thread; nothing is written after this
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod builder;
pub mod global;
pub mod io;
pub mod iter;
pub mod record;
pub mod registry;
mod render;

pub use builder::RegistryBuilder;
pub use io::{ProgressReader, ProgressWriter};
pub use iter::{ProgressIter, ProgressIteratorExt};
pub use record::RecordSnapshot;
pub use registry::{Bar, ProgressRegistry};
