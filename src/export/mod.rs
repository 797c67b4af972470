//! Diagram and data export of built graphs.
//!
//! Export only reads the immutable [`Graph`](crate::core::Graph), so it can
//! run while the machine is executing.

mod graphml;
mod snapshot;

pub use graphml::{save_graphml, to_graphml};
pub use snapshot::{GraphSnapshot, StateSnapshot, TransitionSnapshot};
