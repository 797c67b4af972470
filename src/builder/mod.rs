//! Builder API for declaring state graphs.
//!
//! The builder accumulates states and transitions through fluent calls and
//! turns them into a validated [`Graph`](crate::core::Graph) on
//! [`StateMachineBuilder::build`].
//!
//! # Example
//!
//! ```rust
//! use active_machine::builder::StateMachineBuilder;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! let paid = Arc::new(AtomicBool::new(false));
//! let check = Arc::clone(&paid);
//!
//! let mut builder = StateMachineBuilder::new("order").unwrap();
//! builder
//!     .state("Open", true)
//!     .unwrap()
//!     .on("ship")
//!     .when("paid", move || check.load(Ordering::SeqCst))
//!     .action("print-label", || {})
//!     .go_to("Shipped")
//!     .unwrap();
//! builder
//!     .state("Shipped", false)
//!     .unwrap()
//!     .on_enter("notify-customer", || {})
//!     .as_terminal();
//!
//! let graph = builder.build().unwrap();
//! assert!(graph.get("Shipped").unwrap().is_terminal());
//! ```

pub mod error;
pub mod machine;
pub mod macros;
pub mod state;
pub mod transition;

pub use error::{BuildError, GraphViolation};
pub use machine::StateMachineBuilder;
pub use state::StateBuilder;
pub use transition::TransitionBuilder;
