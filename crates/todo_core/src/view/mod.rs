//! View model and presentation state for the single list screen.
//!
//! # Responsibility
//! - Derive the display order (incomplete items first) on every read.
//! - Translate user gestures into item store calls.
//!
//! # Invariants
//! - Nothing here keeps its own copy of items; rows are derived from the
//!   store on demand.

pub mod list_view;
pub mod order;
