//! Domain model for the todo list.
//!
//! # Invariants
//! - Every item is identified by a stable, non-nil `ItemId`.
//! - Item text is never empty once an item exists.

pub mod item;
