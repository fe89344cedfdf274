//! Use-case services over the item repository.
//!
//! # Responsibility
//! - Own the item collection and its change notifications.
//! - Keep presentation code decoupled from storage details.

pub mod item_store;
