//! Repository layer for todo item persistence.
//!
//! # Responsibility
//! - Define the storage contract the item store depends on.
//! - Keep SQL details out of store and presentation code.
//!
//! # Invariants
//! - Write paths call `Item::validate()` before SQL mutations.
//! - Repository APIs return semantic errors (`NotFound`) next to DB errors.

pub mod item_repo;
