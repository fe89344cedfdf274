//! Todo item domain model.
//!
//! # Responsibility
//! - Define the single record shape persisted by the item store.
//! - Enforce creation-time invariants in every constructor and on decode.
//!
//! # Invariants
//! - `id` is never nil and never reused for another item.
//! - `text` is trimmed and non-empty.
//! - `timestamp` is fixed at construction; only `is_completed` changes.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier of a todo item.
pub type ItemId = Uuid;

/// Rejected item shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Text is empty or whitespace-only.
    EmptyText,
    /// The nil UUID is reserved and never identifies an item.
    NilId,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "item text must not be empty"),
            Self::NilId => write!(f, "item id must not be nil"),
        }
    }
}

impl Error for ItemValidationError {}

/// One to-do record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemFields")]
pub struct Item {
    pub id: ItemId,
    pub text: String,
    /// Creation time in Unix epoch milliseconds.
    pub timestamp: i64,
    pub is_completed: bool,
}

impl Item {
    /// Creates an incomplete item stamped with the current time.
    ///
    /// Surrounding whitespace is trimmed from `text`.
    pub fn new(text: impl AsRef<str>) -> Result<Self, ItemValidationError> {
        Self::with_id(Uuid::new_v4(), text, now_epoch_ms())
    }

    /// Creates an incomplete item with caller-provided identity and time.
    ///
    /// Used when identity already exists, e.g. fixtures and imports.
    pub fn with_id(
        id: ItemId,
        text: impl AsRef<str>,
        timestamp: i64,
    ) -> Result<Self, ItemValidationError> {
        let item = Self {
            id,
            text: text.as_ref().trim().to_string(),
            timestamp,
            is_completed: false,
        };
        item.validate()?;
        Ok(item)
    }

    /// Checks the invariants every stored item must satisfy.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.id.is_nil() {
            return Err(ItemValidationError::NilId);
        }
        if self.text.trim().is_empty() {
            return Err(ItemValidationError::EmptyText);
        }
        Ok(())
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.is_completed = !self.is_completed;
    }
}

#[derive(Deserialize)]
struct ItemFields {
    id: ItemId,
    text: String,
    timestamp: i64,
    is_completed: bool,
}

impl TryFrom<ItemFields> for Item {
    type Error = ItemValidationError;

    fn try_from(value: ItemFields) -> Result<Self, Self::Error> {
        let item = Self {
            id: value.id,
            text: value.text,
            timestamp: value.timestamp,
            is_completed: value.is_completed,
        };
        item.validate()?;
        Ok(item)
    }
}

/// Current wall-clock time in epoch milliseconds.
///
/// Clocks set before 1970 collapse to `0` instead of failing item creation.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}

#[cfg(test)]
mod tests {
    use super::{now_epoch_ms, Item};

    #[test]
    fn now_epoch_ms_is_after_2020() {
        assert!(now_epoch_ms() > 1_577_836_800_000);
    }

    #[test]
    fn toggle_flips_only_completion() {
        let mut item = Item::new("water plants").unwrap();
        let before = item.clone();

        item.toggle();
        assert!(item.is_completed);
        assert_eq!(item.id, before.id);
        assert_eq!(item.text, before.text);
        assert_eq!(item.timestamp, before.timestamp);

        item.toggle();
        assert_eq!(item, before);
    }
}
