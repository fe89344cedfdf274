//! Item store: the single source of truth for the todo list.
//!
//! # Responsibility
//! - Mirror the persisted item collection in memory.
//! - Apply add/toggle/remove through the repository, then notify subscribers.
//!
//! # Invariants
//! - The in-memory mirror changes only after the repository write commits.
//! - One `StoreEvent` is sent per committed mutation; none for no-ops or
//!   failures.
//! - Mutations are synchronous, so they are observed in call order.

use crate::model::item::{Item, ItemId};
use crate::repo::item_repo::{ItemRepository, RepoResult};
use log::{debug, info, warn};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Committed change to the item collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Added(ItemId),
    Toggled(ItemId),
    Removed(ItemId),
}

/// Persistence-backed owner of the item collection.
pub struct ItemStore<R: ItemRepository> {
    repo: R,
    items: Vec<Item>,
    subscribers: Vec<Sender<StoreEvent>>,
}

impl<R: ItemRepository> ItemStore<R> {
    /// Loads the persisted collection through `repo`.
    ///
    /// # Errors
    /// Returns the repository error unchanged; callers treat it as fatal.
    pub fn open(repo: R) -> RepoResult<Self> {
        let items = repo.list_items()?;
        info!(
            "event=store_open module=store status=ok item_count={}",
            items.len()
        );
        Ok(Self {
            repo,
            items,
            subscribers: Vec::new(),
        })
    }

    /// Registers a change listener.
    ///
    /// Dropping the receiver unsubscribes on the next mutation.
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (sender, receiver) = channel();
        self.subscribers.push(sender);
        receiver
    }

    /// All items in insertion order.
    pub fn list(&self) -> &[Item] {
        &self.items
    }

    /// Looks up one item by id.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Adds an item with trimmed `text`.
    ///
    /// Returns `Ok(None)` without touching storage when `text` is blank.
    pub fn add(&mut self, text: &str) -> RepoResult<Option<Item>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("event=item_add module=store status=skipped reason=blank_text");
            return Ok(None);
        }

        let item = Item::new(trimmed)?;
        if let Err(err) = self.repo.create_item(&item) {
            warn!(
                "event=item_add module=store status=error item_id={} error={}",
                item.id, err
            );
            return Err(err);
        }

        info!(
            "event=item_add module=store status=ok item_id={} text_len={}",
            item.id,
            item.text.chars().count()
        );
        self.items.push(item.clone());
        self.notify(StoreEvent::Added(item.id));
        Ok(Some(item))
    }

    /// Flips completion of the item with `id`.
    ///
    /// Returns the updated item, or `Ok(None)` when the id is unknown.
    pub fn toggle_completed(&mut self, id: ItemId) -> RepoResult<Option<Item>> {
        let Some(index) = self.position(id) else {
            debug!("event=item_toggle module=store status=skipped reason=unknown_id item_id={id}");
            return Ok(None);
        };

        let next = !self.items[index].is_completed;
        if let Err(err) = self.repo.set_completed(id, next) {
            warn!("event=item_toggle module=store status=error item_id={id} error={err}");
            return Err(err);
        }

        let item = &mut self.items[index];
        item.toggle();
        let updated = item.clone();
        info!("event=item_toggle module=store status=ok item_id={id} is_completed={next}");
        self.notify(StoreEvent::Toggled(id));
        Ok(Some(updated))
    }

    /// Deletes the item with `id` from memory and storage.
    ///
    /// Returns the removed item, or `Ok(None)` when the id is unknown.
    pub fn remove(&mut self, id: ItemId) -> RepoResult<Option<Item>> {
        let Some(index) = self.position(id) else {
            debug!("event=item_remove module=store status=skipped reason=unknown_id item_id={id}");
            return Ok(None);
        };

        match self.repo.delete_item(id) {
            Ok(true) => {}
            Ok(false) => {
                // Row vanished underneath the mirror; storage already agrees.
                warn!("event=item_remove module=store status=stale item_id={id}");
            }
            Err(err) => {
                warn!("event=item_remove module=store status=error item_id={id} error={err}");
                return Err(err);
            }
        }

        let removed = self.items.remove(index);
        info!("event=item_remove module=store status=ok item_id={id}");
        self.notify(StoreEvent::Removed(id));
        Ok(Some(removed))
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn notify(&mut self, event: StoreEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event).is_ok());
    }
}

