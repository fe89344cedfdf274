//! Presentation state for the todo list screen.
//!
//! # Responsibility
//! - Hold the transient draft text of the input row.
//! - Resolve each gesture into exactly one item store call.
//! - Turn recoverable storage failures into a user-visible notice.
//!
//! # Invariants
//! - The draft is cleared only after a successful add.
//! - A delete gesture never toggles, and a row tap never deletes.
//! - Re-render need is driven by store notifications, not by diffing rows.

use crate::model::item::ItemId;
use crate::repo::item_repo::{ItemRepository, RepoError};
use crate::service::item_store::{ItemStore, StoreEvent};
use crate::view::order::{display_rows, RowModel};
use chrono::TimeZone;
use log::warn;
use std::fmt::Display;
use std::sync::mpsc::Receiver;

/// One resolved user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Tap anywhere on a row outside its delete control.
    TapRow(ItemId),
    /// Tap on a row's delete control.
    TapDelete(ItemId),
    /// Tap on the add control (or Enter in the input row).
    Submit,
}

/// Transient message shown after a recoverable failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

/// Screen state bound to an item store.
pub struct ListView<R: ItemRepository> {
    store: ItemStore<R>,
    changes: Receiver<StoreEvent>,
    draft: String,
    notice: Option<Notice>,
}

impl<R: ItemRepository> ListView<R> {
    /// Binds a view to `store` and subscribes to its changes.
    pub fn new(mut store: ItemStore<R>) -> Self {
        let changes = store.subscribe();
        Self {
            store,
            changes,
            draft: String::new(),
            notice: None,
        }
    }

    pub fn store(&self) -> &ItemStore<R> {
        &self.store
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn edit_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn push_char(&mut self, ch: char) {
        self.draft.push(ch);
    }

    pub fn pop_char(&mut self) {
        self.draft.pop();
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Rows in display order, re-derived from the store on every call.
    pub fn rows<Tz>(&self, tz: &Tz) -> Vec<RowModel>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        display_rows(self.store.list(), tz)
    }

    /// Drains pending store notifications.
    ///
    /// Returns `true` when at least one committed change arrived since the
    /// previous call, i.e. the screen must be re-rendered.
    pub fn take_changed(&mut self) -> bool {
        self.changes.try_iter().count() > 0
    }

    /// Applies one gesture to the store.
    pub fn handle(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Submit => self.submit(),
            Gesture::TapRow(id) => {
                let result = self.store.toggle_completed(id).map(|_| ());
                self.settle("update", result);
            }
            Gesture::TapDelete(id) => {
                let result = self.store.remove(id).map(|_| ());
                self.settle("delete", result);
            }
        }
    }

    /// Adds the draft as a new item.
    ///
    /// Blank drafts are ignored silently. The draft survives a failed write
    /// so the user can resubmit.
    pub fn submit(&mut self) {
        match self.store.add(&self.draft) {
            Ok(Some(_)) => {
                self.draft.clear();
                self.notice = None;
            }
            Ok(None) => {}
            Err(err) => self.fail("add", &err),
        }
    }

    fn settle(&mut self, action: &str, result: Result<(), RepoError>) {
        match result {
            Ok(()) => self.notice = None,
            Err(err) => self.fail(action, &err),
        }
    }

    fn fail(&mut self, action: &str, err: &RepoError) {
        warn!("event=gesture_failed module=view action={action} error={err}");
        self.notice = Some(Notice {
            message: format!("Could not {action} item: {err}"),
        });
    }
}
