//! Interactive screen state: selection, scrolling and input dispatch.
//!
//! # Invariants
//! - Every key press or click produces at most one gesture.
//! - A redraw is requested when the store reports a change, the draft or
//!   selection moves, or the notice appears or expires.

use chrono::Local;
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use todo_core::{Gesture, ItemId, ItemRepository, ListView, RowModel};

use crate::ui::{self, Screen, ScreenLayout};

const NOTICE_TTL: Duration = Duration::from_secs(4);

pub struct App<R: ItemRepository> {
    view: ListView<R>,
    layout: ScreenLayout,
    selected: usize,
    offset: usize,
    notice_since: Option<Instant>,
    should_quit: bool,
}

impl<R: ItemRepository> App<R> {
    pub fn new(view: ListView<R>, area: Rect) -> Self {
        Self {
            view,
            layout: ScreenLayout::new(area),
            selected: 0,
            offset: 0,
            notice_since: None,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[cfg(test)]
    pub fn view(&self) -> &ListView<R> {
        &self.view
    }

    #[cfg(test)]
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn rows(&self) -> Vec<RowModel> {
        self.view.rows(&Local)
    }

    /// Renders the current state.
    pub fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let rows = self.rows();
        let selected = (!rows.is_empty()).then_some(self.selected);
        ui::render(
            frame,
            &Screen {
                rows: &rows,
                selected,
                offset: self.offset,
                draft: self.view.draft(),
                notice: self.view.notice().map(|notice| notice.message.as_str()),
            },
        );
    }

    pub fn resize(&mut self, area: Rect) {
        self.layout = ScreenLayout::new(area);
        self.clamp_selection();
    }

    /// Returns `true` when the screen must be redrawn.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                false
            }
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                false
            }
            KeyCode::Char('t') if ctrl => match self.selected_id() {
                Some(id) => self.apply(Gesture::TapRow(id)),
                None => false,
            },
            KeyCode::Char('d') if ctrl => match self.selected_id() {
                Some(id) => self.apply(Gesture::TapDelete(id)),
                None => false,
            },
            KeyCode::Enter => {
                self.apply(Gesture::Submit);
                true
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Backspace => {
                self.view.pop_char();
                true
            }
            KeyCode::Char(ch) if !ctrl => {
                self.view.push_char(ch);
                true
            }
            _ => false,
        }
    }

    /// Returns `true` when the screen must be redrawn.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let rows = self.rows();
                match ui::hit_test(&self.layout, &rows, self.offset, mouse.column, mouse.row) {
                    Some(gesture) => self.apply(gesture),
                    None => false,
                }
            }
            MouseEventKind::ScrollUp => self.move_selection(-1),
            MouseEventKind::ScrollDown => self.move_selection(1),
            _ => false,
        }
    }

    /// Expires a stale notice. Returns `true` when one was removed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.notice_since {
            Some(since) if now.duration_since(since) >= NOTICE_TTL => {
                self.view.dismiss_notice();
                self.notice_since = None;
                true
            }
            _ => false,
        }
    }

    fn apply(&mut self, gesture: Gesture) -> bool {
        let had_notice = self.view.notice().is_some();
        self.view.handle(gesture);
        let changed = self.view.take_changed();

        if let Gesture::TapRow(id) = gesture {
            self.follow(id);
        }
        self.clamp_selection();

        let has_notice = self.view.notice().is_some();
        if has_notice {
            self.notice_since = Some(Instant::now());
        } else {
            self.notice_since = None;
        }
        changed || has_notice || had_notice
    }

    fn selected_id(&self) -> Option<ItemId> {
        self.rows().get(self.selected).map(|row| row.id)
    }

    fn follow(&mut self, id: ItemId) {
        if let Some(index) = self.rows().iter().position(|row| row.id == id) {
            self.selected = index;
        }
    }

    fn move_selection(&mut self, delta: isize) -> bool {
        let count = self.view.store().list().len();
        if count == 0 {
            return false;
        }
        let next = self
            .selected
            .saturating_add_signed(delta)
            .min(count - 1);
        if next == self.selected {
            return false;
        }
        self.selected = next;
        self.clamp_selection();
        true
    }

    fn clamp_selection(&mut self) {
        let count = self.view.store().list().len();
        self.selected = self.selected.min(count.saturating_sub(1));

        let visible = self.layout.visible_rows().max(1);
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + visible {
            self.offset = self.selected + 1 - visible;
        }
        self.offset = self.offset.min(count.saturating_sub(visible));
    }
}
