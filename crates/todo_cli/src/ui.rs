//! Screen layout, rendering and pointer hit-testing.
//!
//! # Invariants
//! - Layout is a pure function of the terminal area, so rendering and
//!   hit-testing always agree on where controls are.
//! - A pointer position maps to at most one gesture.

use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use todo_core::{Gesture, RowModel};
use unicode_width::UnicodeWidthStr;

pub const PLACEHOLDER: &str = "Type a to-do…";
const TRASH_LABEL: &str = "[x]";
const TRASH_WIDTH: u16 = 3;
const CHECKMARK: &str = "✓";
const ADD_LABEL: &str = "Add";
const ADD_BUTTON_WIDTH: u16 = 9;
const DATE_WIDTH: u16 = 11;
const HELP_TEXT: &str =
    "Enter add · ↑/↓ select · Ctrl+T toggle · Ctrl+D delete · click row or [x] · Esc quit";

/// Screen regions for one terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    pub list: Rect,
    /// List area without its border; one item per line.
    pub list_inner: Rect,
    pub notice: Rect,
    pub input: Rect,
    pub add_button: Rect,
    pub help: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let [title, list, notice, input_row, help] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(area);
        let [input, add_button] =
            Layout::horizontal([Constraint::Min(10), Constraint::Length(ADD_BUTTON_WIDTH)])
                .areas(input_row);

        Self {
            title,
            list,
            list_inner: Block::bordered().inner(list),
            notice,
            input,
            add_button,
            help,
        }
    }

    /// Number of rows that fit in the list area.
    pub fn visible_rows(&self) -> usize {
        usize::from(self.list_inner.height)
    }
}

/// Everything the renderer needs for one frame.
pub struct Screen<'a> {
    pub rows: &'a [RowModel],
    pub selected: Option<usize>,
    pub offset: usize,
    pub draft: &'a str,
    pub notice: Option<&'a str>,
}

/// Resolves a left click at (`column`, `row`) into a gesture.
///
/// The trash cell of a row resolves to `TapDelete` only; the rest of the row
/// resolves to `TapRow`.
pub fn hit_test(
    layout: &ScreenLayout,
    rows: &[RowModel],
    offset: usize,
    column: u16,
    row: u16,
) -> Option<Gesture> {
    let position = Position::new(column, row);
    if layout.add_button.contains(position) {
        return Some(Gesture::Submit);
    }
    if !layout.list_inner.contains(position) {
        return None;
    }

    let index = offset + usize::from(row - layout.list_inner.y);
    let target = rows.get(index)?;
    if column < layout.list_inner.x + TRASH_WIDTH {
        Some(Gesture::TapDelete(target.id))
    } else {
        Some(Gesture::TapRow(target.id))
    }
}

pub fn render(frame: &mut Frame<'_>, screen: &Screen<'_>) {
    let layout = ScreenLayout::new(frame.area());

    render_title(frame, layout.title, screen.rows);
    render_list(frame, &layout, screen);

    if let Some(notice) = screen.notice {
        frame.render_widget(
            Paragraph::new(notice).style(Style::default().fg(Color::Yellow)),
            layout.notice,
        );
    }

    render_input(frame, &layout, screen.draft);
    frame.render_widget(
        Paragraph::new(HELP_TEXT).style(Style::default().fg(Color::DarkGray)),
        layout.help,
    );
}

fn render_title(frame: &mut Frame<'_>, area: Rect, rows: &[RowModel]) {
    let open = rows.iter().filter(|row| !row.is_completed).count();
    let title = Line::from(vec![
        Span::styled("To-do", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {open} open / {} total", rows.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_list(frame: &mut Frame<'_>, layout: &ScreenLayout, screen: &Screen<'_>) {
    frame.render_widget(Block::bordered(), layout.list);
    let inner = layout.list_inner;

    if screen.rows.is_empty() {
        frame.render_widget(
            Paragraph::new("Nothing to do.").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let visible = screen
        .rows
        .iter()
        .enumerate()
        .skip(screen.offset)
        .take(layout.visible_rows());
    for (line, (index, row)) in (0u16..).zip(visible) {
        let area = Rect {
            y: inner.y + line,
            height: 1,
            ..inner
        };
        let style = if screen.selected == Some(index) {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        render_row(frame, area, row, style);
    }
}

fn render_row(frame: &mut Frame<'_>, area: Rect, row: &RowModel, style: Style) {
    let [main, date] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(DATE_WIDTH)]).areas(area);

    let check = if row.is_completed { CHECKMARK } else { " " };
    let line = Line::from(vec![
        Span::styled(TRASH_LABEL, Style::default().fg(Color::Red)),
        Span::raw(" "),
        Span::styled(check, Style::default().fg(Color::Green)),
        Span::raw(" "),
        Span::raw(row.text.as_str()),
    ]);
    frame.render_widget(Paragraph::new(line).style(style), main);
    frame.render_widget(
        Paragraph::new(row.date_label.as_str())
            .right_aligned()
            .style(style.fg(Color::DarkGray)),
        date,
    );
}

fn render_input(frame: &mut Frame<'_>, layout: &ScreenLayout, draft: &str) {
    let inner = Block::bordered().inner(layout.input);
    let (scroll, cursor) = input_window(draft.width(), inner.width);
    let field = if draft.is_empty() {
        Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(draft).scroll((0, scroll))
    };
    frame.render_widget(field.block(Block::bordered()), layout.input);
    frame.render_widget(
        Paragraph::new(ADD_LABEL).centered().block(Block::bordered()),
        layout.add_button,
    );

    frame.set_cursor_position(Position::new(inner.x + cursor, inner.y));
}

/// Horizontal scroll and cursor column for a draft `draft_width` cells wide
/// in a field `field_width` cells wide. The cursor sits one cell past the
/// text, so long drafts scroll to keep their tail in view.
fn input_window(draft_width: usize, field_width: u16) -> (u16, u16) {
    let last = field_width.saturating_sub(1);
    let draft_width = u16::try_from(draft_width).unwrap_or(u16::MAX);
    if draft_width <= last {
        (0, draft_width)
    } else {
        (draft_width - last, last)
    }
}
