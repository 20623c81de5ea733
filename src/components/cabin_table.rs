//! Cabin table component
//!
//! The main list view: cabins filtered by discount filter and name
//! search, with a cursor that feeds the shared selection the dialogs
//! read. Remembers the drawn row area so clicks can select rows.

use crate::action::Action;
use crate::model::filter::DiscountFilter;
use crate::services::CabinStore;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const COLUMNS: [(&str, usize); 5] = [
    ("Name", 16),
    ("Cap", 4),
    ("Price", 9),
    ("Discount", 9),
    ("Created", 11),
];

/// Table of cabin records
pub struct CabinTable {
    store: Rc<RefCell<CabinStore>>,
    selected: Rc<Cell<Option<u64>>>,
    /// Cursor into the visible rows
    cursor: usize,
    scroll: usize,
    pub search_mode: bool,
    search_query: String,
    /// Ids of the rows currently passing filter and search
    visible: Vec<u64>,
    /// Where rows were last drawn, for click hit tests
    rows_area: Option<Rect>,
}

impl CabinTable {
    pub fn new(store: Rc<RefCell<CabinStore>>, selected: Rc<Cell<Option<u64>>>) -> Self {
        Self {
            store,
            selected,
            cursor: 0,
            scroll: 0,
            search_mode: false,
            search_query: String::new(),
            visible: Vec::new(),
            rows_area: None,
        }
    }

    /// Recompute visible rows against the store, clamping the cursor and
    /// re-deriving the shared selection.
    pub fn refresh(&mut self, filter: DiscountFilter) {
        let query = self.search_query.to_lowercase();
        self.visible = self
            .store
            .borrow()
            .cabins()
            .iter()
            .filter(|cabin| filter.matches(cabin))
            .filter(|cabin| query.is_empty() || cabin.name.to_lowercase().contains(&query))
            .map(|cabin| cabin.id)
            .collect();
        if self.visible.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.visible.len() {
            self.cursor = self.visible.len() - 1;
        }
        self.sync_selected();
    }

    fn sync_selected(&mut self) {
        self.selected.set(self.visible.get(self.cursor).copied());
    }

    pub fn next(&mut self) {
        if self.cursor + 1 < self.visible.len() {
            self.cursor += 1;
        }
        self.sync_selected();
    }

    pub fn previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.sync_selected();
    }

    pub fn first(&mut self) {
        self.cursor = 0;
        self.sync_selected();
    }

    pub fn last(&mut self) {
        self.cursor = self.visible.len().saturating_sub(1);
        self.sync_selected();
    }

    /// Select the row drawn at a screen offset, if there is one.
    pub fn select_row(&mut self, row: usize) {
        let index = self.scroll + row;
        if index < self.visible.len() {
            self.cursor = index;
        }
        self.sync_selected();
    }

    /// Which drawn row a pointer position falls on.
    pub fn row_at(&self, position: Position) -> Option<usize> {
        let area = self.rows_area?;
        if !area.contains(position) {
            return None;
        }
        let row = (position.y - area.y) as usize;
        (self.scroll + row < self.visible.len()).then_some(row)
    }

    pub fn enter_search(&mut self) {
        self.search_mode = true;
    }

    pub fn exit_search(&mut self) {
        self.search_mode = false;
    }

    pub fn search_input(&mut self, c: char) {
        self.search_query.push(c);
    }

    pub fn search_backspace(&mut self) {
        self.search_query.pop();
    }

    /// Convert key events to Actions; no state changes here.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
            _ => None,
        };
        Ok(action)
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, filter: DiscountFilter) -> Result<()> {
        self.refresh(filter);

        let mut title = format!(
            " Cabins ({}/{}) · {} ",
            self.visible.len(),
            self.store.borrow().len(),
            filter.label()
        );
        if self.search_mode {
            title.push_str(&format!("· /{}_ ", self.search_query));
        } else if !self.search_query.is_empty() {
            title.push_str(&format!("· /{} ", self.search_query));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 2 {
            self.rows_area = None;
            return Ok(());
        }

        // Header line, then one line per row.
        let header_spans: Vec<Span> = COLUMNS
            .iter()
            .map(|(label, width)| {
                Span::styled(
                    pad(label, *width),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
            })
            .collect();
        frame.render_widget(
            Paragraph::new(Line::from(header_spans)),
            Rect::new(inner.x, inner.y, inner.width, 1),
        );

        let rows_area = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
        self.rows_area = Some(rows_area);

        // Keep the cursor on screen.
        let page = rows_area.height as usize;
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if page > 0 && self.cursor >= self.scroll + page {
            self.scroll = self.cursor + 1 - page;
        }

        let store = self.store.borrow();
        for (line, id) in self.visible.iter().skip(self.scroll).take(page).enumerate() {
            let Some(cabin) = store.get(*id) else {
                continue;
            };
            let is_cursor = self.scroll + line == self.cursor;
            let base = if is_cursor {
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let discount = if cabin.has_discount() {
                format!("-{:.0}", cabin.discount)
            } else {
                "—".to_string()
            };
            let cells = [
                pad(&cabin.name, COLUMNS[0].1),
                pad(&cabin.max_capacity.to_string(), COLUMNS[1].1),
                pad(&format!("{:.0}", cabin.regular_price), COLUMNS[2].1),
                pad(&discount, COLUMNS[3].1),
                pad(&cabin.created_at.format("%Y-%m-%d").to_string(), COLUMNS[4].1),
            ];
            let spans: Vec<Span> = cells
                .iter()
                .map(|cell| Span::styled(cell.clone(), base))
                .collect();
            frame.render_widget(
                Paragraph::new(Line::from(spans)),
                Rect::new(rows_area.x, rows_area.y + line as u16, rows_area.width, 1),
            );
        }

        if self.visible.is_empty() {
            let message = if store.is_empty() {
                "No cabins yet. Press 'a' to add one."
            } else {
                "No cabins match. Press 'f' to change the filter or '/' to search."
            };
            let empty = Paragraph::new(Line::from(Span::styled(
                message,
                Style::default().fg(Color::Yellow),
            )));
            frame.render_widget(empty, Rect::new(rows_area.x, rows_area.y, rows_area.width, 1));
        }

        Ok(())
    }
}

/// Pad or truncate to a display width, with a trailing column gap.
fn pad(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    if text.width() <= width {
        out.push_str(text);
        used = text.width();
    } else {
        for ch in text.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if used + ch_width > width.saturating_sub(1) {
                break;
            }
            out.push(ch);
            used += ch_width;
        }
        out.push('…');
        used += 1;
    }
    while used < width {
        out.push(' ');
        used += 1;
    }
    out.push_str("  ");
    out
}
