//! Delete confirmation dialog content

use crate::components::{SharedSelection, SharedStatus, SharedStore};
use crate::model::cabin::Cabin;
use crate::overlay::{CloseHandle, PointerEvent, WindowContent};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub struct ConfirmDelete {
    store: SharedStore,
    selected: SharedSelection,
    status: SharedStatus,
    /// Snapshot of the record under deletion, taken at mount
    target: Option<Cabin>,
    yes_region: Option<Rect>,
    no_region: Option<Rect>,
}

impl ConfirmDelete {
    pub fn new(store: SharedStore, selected: SharedSelection, status: SharedStatus) -> Self {
        Self {
            store,
            selected,
            status,
            target: None,
            yes_region: None,
            no_region: None,
        }
    }

    fn confirm(&mut self, close: &CloseHandle) {
        if let Some(cabin) = self.target.take() {
            match self.store.borrow_mut().delete(cabin.id) {
                Ok(()) => {
                    *self.status.borrow_mut() = Some(format!("Deleted cabin '{}'", cabin.name));
                    self.selected.set(None);
                }
                Err(err) => {
                    tracing::error!(%err, id = cabin.id, "deleting cabin failed");
                    *self.status.borrow_mut() = Some(format!("Could not delete: {err}"));
                }
            }
        }
        close.close();
    }
}

impl WindowContent for ConfirmDelete {
    fn on_mount(&mut self) {
        let store = self.store.borrow();
        self.target = self.selected.get().and_then(|id| store.get(id)).cloned();
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _close: &CloseHandle) -> Result<()> {
        let message = match &self.target {
            Some(cabin) => format!(
                "Delete cabin '{}' ({} guests, {:.0}/night)?",
                cabin.name,
                cabin.max_capacity,
                cabin.effective_price()
            ),
            None => "No cabin selected.".to_string(),
        };
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                message,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " y Delete ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::styled(
                    " n Cancel ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
            .centered(),
        ];
        frame.render_widget(Paragraph::new(lines), area);

        // Approximate the centered affordances for click hits: the row
        // holds both labels with a three-cell gap.
        let row_y = area.y + 3;
        let total: u16 = 10 + 3 + 10;
        let start_x = area.x + area.width.saturating_sub(total) / 2;
        self.yes_region = Some(Rect::new(start_x, row_y, 10, 1));
        self.no_region = Some(Rect::new(start_x + 13, row_y, 10, 1));
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent, close: &CloseHandle) -> Result<()> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.confirm(close),
            KeyCode::Char('n') | KeyCode::Char('N') => close.close(),
            _ => {}
        }
        Ok(())
    }

    fn handle_pointer(&mut self, event: &PointerEvent, close: &CloseHandle) -> Result<()> {
        if self
            .yes_region
            .is_some_and(|region| region.contains(event.position))
        {
            self.confirm(close);
        } else if self
            .no_region
            .is_some_and(|region| region.contains(event.position))
        {
            close.close();
        }
        Ok(())
    }
}
