//! Help dialog content showing all keyboard shortcuts

use crate::overlay::{CloseHandle, WindowContent};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const BINDINGS: [(&str, &str); 12] = [
    ("j / ↓", "Next cabin"),
    ("k / ↑", "Previous cabin"),
    ("g / G", "First / last cabin"),
    ("a", "Add a cabin"),
    ("e / Enter", "Edit the selected cabin"),
    ("d", "Delete the selected cabin"),
    ("f", "Cycle the discount filter"),
    ("/", "Search by name"),
    ("?", "This help"),
    ("Esc", "Close the open dialog"),
    ("q", "Quit"),
    ("Mouse", "Click rows, buttons and filters"),
];

#[derive(Default)]
pub struct HelpDialog {
    scroll: u16,
}

impl HelpDialog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WindowContent for HelpDialog {
    fn on_mount(&mut self) {
        self.scroll = 0;
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _close: &CloseHandle) -> Result<()> {
        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(keys, what)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:>10} ", keys),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*what),
                ])
            })
            .collect();
        let paragraph = Paragraph::new(lines).scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent, _close: &CloseHandle) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll = self
                    .scroll
                    .saturating_add(1)
                    .min(BINDINGS.len().saturating_sub(1) as u16);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            _ => {}
        }
        Ok(())
    }
}
