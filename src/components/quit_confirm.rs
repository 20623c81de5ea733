//! Quit confirmation dialog content

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
use std::cell::Cell;
use std::rc::Rc;

pub struct QuitConfirm {
    quit: Rc<Cell<bool>>,
}

impl QuitConfirm {
    pub fn new(quit: Rc<Cell<bool>>) -> Self {
        Self { quit }
    }
}

impl WindowContent for QuitConfirm {
    fn draw(&mut self, frame: &mut Frame, area: Rect, _close: &CloseHandle) -> Result<()> {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Quit lodge-tui?",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " y ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Yes, quit  "),
                Span::styled(
                    " n/Esc ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("No, stay"),
            ])
            .centered(),
        ];
        frame.render_widget(Paragraph::new(lines), area);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent, close: &CloseHandle) -> Result<()> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.quit.set(true);
                close.close();
            }
            KeyCode::Char('n') | KeyCode::Char('N') => close.close(),
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{InteractionSurface, OverlayCoordinator, WindowRenderer};

    #[test]
    fn test_yes_sets_quit_flag_and_dismisses() {
        let quit = Rc::new(Cell::new(false));
        let coordinator = OverlayCoordinator::new();
        let surface = InteractionSurface::new();
        let window = WindowRenderer::new("quit", Box::new(QuitConfirm::new(Rc::clone(&quit))));
        window.bind(&coordinator, &surface);

        coordinator.open("quit");
        window
            .handle_key_event(KeyEvent::from(KeyCode::Char('y')))
            .unwrap();

        assert!(quit.get());
        assert_eq!(coordinator.active_name(), "");
    }

    #[test]
    fn test_no_just_dismisses() {
        let quit = Rc::new(Cell::new(false));
        let coordinator = OverlayCoordinator::new();
        let surface = InteractionSurface::new();
        let window = WindowRenderer::new("quit", Box::new(QuitConfirm::new(Rc::clone(&quit))));
        window.bind(&coordinator, &surface);

        coordinator.open("quit");
        window
            .handle_key_event(KeyEvent::from(KeyCode::Char('n')))
            .unwrap();

        assert!(!quit.get());
        assert_eq!(coordinator.active_name(), "");
    }
}
