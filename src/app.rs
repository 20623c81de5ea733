//! Root application component
//!
//! App wires the overlay core to the admin surface: one coordinator and
//! one interaction surface, five named dialogs bound to them, trigger
//! buttons in the toolbar, and the cabin table feeding the shared
//! selection the dialogs read. App itself stays lean - it converts
//! events to Actions and delegates.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, CabinForm, CabinTable, ConfirmDelete, FormMode, HelpDialog, QuitConfirm,
    SharedSelection, SharedStatus, SharedStore, Toolbar,
};
use crate::config::Config;
use crate::model::filter::DiscountFilter;
use crate::overlay::{
    InteractionSurface, OverlayAnchor, OverlayCoordinator, PointerEvent, PushButton, Trigger,
    WindowRenderer,
};
use crate::services::CabinStore;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

// ═══════════════════════════════════════════════════════════════════════════════
// Dialog names and trigger slots
// ═══════════════════════════════════════════════════════════════════════════════

const WIN_CREATE: &str = "create";
const WIN_EDIT: &str = "edit";
const WIN_DELETE: &str = "delete";
const WIN_HELP: &str = "help";
const WIN_QUIT: &str = "quit";

const TRIGGER_CREATE: usize = 0;
const TRIGGER_EDIT: usize = 1;
const TRIGGER_DELETE: usize = 2;
const TRIGGER_HELP: usize = 3;

/// What a pointer press resolved to, decided before dispatch so the
/// target stays stable while root listeners run.
#[derive(Clone, Copy)]
enum PointerTarget {
    /// Inside the mounted dialog (chrome or content)
    Dialog,
    /// On a toolbar trigger button
    TriggerAt(usize),
    /// On a toolbar filter segment
    Filter(DiscountFilter),
    /// On a table row (screen offset)
    Row(usize),
    Nothing,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    quit: Rc<Cell<bool>>,
    selected: SharedSelection,
    status: SharedStatus,
    filter: DiscountFilter,

    coordinator: OverlayCoordinator,
    surface: InteractionSurface,
    anchor: OverlayAnchor,
    /// Keeps the dialog registrations alive; dropping App tears every
    /// listener down with them.
    _windows: Vec<WindowRenderer>,
    triggers: Vec<Trigger>,

    toolbar: Toolbar,
    table: CabinTable,
}

impl App {
    pub fn new(config: &Config) -> Result<App> {
        let store: SharedStore = Rc::new(RefCell::new(CabinStore::load_or_seed(PathBuf::from(
            &config.data_path,
        ))?));
        let selected: SharedSelection = Rc::new(Cell::new(None));
        let status: SharedStatus = Rc::new(RefCell::new(None));
        let quit = Rc::new(Cell::new(false));

        let coordinator = OverlayCoordinator::new();
        let surface = InteractionSurface::new();
        let anchor = OverlayAnchor::new(&coordinator);

        let windows = vec![
            WindowRenderer::new(
                WIN_CREATE,
                Box::new(CabinForm::new(
                    FormMode::Create,
                    Rc::clone(&store),
                    Rc::clone(&selected),
                    Rc::clone(&status),
                )),
            )
            .with_title("New cabin")
            .with_size(56, 13),
            WindowRenderer::new(
                WIN_EDIT,
                Box::new(CabinForm::new(
                    FormMode::Edit,
                    Rc::clone(&store),
                    Rc::clone(&selected),
                    Rc::clone(&status),
                )),
            )
            .with_title("Edit cabin")
            .with_size(56, 13),
            WindowRenderer::new(
                WIN_DELETE,
                Box::new(ConfirmDelete::new(
                    Rc::clone(&store),
                    Rc::clone(&selected),
                    Rc::clone(&status),
                )),
            )
            .with_title("Delete cabin")
            .with_size(46, 8),
            WindowRenderer::new(WIN_HELP, Box::new(HelpDialog::new()))
                .with_title("Help")
                .with_size(44, 16),
            WindowRenderer::new(WIN_QUIT, Box::new(QuitConfirm::new(Rc::clone(&quit))))
                .with_title("Quit?")
                .with_size(40, 7),
        ];
        for window in &windows {
            window.bind(&coordinator, &surface);
        }

        let mut triggers = vec![
            Trigger::builder(WIN_CREATE)
                .child(PushButton::new("a Add"))
                .build()?,
            Trigger::builder(WIN_EDIT)
                .child(PushButton::new("e Edit"))
                .build()?,
            Trigger::builder(WIN_DELETE)
                .child(PushButton::new("d Delete"))
                .build()?,
            Trigger::builder(WIN_HELP)
                .child(PushButton::new("? Help"))
                .build()?,
        ];
        for trigger in &mut triggers {
            trigger.bind(&coordinator);
        }

        let table = CabinTable::new(Rc::clone(&store), Rc::clone(&selected));

        Ok(App {
            quit,
            selected,
            status,
            filter: DiscountFilter::All,
            coordinator,
            surface,
            anchor,
            _windows: windows,
            triggers,
            toolbar: Toolbar::new(),
            table,
        })
    }

    pub fn should_quit(&self) -> bool {
        self.quit.get()
    }

    /// Run an Action and any follow-ups it produces.
    pub fn run_action(&mut self, action: Action) -> Result<()> {
        let mut current = Some(action);
        while let Some(action) = current {
            current = self.update(action)?;
        }
        Ok(())
    }

    /// Route a mouse event. Presses become pointer events dispatched
    /// through the interaction surface (capture pass, target, bubble
    /// pass); the wheel scrolls the table directly.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let event = PointerEvent::new(mouse.column, mouse.row);
                let target = self.pointer_target(event.position);
                let surface = self.surface.clone();
                let mut outcome: Result<()> = Ok(());
                surface.dispatch(&event, |pointer| {
                    outcome = self.run_target(target, pointer);
                });
                outcome?;
                Ok(None)
            }
            MouseEventKind::ScrollDown if !self.coordinator.is_open() => {
                Ok(Some(Action::NextItem))
            }
            MouseEventKind::ScrollUp if !self.coordinator.is_open() => Ok(Some(Action::PrevItem)),
            _ => Ok(None),
        }
    }

    fn pointer_target(&self, position: Position) -> PointerTarget {
        if let Some(window) = self.coordinator.active_window() {
            if window.contains(position) {
                return PointerTarget::Dialog;
            }
        }
        if let Some(index) = self
            .triggers
            .iter()
            .position(|trigger| trigger.contains(position))
        {
            return PointerTarget::TriggerAt(index);
        }
        if let Some(filter) = self.toolbar.filter_at(position) {
            return PointerTarget::Filter(filter);
        }
        if let Some(row) = self.table.row_at(position) {
            return PointerTarget::Row(row);
        }
        PointerTarget::Nothing
    }

    fn run_target(&mut self, target: PointerTarget, event: &PointerEvent) -> Result<()> {
        match target {
            PointerTarget::Dialog => {
                // Still mounted: the capture pass never dismisses an
                // event originating inside the protected region.
                if let Some(window) = self.coordinator.active_window() {
                    window.handle_pointer(event)?;
                }
            }
            PointerTarget::TriggerAt(index) => {
                let action = match self.triggers[index].opens() {
                    WIN_CREATE => Action::OpenCreate,
                    WIN_EDIT => Action::OpenEdit,
                    WIN_DELETE => Action::OpenDelete,
                    _ => Action::OpenHelp,
                };
                self.run_action(action)?;
            }
            PointerTarget::Filter(filter) => self.run_action(Action::SetFilter(filter))?,
            PointerTarget::Row(row) => self.run_action(Action::SelectRow(row))?,
            PointerTarget::Nothing => {}
        }
        Ok(())
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let message = self.status.borrow().clone();
        let line = match message {
            Some(message) => Line::from(Span::styled(
                message,
                Style::default().fg(Color::Green),
            )),
            None => Line::from(Span::styled(
                " a Add · e Edit · d Delete · f Filter · / Search · ? Help · q Quit",
                Style::default().fg(Color::DarkGray),
            )),
        };
        let bar = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(bar, area);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        // A mounted dialog owns the keyboard.
        if let Some(window) = self.coordinator.active_window() {
            window.handle_key_event(key)?;
            return Ok(None);
        }

        if self.table.search_mode {
            let action = match key.code {
                KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
                KeyCode::Backspace => Some(Action::SearchBackspace),
                KeyCode::Char(c) => Some(Action::SearchInput(c)),
                _ => None,
            };
            return Ok(action);
        }

        let action = match key.code {
            KeyCode::Char('q') => Some(Action::OpenQuitConfirm),
            KeyCode::Char('a') | KeyCode::Char('n') => Some(Action::OpenCreate),
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::OpenEdit),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::OpenDelete),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('f') => Some(Action::CycleFilter),
            KeyCode::Char('/') => Some(Action::EnterSearchMode),
            _ => return self.table.handle_key_event(key),
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick | Action::Resize(_, _) => {}
            Action::ForceQuit => self.quit.set(true),

            Action::NextItem => self.table.next(),
            Action::PrevItem => self.table.previous(),
            Action::FirstItem => self.table.first(),
            Action::LastItem => self.table.last(),
            Action::SelectRow(row) => self.table.select_row(row),

            Action::OpenCreate => self.triggers[TRIGGER_CREATE].activate()?,
            Action::OpenEdit => {
                if self.selected.get().is_some() {
                    self.triggers[TRIGGER_EDIT].activate()?;
                } else {
                    *self.status.borrow_mut() = Some("No cabin selected".into());
                }
            }
            Action::OpenDelete => {
                if self.selected.get().is_some() {
                    self.triggers[TRIGGER_DELETE].activate()?;
                } else {
                    *self.status.borrow_mut() = Some("No cabin selected".into());
                }
            }
            Action::OpenHelp => self.triggers[TRIGGER_HELP].activate()?,
            Action::OpenQuitConfirm => self.coordinator.open(WIN_QUIT),

            Action::CycleFilter => {
                self.filter = self.filter.cycle();
                *self.status.borrow_mut() = Some(format!("Filter: {}", self.filter.label()));
            }
            Action::SetFilter(filter) => {
                self.filter = filter;
                *self.status.borrow_mut() = Some(format!("Filter: {}", filter.label()));
            }
            Action::EnterSearchMode => self.table.enter_search(),
            Action::ExitSearchMode => self.table.exit_search(),
            Action::SearchInput(c) => self.table.search_input(c),
            Action::SearchBackspace => self.table.search_backspace(),
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_main_layout(area);
        self.toolbar
            .draw(frame, layout.toolbar, &mut self.triggers, self.filter);
        self.table.draw(frame, layout.table, self.filter)?;
        self.draw_status(frame, layout.status);

        // Dialogs render last, over the whole frame, regardless of the
        // layout above.
        self.anchor.draw(frame)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::TempDir;

    fn test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let config = Config {
            data_path: dir.path().join("cabins.json").to_string_lossy().to_string(),
        };
        (App::new(&config).unwrap(), dir)
    }

    fn draw_once(app: &mut App) {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                app.draw(frame, area).unwrap();
            })
            .unwrap();
    }

    fn click(app: &mut App, x: u16, y: u16) {
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_mouse_event(mouse).unwrap();
    }

    #[test]
    fn test_open_actions_drive_the_coordinator() {
        let (mut app, _dir) = test_app();
        draw_once(&mut app);

        app.run_action(Action::OpenCreate).unwrap();
        assert_eq!(app.coordinator.active_name(), "create");

        // Direct switch, no intervening close.
        app.run_action(Action::OpenHelp).unwrap();
        assert_eq!(app.coordinator.active_name(), "help");
    }

    #[test]
    fn test_edit_requires_a_selection() {
        let (mut app, _dir) = test_app();
        // Nothing drawn yet, so the table has no rows and no selection.
        app.run_action(Action::OpenEdit).unwrap();
        assert_eq!(app.coordinator.active_name(), "");
        assert!(app.status.borrow().as_deref().unwrap().contains("No cabin"));
    }

    #[test]
    fn test_outside_click_dismisses_inside_click_does_not() {
        let (mut app, _dir) = test_app();
        draw_once(&mut app);

        app.run_action(Action::OpenEdit).unwrap();
        assert_eq!(app.coordinator.active_name(), "edit");
        draw_once(&mut app);

        // Center of a 100x30 frame is inside the 56x13 dialog.
        click(&mut app, 50, 15);
        assert_eq!(app.coordinator.active_name(), "edit");

        click(&mut app, 0, 29);
        assert_eq!(app.coordinator.active_name(), "");
    }

    #[test]
    fn test_row_click_selects() {
        let (mut app, _dir) = test_app();
        draw_once(&mut app);
        let first = app.selected.get();

        // Second visible row: toolbar is 3 high, table border and header
        // take two more lines.
        click(&mut app, 10, 6);
        assert_ne!(app.selected.get(), first);
    }

    #[test]
    fn test_quit_dialog_round_trip() {
        let (mut app, _dir) = test_app();
        app.run_action(Action::OpenQuitConfirm).unwrap();
        assert_eq!(app.coordinator.active_name(), "quit");

        app.handle_key_event(KeyEvent::from(KeyCode::Char('y')))
            .unwrap();
        assert!(app.should_quit());
        assert_eq!(app.coordinator.active_name(), "");
    }
}
