//! Cabin form dialog content
//!
//! One content type serves both the create and the edit dialog. The form
//! loads its fields when the dialog mounts: blank for create, from the
//! shared selection for edit. Submitting validates, persists through the
//! store, and self-dismisses through the close handle; validation
//! problems stay in the dialog.

use crate::components::{SharedSelection, SharedStatus, SharedStore};
use crate::model::cabin::Cabin;
use crate::overlay::{CloseHandle, PointerEvent, WindowContent};
use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Whether submitting inserts a new record or replaces one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

struct Field {
    label: &'static str,
    value: String,
    numeric: bool,
}

impl Field {
    fn new(label: &'static str, numeric: bool) -> Self {
        Self {
            label,
            value: String::new(),
            numeric,
        }
    }
}

const FIELD_NAME: usize = 0;
const FIELD_CAPACITY: usize = 1;
const FIELD_PRICE: usize = 2;
const FIELD_DISCOUNT: usize = 3;
const FIELD_DESCRIPTION: usize = 4;

pub struct CabinForm {
    mode: FormMode,
    store: SharedStore,
    selected: SharedSelection,
    status: SharedStatus,
    /// Identity preserved across an edit session
    editing: Option<(u64, DateTime<Local>)>,
    fields: Vec<Field>,
    cursor: usize,
    error: Option<String>,
    field_regions: Vec<Rect>,
}

impl CabinForm {
    pub fn new(
        mode: FormMode,
        store: SharedStore,
        selected: SharedSelection,
        status: SharedStatus,
    ) -> Self {
        Self {
            mode,
            store,
            selected,
            status,
            editing: None,
            fields: blank_fields(),
            cursor: 0,
            error: None,
            field_regions: Vec::new(),
        }
    }

    fn next_field(&mut self) {
        self.cursor = (self.cursor + 1) % self.fields.len();
    }

    fn previous_field(&mut self) {
        self.cursor = (self.cursor + self.fields.len() - 1) % self.fields.len();
    }

    fn submit(&mut self, close: &CloseHandle) {
        let cabin = match self.collect() {
            Ok(cabin) => cabin,
            Err(problem) => {
                self.error = Some(problem);
                return;
            }
        };
        if let Err(problem) = cabin.validate() {
            self.error = Some(problem);
            return;
        }

        let outcome = match self.mode {
            FormMode::Create => self
                .store
                .borrow_mut()
                .create(cabin.clone())
                .map(|id| self.selected.set(Some(id))),
            FormMode::Edit => self.store.borrow_mut().update(cabin.clone()),
        };
        match outcome {
            Ok(()) => {
                *self.status.borrow_mut() = Some(match self.mode {
                    FormMode::Create => format!("Created cabin '{}'", cabin.name),
                    FormMode::Edit => format!("Saved cabin '{}'", cabin.name),
                });
                close.close();
            }
            Err(err) => {
                tracing::error!(%err, "saving cabin failed");
                self.error = Some(format!("could not save: {err}"));
            }
        }
    }

    fn collect(&self) -> Result<Cabin, String> {
        let (id, created_at) = match (self.mode, self.editing) {
            (FormMode::Edit, Some(identity)) => identity,
            (FormMode::Edit, None) => return Err("no cabin selected".into()),
            (FormMode::Create, _) => (0, Local::now()),
        };
        Ok(Cabin {
            id,
            name: self.fields[FIELD_NAME].value.trim().to_string(),
            max_capacity: parse_whole(&self.fields[FIELD_CAPACITY])?,
            regular_price: parse_number(&self.fields[FIELD_PRICE])?,
            discount: parse_number(&self.fields[FIELD_DISCOUNT])?,
            description: self.fields[FIELD_DESCRIPTION].value.trim().to_string(),
            created_at,
        })
    }
}

impl WindowContent for CabinForm {
    fn on_mount(&mut self) {
        self.cursor = 0;
        self.error = None;
        self.fields = blank_fields();
        self.editing = None;

        if self.mode == FormMode::Edit {
            let selected = self.selected.get();
            let store = self.store.borrow();
            match selected.and_then(|id| store.get(id)) {
                Some(cabin) => {
                    self.editing = Some((cabin.id, cabin.created_at));
                    self.fields[FIELD_NAME].value = cabin.name.clone();
                    self.fields[FIELD_CAPACITY].value = cabin.max_capacity.to_string();
                    self.fields[FIELD_PRICE].value = format!("{}", cabin.regular_price);
                    self.fields[FIELD_DISCOUNT].value = format!("{}", cabin.discount);
                    self.fields[FIELD_DESCRIPTION].value = cabin.description.clone();
                }
                None => {
                    self.error = Some("no cabin selected".into());
                }
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _close: &CloseHandle) -> Result<()> {
        self.field_regions.clear();
        let label_width = 13;

        for (index, field) in self.fields.iter().enumerate() {
            let y = area.y + index as u16 * 2;
            if y >= area.bottom() {
                break;
            }
            let active = index == self.cursor;
            let value_style = if active {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let caret = if active { "_" } else { "" };
            let line = Line::from(vec![
                Span::styled(
                    format!("{:>label_width$}  ", field.label),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(format!("{}{}", field.value, caret), value_style),
            ]);
            let region = Rect::new(area.x, y, area.width, 1);
            frame.render_widget(Paragraph::new(line), region);
            self.field_regions.push(region);
        }

        let footer_y = area.bottom().saturating_sub(1);
        let footer = if let Some(problem) = &self.error {
            Line::from(Span::styled(
                format!("✗ {}", problem),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(vec![
                Span::styled(" Enter ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::raw("Save  "),
                Span::styled(" Tab ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                Span::raw("Next field  "),
                Span::styled(" Esc ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::raw("Cancel"),
            ])
        };
        frame.render_widget(
            Paragraph::new(footer),
            Rect::new(area.x, footer_y, area.width, 1),
        );
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent, close: &CloseHandle) -> Result<()> {
        match key.code {
            KeyCode::Enter => self.submit(close),
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.previous_field(),
            KeyCode::Backspace => {
                self.fields[self.cursor].value.pop();
                self.error = None;
            }
            KeyCode::Char(c) => {
                let field = &mut self.fields[self.cursor];
                if !field.numeric || c.is_ascii_digit() || c == '.' {
                    field.value.push(c);
                    self.error = None;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_pointer(&mut self, event: &PointerEvent, _close: &CloseHandle) -> Result<()> {
        if let Some(index) = self
            .field_regions
            .iter()
            .position(|region| region.contains(event.position))
        {
            self.cursor = index;
        }
        Ok(())
    }
}

fn blank_fields() -> Vec<Field> {
    vec![
        Field::new("Name", false),
        Field::new("Max capacity", true),
        Field::new("Price", true),
        Field::new("Discount", true),
        Field::new("Description", false),
    ]
}

fn parse_whole(field: &Field) -> Result<u32, String> {
    field
        .value
        .trim()
        .parse()
        .map_err(|_| format!("{} must be a whole number", field.label.to_lowercase()))
}

fn parse_number(field: &Field) -> Result<f64, String> {
    let trimmed = field.value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse()
        .map_err(|_| format!("{} must be a number", field.label.to_lowercase()))
}
