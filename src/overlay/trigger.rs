//! Triggers - interactive elements that open a named dialog
//!
//! A trigger wraps exactly one interactive child element and binds an
//! activation handler to it: on activation, the child's own press
//! behavior runs first (preserved, not replaced), then the coordinator
//! is asked to open the trigger's target name. Triggers are write-only
//! with respect to overlay state; they never read the active name.

use super::coordinator::OverlayCoordinator;
use super::error::OverlayError;
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// A labelled, clickable element
///
/// The button may carry its own press behavior; wrapping it in a
/// [`Trigger`] adds the dialog-open binding on top without disturbing it.
pub struct PushButton {
    label: String,
    on_press: Option<Box<dyn FnMut()>>,
    region: Option<Rect>,
}

impl PushButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            on_press: None,
            region: None,
        }
    }

    /// Attach press behavior of the button's own.
    pub fn on_press(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_press = Some(Box::new(handler));
        self
    }

    /// Cells the button wants horizontally, padding included.
    pub fn desired_width(&self) -> u16 {
        self.label.width() as u16 + 2
    }

    pub fn press(&mut self) {
        if let Some(handler) = self.on_press.as_mut() {
            handler();
        }
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect) {
        let widget = Paragraph::new(Line::from(Span::styled(
            format!(" {} ", self.label),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(widget, area);
        self.region = Some(area);
    }

    /// Whether a pointer position falls on the drawn button.
    pub fn contains(&self, position: Position) -> bool {
        self.region.is_some_and(|region| region.contains(position))
    }
}

/// Builder enforcing the single-child contract
pub struct TriggerBuilder {
    opens: String,
    children: Vec<PushButton>,
}

impl TriggerBuilder {
    pub fn child(mut self, button: PushButton) -> Self {
        self.children.push(button);
        self
    }

    /// Fails unless exactly one child was supplied; binding a handler to
    /// an arbitrary child would hide a composition mistake.
    pub fn build(mut self) -> Result<Trigger, OverlayError> {
        if self.children.len() != 1 {
            return Err(OverlayError::AmbiguousTriggerChild {
                opens: self.opens,
                count: self.children.len(),
            });
        }
        let child = self.children.remove(0);
        Ok(Trigger {
            opens: self.opens,
            child,
            coordinator: None,
        })
    }
}

/// An open binding from one interactive child to one dialog name
pub struct Trigger {
    opens: String,
    child: PushButton,
    coordinator: Option<OverlayCoordinator>,
}

impl Trigger {
    pub fn builder(opens: impl Into<String>) -> TriggerBuilder {
        TriggerBuilder {
            opens: opens.into(),
            children: Vec::new(),
        }
    }

    pub fn opens(&self) -> &str {
        &self.opens
    }

    /// Inject the coordinator this trigger opens against.
    pub fn bind(&mut self, coordinator: &OverlayCoordinator) {
        self.coordinator = Some(coordinator.clone());
    }

    /// Activate: run the child's own press behavior, then open the
    /// target dialog. Activating an unbound trigger is a configuration
    /// error.
    pub fn activate(&mut self) -> Result<(), OverlayError> {
        let coordinator =
            self.coordinator
                .clone()
                .ok_or_else(|| OverlayError::MissingCoordinator {
                    kind: "trigger",
                    name: self.opens.clone(),
                })?;
        self.child.press();
        coordinator.open(&self.opens);
        Ok(())
    }

    pub fn desired_width(&self) -> u16 {
        self.child.desired_width()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.child.contains(position)
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect) {
        self.child.draw(frame, area);
    }
}
