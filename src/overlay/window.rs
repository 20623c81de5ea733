//! Window renderers and the root render anchor
//!
//! A window renderer pairs a dialog name with its content. While the
//! coordinator's active name differs from the renderer's name, the
//! renderer is idle: nothing is drawn, no listener is attached, nothing
//! costs anything. When the names match the renderer is *mounted*: an
//! outside-interaction listener is armed with the close handle, the
//! content's mount hook runs, and at draw time the root anchor renders a
//! backdrop plus a centered content container over the whole frame.
//!
//! Mounting and unmounting happen synchronously inside `open`/`close`,
//! not at draw time. A renderer that loses the active name is simply
//! unmounted; it is not told whether it was closed or superseded by
//! another dialog.

use super::coordinator::{CloseHandle, OverlayCoordinator};
use super::error::OverlayError;
use super::outside::OutsideInteraction;
use super::surface::{InteractionSurface, Phase, PointerEvent};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear},
    Frame,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Default content container size, in cells
const DEFAULT_SIZE: (u16, u16) = (60, 16);

/// What a window renderer mounts: the dialog's behavior and drawing.
///
/// Contents receive an explicit [`CloseHandle`] rather than having a
/// callback injected into them, so self-dismissal (say, after a
/// successful submit) is an ordinary method argument.
pub trait WindowContent {
    /// Called when the renderer mounts, before anything is drawn. Load
    /// whatever state the dialog session needs here.
    fn on_mount(&mut self) {}

    /// Draw the dialog body into the content container.
    fn draw(&mut self, frame: &mut Frame, area: Rect, close: &CloseHandle) -> Result<()>;

    /// Key event routed to the mounted dialog. Esc never reaches this;
    /// the chrome consumes it first.
    fn handle_key_event(&mut self, _key: KeyEvent, _close: &CloseHandle) -> Result<()> {
        Ok(())
    }

    /// Pointer event originating inside the content container.
    fn handle_pointer(&mut self, _event: &PointerEvent, _close: &CloseHandle) -> Result<()> {
        Ok(())
    }
}

struct Binding {
    surface: InteractionSurface,
    close: CloseHandle,
}

struct Mounted {
    outside: OutsideInteraction,
    frame_region: Option<Rect>,
    close_region: Option<Rect>,
}

struct WindowInner {
    name: String,
    title: String,
    size: (u16, u16),
    phase: Phase,
    binding: Option<Binding>,
    mounted: Option<Mounted>,
}

/// One named dialog registration
///
/// Cloning shares the same renderer. Construct unbound, configure, then
/// [`bind`](Self::bind) to a coordinator and surface; using an unbound
/// renderer is a configuration error, never a silent no-op.
#[derive(Clone)]
pub struct WindowRenderer {
    inner: Rc<RefCell<WindowInner>>,
    content: Rc<RefCell<Box<dyn WindowContent>>>,
}

impl WindowRenderer {
    pub fn new(name: impl Into<String>, content: Box<dyn WindowContent>) -> Self {
        let name = name.into();
        Self {
            inner: Rc::new(RefCell::new(WindowInner {
                title: name.clone(),
                name,
                size: DEFAULT_SIZE,
                phase: Phase::Capture,
                binding: None,
                mounted: None,
            })),
            content: Rc::new(RefCell::new(content)),
        }
    }

    /// Chrome title; defaults to the dialog name.
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.inner.borrow_mut().title = title.into();
        self
    }

    /// Content container size in cells (clamped to the frame at draw).
    pub fn with_size(self, width: u16, height: u16) -> Self {
        self.inner.borrow_mut().size = (width, height);
        self
    }

    /// Which dispatch pass the dismiss listener observes. Capturing by
    /// default; see [`OutsideInteraction::attach`].
    pub fn with_phase(self, phase: Phase) -> Self {
        self.inner.borrow_mut().phase = phase;
        self
    }

    /// Inject the coordinator and dispatch root this renderer serves.
    pub fn bind(&self, coordinator: &OverlayCoordinator, surface: &InteractionSurface) {
        self.inner.borrow_mut().binding = Some(Binding {
            surface: surface.clone(),
            close: coordinator.close_handle(),
        });
        coordinator.register(self);
        // The name may already be active at bind time.
        coordinator.sync_windows();
    }

    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.borrow().mounted.is_some()
    }

    /// Whether a pointer position falls inside the drawn dialog (chrome
    /// included). Meaningful after the first mounted draw.
    pub fn contains(&self, position: Position) -> bool {
        self.inner
            .borrow()
            .mounted
            .as_ref()
            .and_then(|mounted| mounted.frame_region)
            .is_some_and(|region| region.contains(position))
    }

    pub(crate) fn mount(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.mounted.is_some() {
                return;
            }
            let Some(binding) = inner.binding.as_ref() else {
                return;
            };
            let close = binding.close.clone();
            let outside =
                OutsideInteraction::attach_with_phase(&binding.surface, inner.phase, move || {
                    close.close()
                });
            tracing::debug!(name = %inner.name, "window mounted");
            inner.mounted = Some(Mounted {
                outside,
                frame_region: None,
                close_region: None,
            });
        }
        // Content borrow happens outside the inner borrow: the hook may
        // open another dialog, which re-enters sync_windows.
        self.content.borrow_mut().on_mount();
    }

    pub(crate) fn unmount(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.mounted.take().is_some() {
            tracing::debug!(name = %inner.name, "window unmounted");
        }
    }

    /// Draw the mounted dialog over `area`: backdrop layer, content
    /// container, chrome, then the content itself. Rebinds the protected
    /// region and the close affordance to the laid-out rectangles.
    pub fn draw(&self, frame: &mut Frame, area: Rect) -> Result<()> {
        let (title, size, close) = {
            let inner = self.inner.borrow();
            if inner.mounted.is_none() {
                return Ok(());
            }
            let binding = inner.binding.as_ref().ok_or_else(|| {
                OverlayError::MissingCoordinator {
                    kind: "window",
                    name: inner.name.clone(),
                }
            })?;
            (inner.title.clone(), inner.size, binding.close.clone())
        };

        // Backdrop layer: dims the whole frame behind the dialog.
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().fg(Color::DarkGray)),
            area,
        );

        let container = centered_region(area, size.0, size.1);
        frame.render_widget(Clear, container);

        let close_label = " Esc ✕ ";
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", title))
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .title_top(
                Line::from(close_label)
                    .right_aligned()
                    .style(Style::default().fg(Color::Yellow)),
            );
        let body = block.inner(container);
        frame.render_widget(block, container);

        // Clickable close affordance: the labelled stretch of the top
        // border, flush right next to the corner.
        let label_width = (close_label.chars().count() as u16).min(container.width);
        let close_region = Rect::new(
            container
                .right()
                .saturating_sub(1)
                .saturating_sub(label_width),
            container.y,
            label_width,
            1,
        );

        {
            let mut inner = self.inner.borrow_mut();
            if let Some(mounted) = inner.mounted.as_mut() {
                mounted.outside.protect(container);
                mounted.frame_region = Some(container);
                mounted.close_region = Some(close_region);
            }
        }

        self.content.borrow_mut().draw(frame, body, &close)
    }

    /// Route a key event: Esc closes, anything else goes to the content.
    pub fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        let close = self.close_handle()?;
        if key.code == KeyCode::Esc {
            close.close();
            return Ok(());
        }
        self.content.borrow_mut().handle_key_event(key, &close)
    }

    /// Route a pointer event that originated inside the dialog: the
    /// close affordance closes, anything else goes to the content.
    pub fn handle_pointer(&self, event: &PointerEvent) -> Result<()> {
        let close = self.close_handle()?;
        let on_close = self
            .inner
            .borrow()
            .mounted
            .as_ref()
            .and_then(|mounted| mounted.close_region)
            .is_some_and(|region| region.contains(event.position));
        if on_close {
            close.close();
            return Ok(());
        }
        self.content.borrow_mut().handle_pointer(event, &close)
    }

    fn close_handle(&self) -> Result<CloseHandle, OverlayError> {
        let inner = self.inner.borrow();
        inner
            .binding
            .as_ref()
            .map(|binding| binding.close.clone())
            .ok_or_else(|| OverlayError::MissingCoordinator {
                kind: "window",
                name: inner.name.clone(),
            })
    }

    pub(crate) fn downgrade(&self) -> WeakWindow {
        WeakWindow {
            inner: Rc::downgrade(&self.inner),
            content: Rc::downgrade(&self.content),
        }
    }
}

pub(crate) struct WeakWindow {
    inner: Weak<RefCell<WindowInner>>,
    content: Weak<RefCell<Box<dyn WindowContent>>>,
}

impl WeakWindow {
    pub(crate) fn upgrade(&self) -> Option<WindowRenderer> {
        Some(WindowRenderer {
            inner: self.inner.upgrade()?,
            content: self.content.upgrade()?,
        })
    }
}

/// Stable top-level render anchor
///
/// Owned by the application root and drawn after everything else, so the
/// mounted dialog always lands on top of the full frame no matter where
/// its renderer was declared; ancestor layout never clips it.
pub struct OverlayAnchor {
    coordinator: OverlayCoordinator,
}

impl OverlayAnchor {
    pub fn new(coordinator: &OverlayCoordinator) -> Self {
        Self {
            coordinator: coordinator.clone(),
        }
    }

    pub fn draw(&self, frame: &mut Frame) -> Result<()> {
        if let Some(window) = self.coordinator.active_window() {
            let area = frame.area();
            window.draw(frame, area)?;
        }
        Ok(())
    }
}

fn centered_region(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::trigger::{PushButton, Trigger};
    use ratatui::{backend::TestBackend, Terminal};
    use std::cell::Cell;

    struct NullContent;

    impl WindowContent for NullContent {
        fn draw(&mut self, _frame: &mut Frame, _area: Rect, _close: &CloseHandle) -> Result<()> {
            Ok(())
        }
    }

    struct ClosingContent;

    impl WindowContent for ClosingContent {
        fn draw(&mut self, _frame: &mut Frame, _area: Rect, _close: &CloseHandle) -> Result<()> {
            Ok(())
        }

        fn handle_key_event(&mut self, key: KeyEvent, close: &CloseHandle) -> Result<()> {
            if key.code == KeyCode::Enter {
                close.close();
            }
            Ok(())
        }
    }

    struct MountCounting {
        mounts: Rc<Cell<usize>>,
    }

    impl WindowContent for MountCounting {
        fn on_mount(&mut self) {
            self.mounts.set(self.mounts.get() + 1);
        }

        fn draw(&mut self, _frame: &mut Frame, _area: Rect, _close: &CloseHandle) -> Result<()> {
            Ok(())
        }
    }

    fn bound_window(
        name: &str,
        coordinator: &OverlayCoordinator,
        surface: &InteractionSurface,
    ) -> WindowRenderer {
        let window = WindowRenderer::new(name, Box::new(NullContent));
        window.bind(coordinator, surface);
        window
    }

    fn mounted_count(windows: &[WindowRenderer]) -> usize {
        windows.iter().filter(|w| w.is_mounted()).count()
    }

    #[test]
    fn test_only_matching_window_mounts() {
        let coordinator = OverlayCoordinator::new();
        let surface = InteractionSurface::new();
        let edit = bound_window("edit", &coordinator, &surface);
        let delete = bound_window("delete", &coordinator, &surface);

        assert_eq!(mounted_count(&[edit.clone(), delete.clone()]), 0);

        coordinator.open("edit");
        assert!(edit.is_mounted());
        assert!(!delete.is_mounted());
        assert_eq!(surface.listener_count(), 1);
    }

    #[test]
    fn test_direct_switch_swaps_mounted_window() {
        let coordinator = OverlayCoordinator::new();
        let surface = InteractionSurface::new();
        let edit = bound_window("edit", &coordinator, &surface);
        let delete = bound_window("delete", &coordinator, &surface);

        coordinator.open("edit");
        coordinator.open("delete");

        assert!(!edit.is_mounted());
        assert!(delete.is_mounted());
        assert_eq!(coordinator.active_name(), "delete");
        assert_eq!(mounted_count(&[edit.clone(), delete.clone()]), 1);
        assert_eq!(surface.listener_count(), 1);
    }

    #[test]
    fn test_close_unmounts_and_detaches_listener() {
        let coordinator = OverlayCoordinator::new();
        let surface = InteractionSurface::new();
        let edit = bound_window("edit", &coordinator, &surface);

        coordinator.open("edit");
        assert_eq!(surface.listener_count(), 1);

        coordinator.close();
        assert!(!edit.is_mounted());
        assert_eq!(surface.listener_count(), 0);
    }

    #[test]
    fn test_duplicate_names_earliest_bound_wins() {
        let coordinator = OverlayCoordinator::new();
        let surface = InteractionSurface::new();
        let first = bound_window("edit", &coordinator, &surface);
        let second = bound_window("edit", &coordinator, &surface);

        coordinator.open("edit");
        assert!(first.is_mounted());
        assert!(!second.is_mounted());
        assert_eq!(mounted_count(&[first, second]), 1);
    }

    #[test]
    fn test_mount_hook_runs_once_per_mount() {
        let coordinator = OverlayCoordinator::new();
        let surface = InteractionSurface::new();
        let mounts = Rc::new(Cell::new(0));
        let window = WindowRenderer::new(
            "edit",
            Box::new(MountCounting {
                mounts: Rc::clone(&mounts),
            }),
        );
        window.bind(&coordinator, &surface);

        coordinator.open("edit");
        coordinator.open("edit");
        assert_eq!(mounts.get(), 1);

        coordinator.close();
        coordinator.open("edit");
        assert_eq!(mounts.get(), 2);
    }

    #[test]
    fn test_dropping_windows_tears_down_listeners() {
        let coordinator = OverlayCoordinator::new();
        let surface = InteractionSurface::new();
        let edit = bound_window("edit", &coordinator, &surface);

        coordinator.open("edit");
        assert_eq!(surface.listener_count(), 1);

        drop(edit);
        assert_eq!(surface.listener_count(), 0);
        // A further interaction reaches nothing.
        surface.dispatch(&PointerEvent::new(0, 0), |_| {});
        assert_eq!(coordinator.active_name(), "edit");
    }

    #[test]
    fn test_outside_interaction_closes_exactly_once() {
        let coordinator = OverlayCoordinator::new();
        let surface = InteractionSurface::new();
        let edit = bound_window("edit", &coordinator, &surface);

        coordinator.open("edit");
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                OverlayAnchor::new(&coordinator).draw(frame).unwrap();
            })
            .unwrap();

        // Inside the drawn container: stays open.
        surface.dispatch(&PointerEvent::new(40, 12), |_| {});
        assert!(edit.is_mounted());
        assert_eq!(coordinator.active_name(), "edit");

        // Outside: closes and unmounts.
        surface.dispatch(&PointerEvent::new(1, 1), |_| {});
        assert!(!edit.is_mounted());
        assert_eq!(coordinator.active_name(), "");
    }

    #[test]
    fn test_opening_interaction_does_not_dismiss_capture_phase_window() {
        let coordinator = OverlayCoordinator::new();
        let surface = InteractionSurface::new();
        let window = bound_window("edit", &coordinator, &surface);
        let mut trigger = Trigger::builder("edit")
            .child(PushButton::new("Edit"))
            .build()
            .unwrap();
        trigger.bind(&coordinator);

        surface.dispatch(&PointerEvent::new(3, 1), |_| {
            trigger.activate().unwrap();
        });

        assert_eq!(coordinator.active_name(), "edit");
        assert!(window.is_mounted());
    }

    #[test]
    fn test_opening_interaction_dismisses_bubble_phase_window() {
        let coordinator = OverlayCoordinator::new();
        let surface = InteractionSurface::new();
        let window =
            WindowRenderer::new("edit", Box::new(NullContent)).with_phase(Phase::Bubble);
        window.bind(&coordinator, &surface);
        let mut trigger = Trigger::builder("edit")
            .child(PushButton::new("Edit"))
            .build()
            .unwrap();
        trigger.bind(&coordinator);

        // The bubbling pass starts after the target mounted the window,
        // so the fresh listener observes the opening interaction itself.
        surface.dispatch(&PointerEvent::new(3, 1), |_| {
            trigger.activate().unwrap();
        });

        assert_eq!(coordinator.active_name(), "");
        assert!(!window.is_mounted());
    }

    #[test]
    fn test_content_invoked_close_returns_to_closed() {
        let coordinator = OverlayCoordinator::new();
        let surface = InteractionSurface::new();
        let window = WindowRenderer::new("edit", Box::new(ClosingContent));
        window.bind(&coordinator, &surface);

        coordinator.open("edit");
        window.handle_key_event(KeyEvent::from(KeyCode::Enter)).unwrap();
        assert_eq!(coordinator.active_name(), "");
        assert!(!window.is_mounted());
    }

    #[test]
    fn test_esc_closes_via_chrome() {
        let coordinator = OverlayCoordinator::new();
        let surface = InteractionSurface::new();
        let window = bound_window("edit", &coordinator, &surface);

        coordinator.open("edit");
        window.handle_key_event(KeyEvent::from(KeyCode::Esc)).unwrap();
        assert!(!window.is_mounted());
        assert_eq!(coordinator.active_name(), "");
    }

    #[test]
    fn test_unbound_window_fails_loudly() {
        let window = WindowRenderer::new("orphan", Box::new(NullContent));
        let err = window
            .handle_key_event(KeyEvent::from(KeyCode::Enter))
            .unwrap_err();
        assert!(err.to_string().contains("not bound"));
    }

    #[test]
    fn test_idle_window_draws_nothing() {
        let coordinator = OverlayCoordinator::new();
        let surface = InteractionSurface::new();
        let window = bound_window("edit", &coordinator, &surface);

        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                window.draw(frame, frame.area()).unwrap();
            })
            .unwrap();
        // Unmounted draw is a no-op; no region ever becomes protected.
        assert!(!window.contains(Position::new(20, 5)));
    }
}
