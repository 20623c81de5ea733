//! Overlay coordinator - sole owner of the active dialog name
//!
//! One coordinator multiplexes any number of named dialogs so that at
//! most one is visible at a time. The active name is the only shared
//! mutable value in the overlay core: an empty string means "no dialog
//! open", and the value is never absent, so consumers can always read it.
//! Mutation goes exclusively through [`open`](OverlayCoordinator::open),
//! [`close`](OverlayCoordinator::close) and [`CloseHandle::close`].
//!
//! The coordinator is shared by cloneable handle and injected into
//! triggers and window renderers at bind time; there is no ambient
//! broadcast. Every state change synchronously re-evaluates the bound
//! windows: the one matching the new name mounts, any previously mounted
//! one unmounts.

use super::window::{WeakWindow, WindowRenderer};
use std::cell::RefCell;
use std::rc::Rc;

pub(crate) struct CoordinatorInner {
    active_name: String,
    windows: Vec<WeakWindow>,
}

/// Shared handle to one overlay state machine
///
/// Cloning shares the same state; all triggers and windows bound to
/// clones of one coordinator observe the same active name.
#[derive(Clone)]
pub struct OverlayCoordinator {
    inner: Rc<RefCell<CoordinatorInner>>,
}

impl Default for OverlayCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayCoordinator {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(CoordinatorInner {
                active_name: String::new(),
                windows: Vec::new(),
            })),
        }
    }

    /// The currently active dialog name; empty when no dialog is open.
    pub fn active_name(&self) -> String {
        self.inner.borrow().active_name.clone()
    }

    /// Whether any dialog is open.
    pub fn is_open(&self) -> bool {
        !self.inner.borrow().active_name.is_empty()
    }

    /// Make `name` the active dialog.
    ///
    /// Unconditional: calling this while a different dialog is open
    /// switches directly, with no intermediate closed state. Calling it
    /// with the current value is a no-op. Any non-empty string is
    /// accepted; no validation happens here.
    pub fn open(&self, name: &str) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.active_name == name {
                return;
            }
            inner.active_name.clear();
            inner.active_name.push_str(name);
        }
        tracing::debug!(name, "overlay opened");
        self.sync_windows();
    }

    /// Close whatever dialog is open. Idempotent.
    pub fn close(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.active_name.is_empty() {
                return;
            }
            inner.active_name.clear();
        }
        tracing::debug!("overlay closed");
        self.sync_windows();
    }

    /// A cheap handle that can close this coordinator's active dialog.
    ///
    /// Handed to dialog contents and dismiss listeners so they can
    /// self-dismiss without owning the coordinator.
    pub fn close_handle(&self) -> CloseHandle {
        CloseHandle {
            coordinator: self.clone(),
        }
    }

    /// The window currently mounted under the active name, if any.
    pub fn active_window(&self) -> Option<WindowRenderer> {
        if !self.is_open() {
            return None;
        }
        let windows: Vec<WindowRenderer> = self
            .inner
            .borrow()
            .windows
            .iter()
            .filter_map(WeakWindow::upgrade)
            .collect();
        windows.into_iter().find(WindowRenderer::is_mounted)
    }

    pub(crate) fn register(&self, window: &WindowRenderer) {
        let name = window.name();
        {
            let inner = self.inner.borrow();
            let duplicate = inner
                .windows
                .iter()
                .filter_map(WeakWindow::upgrade)
                .any(|existing| existing.name() == name);
            if duplicate {
                tracing::warn!(name, "duplicate window registration; earliest bound wins");
            }
        }
        self.inner.borrow_mut().windows.push(window.downgrade());
    }

    /// Re-evaluate every bound window against the active name.
    ///
    /// Registration order decides ties: the earliest bound window
    /// matching the active name mounts, every other window unmounts.
    /// At most one window is ever mounted.
    pub(crate) fn sync_windows(&self) {
        let active = self.active_name();
        let windows: Vec<WindowRenderer> = {
            let mut inner = self.inner.borrow_mut();
            inner.windows.retain(|weak| weak.upgrade().is_some());
            inner.windows.iter().filter_map(WeakWindow::upgrade).collect()
        };
        let mut claimed = false;
        for window in windows {
            let matches = !active.is_empty() && window.name() == active;
            if matches && !claimed {
                claimed = true;
                window.mount();
            } else {
                window.unmount();
            }
        }
    }
}

/// Close capability detached from the coordinator's full interface
#[derive(Clone)]
pub struct CloseHandle {
    coordinator: OverlayCoordinator,
}

impl CloseHandle {
    /// Close the active dialog, whatever it is.
    pub fn close(&self) {
        self.coordinator.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_name_follows_most_recent_open() {
        let coordinator = OverlayCoordinator::new();
        assert_eq!(coordinator.active_name(), "");
        assert!(!coordinator.is_open());

        coordinator.open("edit");
        assert_eq!(coordinator.active_name(), "edit");
        assert!(coordinator.is_open());

        coordinator.open("delete");
        assert_eq!(coordinator.active_name(), "delete");

        coordinator.close();
        assert_eq!(coordinator.active_name(), "");
        assert!(!coordinator.is_open());
    }

    #[test]
    fn test_open_and_close_are_idempotent() {
        let coordinator = OverlayCoordinator::new();
        coordinator.close();
        assert_eq!(coordinator.active_name(), "");

        coordinator.open("help");
        coordinator.open("help");
        assert_eq!(coordinator.active_name(), "help");

        coordinator.close();
        coordinator.close();
        assert_eq!(coordinator.active_name(), "");
    }

    #[test]
    fn test_clones_share_state() {
        let coordinator = OverlayCoordinator::new();
        let other = coordinator.clone();

        coordinator.open("edit");
        assert_eq!(other.active_name(), "edit");

        other.close();
        assert_eq!(coordinator.active_name(), "");
    }

    #[test]
    fn test_close_handle_closes() {
        let coordinator = OverlayCoordinator::new();
        let handle = coordinator.close_handle();

        coordinator.open("edit");
        handle.close();
        assert_eq!(coordinator.active_name(), "");

        // Closing with nothing open stays closed.
        handle.close();
        assert_eq!(coordinator.active_name(), "");
    }
}
