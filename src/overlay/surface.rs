//! Interaction surface - pointer event dispatch root
//!
//! All pointer events enter the application through a single dispatch
//! root, the analog of a document root. Dispatching an event runs three
//! passes in order: root listeners registered for the capturing pass,
//! then the target's own handler, then root listeners registered for the
//! bubbling pass.
//!
//! Each pass reads the listener registry when the pass starts. A listener
//! attached by the target handler is therefore observed by the same
//! event's bubbling pass but never by its already-finished capturing
//! pass. Outside-dismiss listeners rely on that ordering to avoid closing
//! a dialog with the very interaction that opened it.

use ratatui::layout::Position;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Which dispatch pass a root listener observes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the target's own handler runs
    Capture,
    /// After the target's own handler runs
    Bubble,
}

/// A pointer interaction, positioned in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// Cell the interaction originated in
    pub position: Position,
}

impl PointerEvent {
    pub fn new(x: u16, y: u16) -> Self {
        Self {
            position: Position::new(x, y),
        }
    }
}

type ListenerFn = dyn FnMut(&PointerEvent);

struct ListenerEntry {
    id: u64,
    phase: Phase,
    callback: Rc<RefCell<ListenerFn>>,
}

#[derive(Default)]
struct SurfaceInner {
    listeners: Vec<ListenerEntry>,
    next_id: u64,
}

/// Shared handle to the dispatch root
///
/// Cloning shares the same registry. The surface is owned by the
/// application root; components hold clones and register listeners
/// against it.
#[derive(Clone, Default)]
pub struct InteractionSurface {
    inner: Rc<RefCell<SurfaceInner>>,
}

impl InteractionSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a root listener for the given pass.
    ///
    /// The listener stays registered for the lifetime of the returned
    /// guard; dropping the guard deregisters it. No listener outlives
    /// its owner.
    pub fn listen<F>(&self, phase: Phase, callback: F) -> ListenerGuard
    where
        F: FnMut(&PointerEvent) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push(ListenerEntry {
            id,
            phase,
            callback: Rc::new(RefCell::new(callback)),
        });
        ListenerGuard {
            surface: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Number of currently registered root listeners
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Dispatch one pointer event: capturing pass, target, bubbling pass.
    ///
    /// The target closure stands in for the handler of whatever element
    /// the event originated on; the caller resolves it by hit test before
    /// dispatching, and it runs exactly once.
    pub fn dispatch<F>(&self, event: &PointerEvent, target: F)
    where
        F: FnOnce(&PointerEvent),
    {
        self.run_pass(Phase::Capture, event);
        target(event);
        self.run_pass(Phase::Bubble, event);
    }

    fn run_pass(&self, phase: Phase, event: &PointerEvent) {
        // Snapshot the pass membership up front, then re-check each entry
        // right before invoking it so a listener removed earlier in the
        // same pass is skipped.
        let pass: Vec<(u64, Rc<RefCell<ListenerFn>>)> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|entry| entry.phase == phase)
            .map(|entry| (entry.id, Rc::clone(&entry.callback)))
            .collect();

        for (id, callback) in pass {
            let registered = self
                .inner
                .borrow()
                .listeners
                .iter()
                .any(|entry| entry.id == id);
            if registered {
                (&mut *callback.borrow_mut())(event);
            }
        }
    }
}

/// Deregisters its listener when dropped
pub struct ListenerGuard {
    surface: Weak<RefCell<SurfaceInner>>,
    id: u64,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(inner) = self.surface.upgrade() {
            inner.borrow_mut().listeners.retain(|entry| entry.id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_dispatch_order_capture_target_bubble() {
        let surface = InteractionSurface::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&order);
        let _bubble = surface.listen(Phase::Bubble, move |_| log.borrow_mut().push("bubble"));
        let log = Rc::clone(&order);
        let _capture = surface.listen(Phase::Capture, move |_| log.borrow_mut().push("capture"));

        let log = Rc::clone(&order);
        surface.dispatch(&PointerEvent::new(0, 0), |_| log.borrow_mut().push("target"));

        assert_eq!(*order.borrow(), vec!["capture", "target", "bubble"]);
    }

    #[test]
    fn test_listener_attached_during_target_misses_capture_pass() {
        let surface = InteractionSurface::new();
        let fired = Rc::new(Cell::new(0));

        let late_guard: Rc<RefCell<Option<ListenerGuard>>> = Rc::new(RefCell::new(None));
        let surface_handle = surface.clone();
        let count = Rc::clone(&fired);
        let slot = Rc::clone(&late_guard);
        surface.dispatch(&PointerEvent::new(0, 0), move |_| {
            let count = Rc::clone(&count);
            let guard = surface_handle.listen(Phase::Capture, move |_| count.set(count.get() + 1));
            *slot.borrow_mut() = Some(guard);
        });

        // The capture pass finished before the target attached.
        assert_eq!(fired.get(), 0);

        // Subsequent events do reach it.
        surface.dispatch(&PointerEvent::new(0, 0), |_| {});
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_listener_attached_during_target_sees_bubble_pass() {
        let surface = InteractionSurface::new();
        let fired = Rc::new(Cell::new(0));

        let late_guard: Rc<RefCell<Option<ListenerGuard>>> = Rc::new(RefCell::new(None));
        let surface_handle = surface.clone();
        let count = Rc::clone(&fired);
        let slot = Rc::clone(&late_guard);
        surface.dispatch(&PointerEvent::new(0, 0), move |_| {
            let count = Rc::clone(&count);
            let guard = surface_handle.listen(Phase::Bubble, move |_| count.set(count.get() + 1));
            *slot.borrow_mut() = Some(guard);
        });

        // The bubble pass starts after the target, so the fresh listener
        // observes the in-flight event.
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_dropping_guard_deregisters() {
        let surface = InteractionSurface::new();
        let fired = Rc::new(Cell::new(0));

        let count = Rc::clone(&fired);
        let guard = surface.listen(Phase::Capture, move |_| count.set(count.get() + 1));
        surface.dispatch(&PointerEvent::new(0, 0), |_| {});
        assert_eq!(fired.get(), 1);
        assert_eq!(surface.listener_count(), 1);

        drop(guard);
        assert_eq!(surface.listener_count(), 0);
        surface.dispatch(&PointerEvent::new(0, 0), |_| {});
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_listener_removed_mid_pass_is_skipped() {
        let surface = InteractionSurface::new();
        let fired = Rc::new(Cell::new(0));

        // First listener drops the second listener's guard.
        let second_guard: Rc<RefCell<Option<ListenerGuard>>> = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&second_guard);
        let _first = surface.listen(Phase::Capture, move |_| {
            slot.borrow_mut().take();
        });
        let count = Rc::clone(&fired);
        let second = surface.listen(Phase::Capture, move |_| count.set(count.get() + 1));
        *second_guard.borrow_mut() = Some(second);

        surface.dispatch(&PointerEvent::new(0, 0), |_| {});
        assert_eq!(fired.get(), 0);
    }
}
