//! Outside-interaction detection
//!
//! Reusable dismiss primitive: a root listener that invokes a handler
//! exactly when a pointer event originates outside a protected screen
//! region. Window renderers arm one of these while mounted so that a
//! click anywhere else dismisses the dialog; clicks on the dialog itself
//! never do.

use super::surface::{InteractionSurface, ListenerGuard, Phase, PointerEvent};
use ratatui::layout::Rect;
use std::cell::Cell;
use std::rc::Rc;

/// Attachment handle for an outside-interaction listener
///
/// The listener is registered for as long as this handle lives; dropping
/// it deregisters the listener. The caller binds the protected region
/// with [`protect`](Self::protect) once layout is known, typically at
/// every draw. Until then the region contains nothing, so any origin
/// counts as outside.
pub struct OutsideInteraction {
    region: Rc<Cell<Option<Rect>>>,
    _listener: ListenerGuard,
}

impl OutsideInteraction {
    /// Attach with the capturing pass.
    ///
    /// Capturing is the deliberate default: its pass has already finished
    /// by the time a target handler mounts a dialog, so the interaction
    /// that opened the dialog can never be re-read as an outside
    /// interaction that closes it.
    pub fn attach<F>(surface: &InteractionSurface, handler: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self::attach_with_phase(surface, Phase::Capture, handler)
    }

    /// Attach observing an explicit pass.
    ///
    /// A bubbling-pass listener observes the tail of the event that
    /// attached it; choose it only when that is wanted.
    pub fn attach_with_phase<F>(surface: &InteractionSurface, phase: Phase, mut handler: F) -> Self
    where
        F: FnMut() + 'static,
    {
        let region = Rc::new(Cell::new(None));
        let protected = Rc::clone(&region);
        let listener = surface.listen(phase, move |event: &PointerEvent| {
            let inside = protected
                .get()
                .is_some_and(|rect: Rect| rect.contains(event.position));
            if !inside {
                handler();
            }
        });
        Self {
            region,
            _listener: listener,
        }
    }

    /// Bind the region the listener must not fire within.
    pub fn protect(&self, region: Rect) {
        self.region.set(Some(region));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(surface: &InteractionSurface) -> (OutsideInteraction, Rc<Cell<usize>>) {
        let fired = Rc::new(Cell::new(0));
        let count = Rc::clone(&fired);
        let outside = OutsideInteraction::attach(surface, move || count.set(count.get() + 1));
        (outside, fired)
    }

    #[test]
    fn test_inside_never_fires_outside_fires_once() {
        let surface = InteractionSurface::new();
        let (outside, fired) = counting(&surface);
        outside.protect(Rect::new(10, 5, 20, 10));

        surface.dispatch(&PointerEvent::new(15, 8), |_| {});
        assert_eq!(fired.get(), 0);

        surface.dispatch(&PointerEvent::new(2, 2), |_| {});
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_region_edges_count_as_inside() {
        let surface = InteractionSurface::new();
        let (outside, fired) = counting(&surface);
        outside.protect(Rect::new(10, 5, 20, 10));

        // Top-left corner and bottom-right interior cell.
        surface.dispatch(&PointerEvent::new(10, 5), |_| {});
        surface.dispatch(&PointerEvent::new(29, 14), |_| {});
        assert_eq!(fired.get(), 0);

        // One past the right edge.
        surface.dispatch(&PointerEvent::new(30, 14), |_| {});
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_unbound_region_treats_everything_as_outside() {
        let surface = InteractionSurface::new();
        let (_outside, fired) = counting(&surface);

        surface.dispatch(&PointerEvent::new(0, 0), |_| {});
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_drop_detaches_listener() {
        let surface = InteractionSurface::new();
        let (outside, fired) = counting(&surface);
        outside.protect(Rect::new(0, 0, 1, 1));

        drop(outside);
        assert_eq!(surface.listener_count(), 0);
        surface.dispatch(&PointerEvent::new(50, 50), |_| {});
        assert_eq!(fired.get(), 0);
    }
}
