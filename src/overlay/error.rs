//! Overlay composition errors
//!
//! Everything here is a configuration error detected at setup or render
//! time. The overlay core has no recoverable runtime errors: failures
//! inside dialog content belong to the content and are never interpreted
//! by the coordinator.

use thiserror::Error;

/// Errors raised by misconfigured overlay composition
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OverlayError {
    /// A trigger was activated or a window was drawn/routed without ever
    /// being bound to a coordinator. This aborts the surrounding render
    /// or update instead of degrading into a silent no-op.
    #[error("{kind} '{name}' is not bound to an overlay coordinator")]
    MissingCoordinator {
        /// "trigger" or "window"
        kind: &'static str,
        /// The dialog name the component targets
        name: String,
    },

    /// A trigger builder was given zero or more than one child element.
    /// Binding an activation handler to an arbitrary child would hide the
    /// mistake, so building fails instead.
    #[error("trigger opening '{opens}' requires exactly one child, got {count}")]
    AmbiguousTriggerChild { opens: String, count: usize },
}
