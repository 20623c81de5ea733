//! Overlay coordination for modal dialogs
//!
//! A single coordinator multiplexes any number of named dialog contents
//! so that at most one is visible at a time; triggers open a dialog by
//! name, a root anchor renders the active dialog over the whole frame,
//! and an outside interaction or explicit close dismisses it.
//!
//! Composition is explicit: the coordinator is a cloneable state handle
//! injected into triggers and windows at bind time, contents receive
//! their close capability as a method argument, and pointer events flow
//! through one dispatch root whose capture/target/bubble ordering is
//! part of the contract (see [`surface`]).
//!
//! ```text
//! Trigger::activate ──▶ OverlayCoordinator::open(name)
//!                               │ synchronous re-evaluation
//!                               ▼
//!              WindowRenderer(name) mounts, others unmount
//!                               │
//!              OutsideInteraction / chrome / content ──▶ close()
//! ```

pub mod coordinator;
pub mod error;
pub mod outside;
pub mod surface;
pub mod trigger;
pub mod window;

pub use coordinator::{CloseHandle, OverlayCoordinator};
pub use error::OverlayError;
pub use outside::OutsideInteraction;
pub use surface::{InteractionSurface, ListenerGuard, Phase, PointerEvent};
pub use trigger::{PushButton, Trigger, TriggerBuilder};
pub use window::{OverlayAnchor, WindowContent, WindowRenderer};
