//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next cabin in the table
    NextItem,
    /// Move to previous cabin in the table
    PrevItem,
    /// Jump to first cabin
    FirstItem,
    /// Jump to last cabin
    LastItem,
    /// Select the cabin on a clicked row
    SelectRow(usize),

    // ─────────────────────────────────────────────────────────────────────────
    // Dialogs
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the create-cabin dialog
    OpenCreate,
    /// Open the edit dialog for the selected cabin
    OpenEdit,
    /// Open the delete confirmation for the selected cabin
    OpenDelete,
    /// Open the keyboard help dialog
    OpenHelp,
    /// Open the quit confirmation dialog
    OpenQuitConfirm,

    // ─────────────────────────────────────────────────────────────────────────
    // Filter & Search
    // ─────────────────────────────────────────────────────────────────────────
    /// Cycle the discount filter to its next option
    CycleFilter,
    /// Set the discount filter directly (toolbar click)
    SetFilter(crate::model::filter::DiscountFilter),
    /// Enter name search mode
    EnterSearchMode,
    /// Exit name search mode
    ExitSearchMode,
    /// Add character to the search query
    SearchInput(char),
    /// Remove last character from the search query
    SearchBackspace,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::SelectRow(row) => write!(f, "SelectRow({})", row),
            Action::OpenCreate => write!(f, "OpenCreate"),
            Action::OpenEdit => write!(f, "OpenEdit"),
            Action::OpenDelete => write!(f, "OpenDelete"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenQuitConfirm => write!(f, "OpenQuitConfirm"),
            Action::CycleFilter => write!(f, "CycleFilter"),
            Action::SetFilter(filter) => write!(f, "SetFilter({})", filter.label()),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
        }
    }
}
