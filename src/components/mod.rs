//! UI Components
//!
//! Page-level components consume the overlay core: the toolbar draws the
//! trigger buttons, the table feeds the shared selection, and the dialog
//! contents implement `WindowContent` against the shared store.

use crate::services::CabinStore;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub mod cabin_form;
pub mod cabin_table;
pub mod confirm_delete;
pub mod help_dialog;
pub mod layout;
pub mod quit_confirm;
pub mod toolbar;

pub use cabin_form::{CabinForm, FormMode};
pub use cabin_table::CabinTable;
pub use confirm_delete::ConfirmDelete;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, MainLayout};
pub use quit_confirm::QuitConfirm;
pub use toolbar::Toolbar;

/// Record store shared between the table and the dialog contents
pub type SharedStore = Rc<RefCell<CabinStore>>;
/// Id of the cabin the table cursor rests on
pub type SharedSelection = Rc<Cell<Option<u64>>>;
/// One-line status surfaced in the bottom bar
pub type SharedStatus = Rc<RefCell<Option<String>>>;
