//! Domain data - records and table state, separate from presentation

pub mod cabin;
pub mod filter;
