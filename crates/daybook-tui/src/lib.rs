//! Terminal front end for the daybook journal.
//!
//! The controller in [`ui::App`] never touches the disk: key handling and store
//! results both return [`daybook_core::worker::StoreCommand`]s, which
//! [`runtime::run_app`] forwards to the core's store worker.

pub mod input;
pub mod render;
pub mod runtime;
pub mod ui;
