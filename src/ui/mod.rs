//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* engine state and turns it into cells on the
//! terminal.  No timing policy lives here beyond sampling the driver.

pub mod animated_list;
pub mod layout;
pub mod list_view;
pub mod theme;
