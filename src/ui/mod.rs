//! GUI panels and application state.

pub mod app;
pub mod attendance_panel;
pub mod components;
pub mod crud_view;
pub mod dashboard;
pub mod leave_panel;
pub mod payroll_panel;
pub mod setup_wizard;

pub use app::App;
pub use setup_wizard::{SetupApp, SetupWizard};

use crate::panel::Call;

/// What a screen asked for during one frame.
pub struct ViewOutcome<I> {
    pub calls: Vec<Call<I>>,
    /// Return to the dashboard.
    pub back: bool,
    /// Export the screen's table.
    pub export: bool,
    /// Re-read the dropdown options the screen uses.
    pub reload_options: bool,
}

impl<I> Default for ViewOutcome<I> {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            back: false,
            export: false,
            reload_options: false,
        }
    }
}

impl<I> ViewOutcome<I> {
    pub fn push(&mut self, call: Option<Call<I>>) {
        self.calls.extend(call);
    }
}
