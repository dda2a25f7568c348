//! Check-in/check-out screen with per-employee history.

use eframe::egui::Ui;
use egui_phosphor::regular::{
    ARROWS_CLOCKWISE, CLOCK_COUNTER_CLOCKWISE, FILE_XLS, SIGN_IN, SIGN_OUT,
};

use super::ViewOutcome;
use super::components::{
    back_button, option_combo, panel_header, primary_button_with_icon, record_grid,
    styled_button_with_icon,
};
use super::payroll_panel::section;
use crate::flows::{AttendanceIntent, AttendancePanel};
use crate::models::AttendanceRecord;
use crate::notify::Notifier;
use crate::panel::OptionLists;

pub fn show(
    ui: &mut Ui,
    panel: &mut AttendancePanel,
    options: &OptionLists,
    notifier: &mut Notifier,
) -> ViewOutcome<AttendanceIntent> {
    let mut outcome = ViewOutcome::default();

    if back_button(ui) {
        outcome.back = true;
    }

    panel_header(ui, "Attendance");

    section(ui, "Check In / Check Out", |ui| {
        ui.horizontal(|ui| {
            ui.label("Employee:");
            let mut selected = panel.employee;
            if option_combo(ui, "attendance_employee", &options.employees, &mut selected) {
                panel.select(selected);
            }

            ui.add_space(10.0);
            if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Reload Employees").clicked() {
                outcome.reload_options = true;
            }
        });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if primary_button_with_icon(ui, SIGN_IN, "Check In").clicked() {
                outcome.push(panel.check_in(notifier));
            }
            ui.add_space(10.0);
            if primary_button_with_icon(ui, SIGN_OUT, "Check Out").clicked() {
                outcome.push(panel.check_out(notifier));
            }
        });
    });

    ui.add_space(15.0);

    section(ui, "History", |ui| {
        ui.horizontal(|ui| {
            if styled_button_with_icon(ui, CLOCK_COUNTER_CLOCKWISE, "Load History").clicked() {
                outcome.push(panel.load_history(notifier));
            }
            ui.add_space(10.0);
            if styled_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
                outcome.export = true;
            }
        });

        ui.add_space(10.0);
        record_grid::<AttendanceRecord>(
            ui,
            "attendance_grid",
            panel.history(),
            "No attendance loaded",
            None,
        );
    });

    outcome
}
