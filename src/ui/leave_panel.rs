//! Leave application form and the approval list.

use eframe::egui::{self, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, CHECK, FILE_XLS, PAPER_PLANE_TILT, X};

use super::ViewOutcome;
use super::components::{
    action_button, back_button, colors, danger_action_button, date_input, option_combo,
    option_combo_text, panel_header, primary_button_with_icon, record_grid, styled_button_with_icon,
};
use super::payroll_panel::section;
use crate::flows::leave::LOAD_ERROR_ROW;
use crate::flows::{LeaveIntent, LeavePanel};
use crate::models::{Leave, LeaveStatus};
use crate::notify::Notifier;
use crate::panel::OptionLists;

pub fn show(
    ui: &mut Ui,
    panel: &mut LeavePanel,
    options: &OptionLists,
    notifier: &mut Notifier,
) -> ViewOutcome<LeaveIntent> {
    let mut outcome = ViewOutcome::default();

    if back_button(ui) {
        outcome.back = true;
    }

    panel_header(ui, "Leave Requests");

    section(ui, "Apply for Leave", |ui| {
        egui::Grid::new("leave_apply_grid")
            .num_columns(2)
            .spacing([20.0, 10.0])
            .show(ui, |ui| {
                let form = panel.form_mut();

                ui.label("Employee: *");
                if let Some(employee) = form.value_mut("employeeId") {
                    option_combo_text(ui, "leave_employee", &options.employees, employee);
                }
                ui.end_row();

                ui.label("Start Date: *");
                if let Some(start) = form.value_mut("startDate") {
                    date_input(ui, "leave_start", start);
                }
                ui.end_row();

                ui.label("End Date: *");
                if let Some(end) = form.value_mut("endDate") {
                    date_input(ui, "leave_end", end);
                }
                ui.end_row();

                ui.label("Reason:");
                if let Some(reason) = form.value_mut("reason") {
                    ui.add(egui::TextEdit::multiline(reason).desired_width(300.0).desired_rows(3));
                }
                ui.end_row();
            });

        ui.add_space(10.0);
        if primary_button_with_icon(ui, PAPER_PLANE_TILT, "Apply").clicked() {
            outcome.push(panel.apply(notifier));
        }
    });

    ui.add_space(15.0);

    section(ui, "All Requests", |ui| {
        ui.horizontal(|ui| {
            ui.label("Employee:");
            if option_combo(ui, "leave_filter", &options.employees, &mut panel.filter) {
                outcome.push(Some(panel.load()));
            }

            ui.add_space(10.0);
            if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
                outcome.push(Some(panel.load()));
                outcome.reload_options = true;
            }

            ui.add_space(10.0);
            if styled_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
                outcome.export = true;
            }
        });

        ui.add_space(10.0);

        if let Some(error) = panel.table().error() {
            ui.colored_label(colors::ERROR, LOAD_ERROR_ROW);
            ui.weak(error);
            return;
        }

        let mut update = None;
        record_grid(
            ui,
            "leave_grid",
            panel.table(),
            "No leave requests",
            Some(&mut |ui: &mut Ui, leave: &Leave| {
                if action_button(ui, CHECK, "Approve").clicked() {
                    update = Some((leave.leave_id, LeaveStatus::Approved));
                }
                ui.add_space(4.0);
                if danger_action_button(ui, X, "Reject").clicked() {
                    update = Some((leave.leave_id, LeaveStatus::Rejected));
                }
            }),
        );

        if let Some((id, status)) = update {
            outcome.push(Some(panel.update_status(id, status)));
        }
    });

    outcome
}
