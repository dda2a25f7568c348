//! Payroll generation and history screen.

use eframe::egui::{self, CornerRadius, Margin, RichText, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, CALCULATOR, FILE_XLS, MAGNIFYING_GLASS};

use super::ViewOutcome;
use super::components::{
    back_button, option_combo, panel_header, primary_button_with_icon, record_grid,
    styled_button_with_icon,
};
use crate::flows::{PayrollIntent, PayrollPanel, coerce_deductions};
use crate::models::PayrollRecord;
use crate::notify::Notifier;
use crate::panel::OptionLists;

/// Show the payroll panel.
pub fn show(
    ui: &mut Ui,
    panel: &mut PayrollPanel,
    options: &OptionLists,
    notifier: &mut Notifier,
) -> ViewOutcome<PayrollIntent> {
    let mut outcome = ViewOutcome::default();

    if back_button(ui) {
        outcome.back = true;
    }

    panel_header(ui, "Payroll");

    section(ui, "Generate Payroll", |ui| {
        egui::Grid::new("payroll_generate_grid")
            .num_columns(2)
            .spacing([20.0, 10.0])
            .show(ui, |ui| {
                ui.label("Employee:");
                option_combo(ui, "payroll_employee", &options.employees, &mut panel.employee);
                ui.end_row();

                ui.label("Deductions:");
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut panel.deductions)
                            .desired_width(120.0)
                            .hint_text("0"),
                    );
                    ui.weak(format!("= {}", coerce_deductions(&panel.deductions)));
                });
                ui.end_row();
            });

        ui.add_space(10.0);
        if primary_button_with_icon(ui, CALCULATOR, "Generate").clicked() {
            outcome.push(panel.generate(notifier));
        }
    });

    ui.add_space(15.0);

    section(ui, "View Payroll", |ui| {
        ui.horizontal(|ui| {
            ui.label("Employee:");
            if option_combo(
                ui,
                "payroll_view_employee",
                &options.employees,
                &mut panel.view_employee,
            ) {
                panel.clear_history();
            }

            ui.add_space(10.0);
            if styled_button_with_icon(ui, MAGNIFYING_GLASS, "View").clicked() {
                outcome.push(panel.view(notifier));
            }

            ui.add_space(10.0);
            if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Reload Employees").clicked() {
                outcome.reload_options = true;
            }

            ui.add_space(10.0);
            if styled_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
                outcome.export = true;
            }
        });

        ui.add_space(10.0);
        record_grid::<PayrollRecord>(ui, "payroll_grid", panel.table(), "No payroll records", None);
    });

    outcome
}

/// Framed block with a bold title, as used by every flow screen.
pub(super) fn section(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new(title).strong());
            ui.add_space(10.0);
            add_contents(ui);
        });
}
