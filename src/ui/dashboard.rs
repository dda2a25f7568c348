//! Dashboard panel with counters, navigation cards and activity log.

use eframe::egui::{self, Color32, CornerRadius, Margin, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{BRIEFCASE, BUILDINGS, CALENDAR_CHECK, CLOCK, MONEY, USERS};

use super::app::{App, LogLevel, Panel, ServerStatus};
use super::components::{colors, dashboard_card};
use crate::models::LeaveStatus;

/// Show the dashboard panel.
///
/// Returns `Some(panel)` if navigation is requested.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    let mut next_panel = None;

    ui.vertical_centered(|ui| {
        ui.add_space(20.0);

        ui.label(RichText::new("Payroll Console").size(32.0).strong());
        ui.add_space(5.0);
        ui.label(RichText::new("Employees, payroll, attendance and leave").size(14.0).weak());

        ui.add_space(25.0);

        ui.horizontal(|ui| {
            let available = ui.available_width();
            let start_offset = ((available - 680.0) / 2.0).max(0.0);
            ui.add_space(start_offset);

            stat_card(ui, "Employees", &app.employees.rows().len().to_string(), "On record");
            let departments = app.departments.rows().len().to_string();
            stat_card(ui, "Departments", &departments, "Organizational units");
            stat_card(ui, "Positions", &app.positions.rows().len().to_string(), "Pay scales");
            stat_card(ui, "Pending Leave", &pending_leaves(app).to_string(), "Awaiting a decision");
        });

        ui.add_space(25.0);

        let cards = [
            (Panel::Employees, "Employees", "Staff records", USERS),
            (Panel::Departments, "Departments", "Organize staff", BUILDINGS),
            (Panel::Positions, "Positions", "Titles and salaries", BRIEFCASE),
            (Panel::Payroll, "Payroll", "Generate and review", MONEY),
            (Panel::Attendance, "Attendance", "Check in and out", CLOCK),
            (Panel::Leaves, "Leave", "Apply and approve", CALENDAR_CHECK),
        ];

        // Two rows of three
        let available = ui.available_width();
        let per_row = 3.0;
        let spacing = 30.0;
        let total_spacing = spacing * (per_row - 1.0);
        let card_width = ((available - total_spacing) / per_row).clamp(150.0, 230.0);
        let card_size = egui::vec2(card_width, card_width * 0.6);
        let start_offset = ((available - (card_width * per_row + total_spacing)) / 2.0).max(0.0);

        for row in cards.chunks(3) {
            ui.horizontal(|ui| {
                ui.add_space(start_offset);
                for (i, (panel, title, description, icon)) in row.iter().enumerate() {
                    if i > 0 {
                        ui.add_space(spacing);
                    }
                    if dashboard_card(ui, title, description, icon, card_size).clicked() {
                        next_panel = Some(*panel);
                    }
                }
            });
            ui.add_space(spacing / 2.0);
        }

        ui.add_space(10.0);
    });

    let available_width = ui.available_width();
    let column_width = (available_width - 40.0) / 2.0;

    ui.horizontal(|ui| {
        ui.add_space(10.0);

        // Left column - Server
        ui.vertical(|ui| {
            ui.set_width(column_width);

            framed(ui, column_width, |ui| {
                ui.label(RichText::new("Server").strong());
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    ui.label("URL:");
                    ui.label(RichText::new(app.client.base_url()).weak());
                });
                ui.horizontal(|ui| {
                    ui.label("Status:");
                    match &app.server_status {
                        ServerStatus::Unknown => ui.label("Not checked"),
                        ServerStatus::Checking => {
                            ui.label(RichText::new("Checking...").color(colors::INFO))
                        }
                        ServerStatus::Online => {
                            ui.label(RichText::new("Online").color(colors::SUCCESS))
                        }
                        ServerStatus::Offline(e) => ui.label(RichText::new(e).color(colors::ERROR)),
                    };
                });

                ui.add_space(5.0);
                let checking = app.server_status == ServerStatus::Checking;
                ui.add_enabled_ui(!checking, |ui| {
                    if ui.button("Test Connection").clicked() {
                        app.test_connection();
                    }
                });
            });
        });

        ui.add_space(20.0);

        // Right column - Recent Activity
        ui.vertical(|ui| {
            ui.set_width(column_width);

            framed(ui, column_width, |ui| {
                ui.label(RichText::new("Recent Activity").strong());
                ui.add_space(10.0);

                ScrollArea::vertical().max_height(150.0).show(ui, |ui| {
                    if app.log_messages.is_empty() {
                        ui.label(RichText::new("No recent activity").weak());
                    } else {
                        for entry in app.log_messages.iter().rev().take(10) {
                            let color = match entry.level {
                                LogLevel::Info => Color32::GRAY,
                                LogLevel::Success => colors::SUCCESS,
                                LogLevel::Error => colors::ERROR,
                            };

                            ui.horizontal(|ui| {
                                ui.label(
                                    RichText::new(entry.timestamp.format("%H:%M:%S").to_string())
                                        .small()
                                        .color(Color32::DARK_GRAY),
                                );
                                ui.label(RichText::new(&entry.message).color(color));
                            });
                        }
                    }
                });
            });
        });
    });

    next_panel
}

fn framed(ui: &mut Ui, width: f32, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(width - 30.0);
            add_contents(ui);
        });
}

/// Render a stat card with title, value, and subtitle.
fn stat_card(ui: &mut Ui, title: &str, value: &str, subtitle: &str) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::same(5))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(140.0);

            ui.vertical(|ui| {
                ui.label(RichText::new(title).small());
                ui.label(RichText::new(value).heading().strong());
                ui.label(RichText::new(subtitle).small().weak());
            });
        });
}

fn pending_leaves(app: &App) -> usize {
    app.leaves
        .table()
        .rows()
        .iter()
        .filter(|leave| leave.status() == Some(LeaveStatus::Pending))
        .count()
}
