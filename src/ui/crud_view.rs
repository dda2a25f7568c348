//! Table, form window and delete confirmation for any entity panel.

use eframe::egui::{self, Align, Layout, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, FILE_XLS, FLOPPY_DISK, PENCIL, PLUS, TRASH};

use super::ViewOutcome;
use super::components::{
    action_button, back_button, danger_action_button, date_input, option_combo_text, panel_header,
    primary_button_with_icon, record_grid, styled_button, styled_button_with_icon,
};
use crate::notify::Notifier;
use crate::panel::{CrudIntent, CrudPanel, Entity, FieldKind, OptionLists};

/// Show an entity screen.
pub fn show<E: Entity>(
    ui: &mut Ui,
    panel: &mut CrudPanel<E>,
    options: &OptionLists,
    notifier: &mut Notifier,
) -> ViewOutcome<CrudIntent> {
    let mut outcome = ViewOutcome::default();
    let spec = panel.spec();

    if back_button(ui) {
        outcome.back = true;
    }

    panel_header(ui, &format!("Manage {}", spec.plural));

    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, PLUS, &format!("Add {}", spec.singular)).clicked() {
            panel.hide_form();
            panel.show_form();
            outcome.reload_options = true;
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            outcome.push(Some(panel.load()));
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
            outcome.export = true;
        }
    });

    ui.add_space(10.0);
    ui.label(format!("{} {}", panel.rows().len(), spec.plural.to_lowercase()));
    ui.add_space(10.0);

    let mut edit = None;
    let mut delete = None;
    record_grid(
        ui,
        spec.collection,
        panel.table(),
        &format!("No {} yet", spec.plural.to_lowercase()),
        Some(&mut |ui: &mut Ui, row: &E| {
            ui.add_space(8.0);
            if action_button(ui, PENCIL, "Edit").clicked() {
                edit = Some(row.id());
            }
            ui.add_space(4.0);
            if danger_action_button(ui, TRASH, "Delete").clicked() {
                delete = Some(row.id());
            }
        }),
    );

    if let Some(id) = edit {
        outcome.push(Some(panel.edit(id)));
        outcome.reload_options = true;
    }
    if let Some(id) = delete {
        outcome.push(panel.delete(id));
    }

    if panel.is_form_open() {
        show_form_window(ui.ctx(), panel, options, notifier, &mut outcome);
    }

    if panel.pending_delete().is_some() {
        show_delete_confirm(ui.ctx(), panel, &mut outcome);
    }

    outcome
}

fn show_form_window<E: Entity>(
    ctx: &egui::Context,
    panel: &mut CrudPanel<E>,
    options: &OptionLists,
    notifier: &mut Notifier,
    outcome: &mut ViewOutcome<CrudIntent>,
) {
    let spec = panel.spec();
    let title = if panel.form().is_editing() {
        format!("Edit {}", spec.singular)
    } else {
        format!("Add {}", spec.singular)
    };

    egui::Window::new(title)
        .id(egui::Id::new(("crud_form", spec.collection)))
        .collapsible(false)
        .resizable(false)
        .default_width(450.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            ScrollArea::vertical().max_height(400.0).show(ui, |ui| {
                egui::Grid::new(("crud_form_grid", spec.collection))
                    .num_columns(2)
                    .spacing([20.0, 10.0])
                    .show(ui, |ui| {
                        for (field, value) in panel.form_mut().entries_mut() {
                            if field.required {
                                ui.label(format!("{}: *", field.label));
                            } else {
                                ui.label(format!("{}:", field.label));
                            }

                            match field.kind {
                                FieldKind::Text | FieldKind::Number => {
                                    ui.add(egui::TextEdit::singleline(value).desired_width(250.0));
                                }
                                FieldKind::LongText => {
                                    ui.add(
                                        egui::TextEdit::multiline(value)
                                            .desired_width(250.0)
                                            .desired_rows(3),
                                    );
                                }
                                FieldKind::Date => date_input(ui, field.name, value),
                                FieldKind::Reference(source) => {
                                    option_combo_text(ui, field.name, options.get(source), value);
                                }
                            }
                            ui.end_row();
                        }
                    });
            });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    panel.hide_form();
                }

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if primary_button_with_icon(ui, FLOPPY_DISK, "Save").clicked() {
                        outcome.push(panel.submit(notifier));
                    }
                });
            });
        });
}

fn show_delete_confirm<E: Entity>(
    ctx: &egui::Context,
    panel: &mut CrudPanel<E>,
    outcome: &mut ViewOutcome<CrudIntent>,
) {
    let Some(pending) = panel.pending_delete().cloned() else {
        return;
    };
    let singular = panel.spec().singular;
    let mut answer = None;

    egui::Window::new(format!("Delete {singular}"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!(
                "Are you sure you want to delete this {}?",
                singular.to_lowercase()
            ));
            ui.label(egui::RichText::new(&pending.label).strong());
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    answer = Some(false);
                }
                if ui.button("Delete").clicked() {
                    answer = Some(true);
                }
            });
        });

    if let Some(confirmed) = answer {
        outcome.push(panel.confirm_delete(confirmed));
    }
}
