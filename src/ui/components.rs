//! Shared UI components.

use std::time::Instant;

use eframe::egui::{self, Color32, CornerRadius, Margin, Response, RichText, Sense, StrokeKind, Ui};
use egui_extras::DatePickerButton;
use egui_phosphor::regular::{CHECK_CIRCLE, INFO, WARNING_CIRCLE, X};

use crate::models::date::{INPUT_FORMAT, parse_input_date};
use crate::notify::{NoticeKind, Notifier};
use crate::panel::{OptionList, Record, RecordTable};

/// Render a clickable dashboard card with dynamic size.
///
/// Returns the response which can be checked for `.clicked()`.
pub fn dashboard_card(
    ui: &mut Ui,
    title: &str,
    description: &str,
    icon: &str,
    size: egui::Vec2,
) -> Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());

    if ui.is_rect_visible(rect) {
        let visuals = ui.style().interact(&response);
        let scale = size.x / 200.0;

        ui.painter().rect_filled(rect, 8.0, visuals.bg_fill);
        ui.painter()
            .rect_stroke(rect, 8.0, visuals.bg_stroke, StrokeKind::Outside);

        let icon_pos = egui::pos2(rect.center().x, rect.top() + size.y * 0.25);
        ui.painter().text(
            icon_pos,
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(34.0 * scale),
            visuals.text_color(),
        );

        let title_pos = egui::pos2(rect.center().x, rect.center().y + size.y * 0.08);
        ui.painter().text(
            title_pos,
            egui::Align2::CENTER_CENTER,
            title,
            egui::FontId::proportional(17.0 * scale),
            visuals.text_color(),
        );

        let desc_pos = egui::pos2(rect.center().x, rect.bottom() - size.y * 0.16);
        ui.painter().text(
            desc_pos,
            egui::Align2::CENTER_CENTER,
            description,
            egui::FontId::proportional(12.0 * scale),
            ui.visuals().weak_text_color(),
        );
    }

    response
}

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const INFO: Color32 = Color32::from_rgb(100, 150, 230);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
    pub const PRIMARY: Color32 = Color32::from_rgb(0x44, 0x72, 0xC4);
}

/// Render a back button that returns true when clicked.
pub fn back_button(ui: &mut Ui) -> bool {
    ui.button(RichText::new("< Back to Dashboard").size(14.0)).clicked()
}

/// Render a panel header with title.
pub fn panel_header(ui: &mut Ui, title: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}

pub fn styled_button(ui: &mut Ui, text: &str) -> Response {
    ui.add(egui::Button::new(text).min_size(egui::vec2(80.0, 28.0)))
}

pub fn styled_button_with_icon(ui: &mut Ui, icon: &str, text: &str) -> Response {
    ui.add(egui::Button::new(format!("{icon} {text}")).min_size(egui::vec2(80.0, 28.0)))
}

/// Filled button for the main action of a screen.
pub fn primary_button_with_icon(ui: &mut Ui, icon: &str, text: &str) -> Response {
    let label = if icon.is_empty() {
        text.to_string()
    } else {
        format!("{icon} {text}")
    };
    ui.add(
        egui::Button::new(RichText::new(label).color(Color32::WHITE))
            .fill(colors::PRIMARY)
            .min_size(egui::vec2(80.0, 28.0)),
    )
}

/// Small row action.
pub fn action_button(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.small_button(icon).on_hover_text(tooltip)
}

pub fn danger_action_button(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.small_button(RichText::new(icon).color(colors::ERROR))
        .on_hover_text(tooltip)
}

/// Render a read-only table of records in a striped grid.
///
/// `actions` draws extra widgets at the end of each row and receives the row.
pub fn record_grid<R: Record>(
    ui: &mut Ui,
    id: &str,
    table: &RecordTable<R>,
    empty_text: &str,
    mut actions: Option<&mut dyn FnMut(&mut Ui, &R)>,
) {
    let columns = R::COLUMNS.len() + usize::from(actions.is_some());

    egui::ScrollArea::both().id_salt(id).auto_shrink([false, true]).show(ui, |ui| {
        egui::Grid::new(id)
            .num_columns(columns)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                for header in R::COLUMNS {
                    ui.strong(*header);
                }
                if actions.is_some() {
                    ui.strong("Actions");
                }
                ui.end_row();

                if let Some(error) = table.error() {
                    ui.colored_label(colors::ERROR, error);
                    ui.end_row();
                    return;
                }

                for row in table.rows() {
                    for cell in row.cells() {
                        ui.label(cell);
                    }
                    if let Some(actions) = actions.as_mut() {
                        ui.horizontal(|ui| actions(ui, row));
                    }
                    ui.end_row();
                }
            });

        if table.rows().is_empty() && table.error().is_none() {
            ui.add_space(10.0);
            ui.label(RichText::new(empty_text).weak());
        }
    });
}

/// Dropdown bound to an optional identifier.
pub fn option_combo(ui: &mut Ui, id: &str, list: &OptionList, selected: &mut Option<i64>) -> bool {
    let mut changed = false;
    let text = selected
        .and_then(|value| list.label_of(value))
        .map(str::to_string)
        .or_else(|| list.options().first().filter(|o| o.value.is_none()).map(|o| o.label.clone()))
        .unwrap_or_else(|| "None".to_string());

    egui::ComboBox::from_id_salt(id)
        .width(250.0)
        .selected_text(text)
        .show_ui(ui, |ui| {
            for option in list.options() {
                if ui
                    .selectable_label(*selected == option.value, &option.label)
                    .clicked()
                    && *selected != option.value
                {
                    *selected = option.value;
                    changed = true;
                }
            }
        });

    changed
}

/// Dropdown bound to the text of a reference field.
pub fn option_combo_text(ui: &mut Ui, id: &str, list: &OptionList, text: &mut String) {
    let mut selected = text.trim().parse::<i64>().ok();
    if option_combo(ui, id, list, &mut selected) {
        *text = selected.map(|v| v.to_string()).unwrap_or_default();
    }
}

/// Date text input with a calendar picker.
pub fn date_input(ui: &mut Ui, id: &str, text: &mut String) {
    ui.horizontal(|ui| {
        let parsed = parse_input_date(text);
        let text_color = if text.is_empty() || parsed.is_some() {
            ui.visuals().text_color()
        } else {
            colors::ERROR
        };

        ui.add(
            egui::TextEdit::singleline(text)
                .desired_width(110.0)
                .hint_text("YYYY-MM-DD")
                .text_color(text_color),
        );

        let mut date = parsed.unwrap_or_else(|| chrono::Local::now().date_naive());
        if ui
            .add(DatePickerButton::new(&mut date).id_salt(id).show_icon(true).format(INPUT_FORMAT))
            .changed()
        {
            *text = date.format(INPUT_FORMAT).to_string();
        }
    });
}

/// Render the current notification banner, if any.
pub fn notification_banner(ui: &mut Ui, notifier: &mut Notifier) {
    let now = Instant::now();
    notifier.expire(now);
    let Some(notice) = notifier.current(now) else {
        return;
    };

    let (icon, color) = match notice.kind {
        NoticeKind::Success => (CHECK_CIRCLE, colors::SUCCESS),
        NoticeKind::Error => (WARNING_CIRCLE, colors::ERROR),
        NoticeKind::Info => (INFO, colors::INFO),
    };
    let message = notice.message.clone();
    let mut dismiss = false;

    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .stroke(egui::Stroke::new(1.0, color))
        .inner_margin(Margin::symmetric(12, 8))
        .corner_radius(CornerRadius::same(6))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(icon).color(color).size(18.0));
                ui.label(RichText::new(message).color(color));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button(X).clicked() {
                        dismiss = true;
                    }
                });
            });
        });

    if dismiss {
        notifier.dismiss();
    }
}
