//! Leave applications and approvals.

use serde_json::{Value, json};

use crate::api::request::{ApiRequest, item_path};
use crate::error::Result;
use crate::models::leave::APPLY_FIELDS;
use crate::models::{LEAVES_PATH, Leave, LeaveStatus};
use crate::notify::Notifier;
use crate::panel::{Call, FormState, RecordTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveIntent {
    Apply,
    Load,
    UpdateStatus(LeaveStatus),
}

/// Message shown in place of the rows when the list cannot be loaded.
pub const LOAD_ERROR_ROW: &str = "Error loading leave requests. Please try again.";

pub struct LeavePanel {
    form: FormState,
    table: RecordTable<Leave>,
    /// When set, only this employee's requests are listed.
    pub filter: Option<i64>,
}

impl Default for LeavePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl LeavePanel {
    pub fn new() -> Self {
        Self {
            form: FormState::new(APPLY_FIELDS),
            table: RecordTable::new().with_inline_error(),
            filter: None,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn table(&self) -> &RecordTable<Leave> {
        &self.table
    }

    /// List every request, or one employee's when filtered.
    pub fn load(&self) -> Call<LeaveIntent> {
        let path = match self.filter {
            Some(employee) => format!("{LEAVES_PATH}/employee/{employee}"),
            None => LEAVES_PATH.to_string(),
        };
        Call::new(LeaveIntent::Load, ApiRequest::get(path))
    }

    /// `POST /api/leaves/apply/{employeeId}` with the dates and reason.
    pub fn apply(&self, notifier: &mut Notifier) -> Option<Call<LeaveIntent>> {
        let missing = self.form.missing_required();
        if !missing.is_empty() {
            notifier.error(format!("{} is required", missing.join(", ")));
            return None;
        }

        let employee = self.form.get("employeeId").trim();
        let body = json!({
            "startDate": self.form.get("startDate"),
            "endDate": self.form.get("endDate"),
            "reason": self.form.get("reason"),
        });
        Some(Call::new(
            LeaveIntent::Apply,
            ApiRequest::post(item_path("/api/leaves/apply", employee)).json(body),
        ))
    }

    /// `PUT /api/leaves/update/{id}?status=...`
    pub fn update_status(&self, leave_id: i64, status: LeaveStatus) -> Call<LeaveIntent> {
        Call::new(
            LeaveIntent::UpdateStatus(status),
            ApiRequest::put(item_path("/api/leaves/update", leave_id))
                .query("status", status.as_str()),
        )
    }

    /// Apply a reply. Mutations that reached the backend are followed by a reload.
    pub fn handle(
        &mut self,
        intent: LeaveIntent,
        result: Result<Value>,
        notifier: &mut Notifier,
    ) -> Option<Call<LeaveIntent>> {
        match intent {
            LeaveIntent::Load => {
                if let Err(e) = self.table.apply(result) {
                    notifier.error(format!("Failed to load leave requests: {e}"));
                }
                None
            }
            LeaveIntent::Apply => match result {
                Ok(_) => {
                    notifier.success("Leave applied successfully!");
                    self.form.clear();
                    Some(self.load())
                }
                Err(e) => {
                    notifier.error(format!("Failed to apply for leave: {e}"));
                    (!e.is_transport()).then(|| self.load())
                }
            },
            LeaveIntent::UpdateStatus(status) => match result {
                Ok(_) => {
                    notifier.success(format!("Leave {} successfully!", status.verb()));
                    Some(self.load())
                }
                Err(e) => {
                    notifier.error(format!("Failed to update leave request: {e}"));
                    (!e.is_transport()).then(|| self.load())
                }
            },
        }
    }
}
