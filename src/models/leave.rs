//! Leave requests and their approval state.

use std::fmt;

use serde::Deserialize;

use super::date::{WireDate, display_opt};
use super::id_cell;
use crate::panel::spec::{FieldKind, FieldSpec, OptionSource, Record};

/// Collection endpoint for leave requests.
pub const LEAVES_PATH: &str = "/api/leaves";

/// Approval state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    /// Value sent in the `status` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            LeaveStatus::Pending => "PENDING",
            LeaveStatus::Approved => "APPROVED",
            LeaveStatus::Rejected => "REJECTED",
        }
    }

    /// Parse a wire status. Values this client does not know give `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(LeaveStatus::Pending),
            "APPROVED" => Some(LeaveStatus::Approved),
            "REJECTED" => Some(LeaveStatus::Rejected),
            _ => None,
        }
    }

    /// Lowercase word used in notifications ("approved").
    pub fn verb(self) -> String {
        self.as_str().to_lowercase()
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leave {
    pub leave_id: i64,
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub start_date: Option<WireDate>,
    #[serde(default)]
    pub end_date: Option<WireDate>,
    #[serde(default)]
    pub reason: Option<String>,
    /// Status text as the backend sent it.
    #[serde(default)]
    pub status: Option<String>,
}

impl Leave {
    pub fn status(&self) -> Option<LeaveStatus> {
        self.status.as_deref().and_then(LeaveStatus::parse)
    }
}

/// Fields of the apply-for-leave form.
pub const APPLY_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("employeeId", "Employee", FieldKind::Reference(OptionSource::Employees))
        .required(),
    FieldSpec::new("startDate", "Start Date", FieldKind::Date).required(),
    FieldSpec::new("endDate", "End Date", FieldKind::Date).required(),
    FieldSpec::new("reason", "Reason", FieldKind::LongText),
];

impl Record for Leave {
    const COLUMNS: &'static [&'static str] =
        &["Employee", "Start Date", "End Date", "Reason", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![
            format!("Employee ID: {}", id_cell(self.employee_id)),
            display_opt(&self.start_date),
            display_opt(&self.end_date),
            self.reason.clone().unwrap_or_default(),
            self.status.clone().unwrap_or_default(),
        ]
    }
}
