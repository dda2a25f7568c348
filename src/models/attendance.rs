use serde::Deserialize;

use super::date::{WireDate, display_opt, display_time};
use super::id_cell;
use crate::panel::spec::Record;

/// One day of check-in/check-out for an employee.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub attendance_id: i64,
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub date: Option<WireDate>,
    #[serde(default)]
    pub check_in_time: Option<String>,
    #[serde(default)]
    pub check_out_time: Option<String>,
}

impl Record for AttendanceRecord {
    const COLUMNS: &'static [&'static str] = &["ID", "Employee", "Date", "Check In", "Check Out"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.attendance_id.to_string(),
            id_cell(self.employee_id),
            display_opt(&self.date),
            self.check_in_time.as_deref().map(display_time).unwrap_or_default(),
            self.check_out_time.as_deref().map(display_time).unwrap_or_default(),
        ]
    }
}
