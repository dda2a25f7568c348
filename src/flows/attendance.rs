//! Check-in, check-out and attendance history.

use serde_json::Value;
use tracing::warn;

use super::require_employee;
use crate::api::request::ApiRequest;
use crate::error::Result;
use crate::models::AttendanceRecord;
use crate::notify::Notifier;
use crate::panel::{Call, RecordTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceIntent {
    CheckIn,
    CheckOut,
    History,
}

#[derive(Debug, Default)]
pub struct AttendancePanel {
    pub employee: Option<i64>,
    history: RecordTable<AttendanceRecord>,
}

impl AttendancePanel {
    pub fn history(&self) -> &RecordTable<AttendanceRecord> {
        &self.history
    }

    pub fn check_in(&self, notifier: &mut Notifier) -> Option<Call<AttendanceIntent>> {
        let employee = require_employee(self.employee, notifier)?;
        Some(Call::new(
            AttendanceIntent::CheckIn,
            ApiRequest::post(format!("/api/attendance/checkin/{employee}")),
        ))
    }

    pub fn check_out(&self, notifier: &mut Notifier) -> Option<Call<AttendanceIntent>> {
        let employee = require_employee(self.employee, notifier)?;
        Some(Call::new(
            AttendanceIntent::CheckOut,
            ApiRequest::post(format!("/api/attendance/checkout/{employee}")),
        ))
    }

    pub fn load_history(&self, notifier: &mut Notifier) -> Option<Call<AttendanceIntent>> {
        let employee = require_employee(self.employee, notifier)?;
        Some(Call::new(
            AttendanceIntent::History,
            ApiRequest::get(format!("/api/attendance/employee/{employee}")),
        ))
    }

    /// Pick another employee; the shown history no longer applies.
    pub fn select(&mut self, employee: Option<i64>) {
        if self.employee != employee {
            self.employee = employee;
            self.history.clear();
        }
    }

    pub fn handle(
        &mut self,
        intent: AttendanceIntent,
        result: Result<Value>,
        notifier: &mut Notifier,
    ) {
        match (intent, result) {
            (AttendanceIntent::CheckIn, Ok(_)) => notifier.success("Checked-in successfully!"),
            (AttendanceIntent::CheckIn, Err(e)) => {
                warn!("Check-in failed: {e}");
                notifier.error("Check-in failed!");
            }
            (AttendanceIntent::CheckOut, Ok(_)) => notifier.success("Checked-out successfully!"),
            (AttendanceIntent::CheckOut, Err(e)) => {
                warn!("Check-out failed: {e}");
                notifier.error("Check-out failed!");
            }
            (AttendanceIntent::History, result) => {
                if let Err(e) = self.history.apply(result) {
                    notifier.error(format!("Failed to load attendance: {e}"));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::api::Method;
    use crate::error::AppError;
    use crate::notify::NoticeKind;
    use reqwest::StatusCode;
    use serde_json::json;

    fn panel_for(employee: i64) -> AttendancePanel {
        AttendancePanel {
            employee: Some(employee),
            ..Default::default()
        }
    }

    #[test]
    fn test_check_in_and_out_paths() {
        let mut notifier = Notifier::default();
        let panel = panel_for(3);

        let check_in = panel.check_in(&mut notifier).unwrap();
        assert_eq!(check_in.request.method, Method::POST);
        assert_eq!(check_in.request.path, "/api/attendance/checkin/3");
        assert!(check_in.request.body.is_none());

        let check_out = panel.check_out(&mut notifier).unwrap();
        assert_eq!(check_out.request.path, "/api/attendance/checkout/3");
    }

    #[test]
    fn test_requires_employee() {
        let mut notifier = Notifier::default();
        let panel = AttendancePanel::default();
        assert!(panel.check_in(&mut notifier).is_none());
        assert!(panel.load_history(&mut notifier).is_none());
    }

    #[test]
    fn test_outcome_messages() {
        let mut notifier = Notifier::default();
        let mut panel = panel_for(1);

        panel.handle(AttendanceIntent::CheckIn, Ok(Value::Null), &mut notifier);
        assert_eq!(notifier.current(Instant::now()).unwrap().message, "Checked-in successfully!");

        let err = AppError::Status {
            status: StatusCode::CONFLICT,
            message: "Already checked in".to_string(),
        };
        panel.handle(AttendanceIntent::CheckIn, Err(err), &mut notifier);
        let notice = notifier.current(Instant::now()).unwrap();
        assert_eq!(notice.message, "Check-in failed!");
        assert_eq!(notice.kind, NoticeKind::Error);
    }

    #[test]
    fn test_history_cleared_on_new_selection() {
        let mut notifier = Notifier::default();
        let mut panel = panel_for(1);

        let call = panel.load_history(&mut notifier).unwrap();
        assert_eq!(call.request, ApiRequest::get("/api/attendance/employee/1"));
        panel.handle(call.intent, Ok(json!([{"attendanceId": 1, "employeeId": 1}])), &mut notifier);
        assert_eq!(panel.history().rows().len(), 1);

        panel.select(Some(1));
        assert_eq!(panel.history().rows().len(), 1);
        panel.select(Some(2));
        assert!(panel.history().rows().is_empty());
    }
}
