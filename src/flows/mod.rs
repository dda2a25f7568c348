//! Screens whose requests do not fit the plain collection/item pattern.

pub mod attendance;
pub mod leave;
pub mod payroll;

pub use attendance::{AttendanceIntent, AttendancePanel};
pub use leave::{LeaveIntent, LeavePanel};
pub use payroll::{PayrollIntent, PayrollPanel, coerce_deductions};

use crate::notify::Notifier;

/// Notify that an employee must be picked first. Returns `None` for chaining.
fn require_employee(employee: Option<i64>, notifier: &mut Notifier) -> Option<i64> {
    if employee.is_none() {
        notifier.error("Select an employee first");
    }
    employee
}
