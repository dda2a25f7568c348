//! Wire records exchanged with the payroll backend.

pub mod attendance;
pub mod date;
pub mod department;
pub mod employee;
pub mod leave;
pub mod payroll;
pub mod position;

pub use attendance::AttendanceRecord;
pub use date::WireDate;
pub use department::Department;
pub use employee::Employee;
pub use leave::{LEAVES_PATH, Leave, LeaveStatus};
pub use payroll::PayrollRecord;
pub use position::Position;

/// Cell text for an optional number, shown unformatted.
pub(crate) fn number_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Cell text for an optional identifier.
pub(crate) fn id_cell(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
