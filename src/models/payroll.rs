use serde::Deserialize;

use super::date::{WireDate, display_opt};
use super::{id_cell, number_cell};
use crate::panel::spec::Record;

/// A generated payroll entry. Read-only on the client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRecord {
    pub payroll_id: i64,
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub payroll_pay_date: Option<WireDate>,
    #[serde(default)]
    pub payroll_base_salary: Option<f64>,
    #[serde(default)]
    pub payroll_experience_bonus: Option<f64>,
    #[serde(default)]
    pub payroll_deductions: Option<f64>,
    #[serde(default)]
    pub payroll_total_pay: Option<f64>,
}

impl Record for PayrollRecord {
    const COLUMNS: &'static [&'static str] = &[
        "ID",
        "Employee",
        "Pay Date",
        "Base Salary",
        "Experience Bonus",
        "Deductions",
        "Total Pay",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.payroll_id.to_string(),
            id_cell(self.employee_id),
            display_opt(&self.payroll_pay_date),
            number_cell(self.payroll_base_salary),
            number_cell(self.payroll_experience_bonus),
            number_cell(self.payroll_deductions),
            number_cell(self.payroll_total_pay),
        ]
    }
}
