//! Payroll generation and per-employee payroll history.

use serde_json::{Value, json};
use tracing::warn;

use super::require_employee;
use crate::api::request::ApiRequest;
use crate::error::Result;
use crate::models::PayrollRecord;
use crate::notify::Notifier;
use crate::panel::{Call, RecordTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayrollIntent {
    Generate,
    View,
}

/// Parse the deductions input the lenient way: the longest leading decimal
/// number is used and anything unparseable counts as zero.
pub fn coerce_deductions(input: &str) -> f64 {
    let text = input.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return 0.0;
    }

    // Optional exponent, only taken when it has digits.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Generate payroll for one employee and browse another's history.
#[derive(Debug, Default)]
pub struct PayrollPanel {
    /// Employee payroll is generated for.
    pub employee: Option<i64>,
    pub deductions: String,
    /// Employee whose payroll history is shown.
    pub view_employee: Option<i64>,
    table: RecordTable<PayrollRecord>,
}

impl PayrollPanel {
    pub fn table(&self) -> &RecordTable<PayrollRecord> {
        &self.table
    }

    /// `POST /api/payroll/generate/{id}` with the coerced deductions.
    pub fn generate(&self, notifier: &mut Notifier) -> Option<Call<PayrollIntent>> {
        let employee = require_employee(self.employee, notifier)?;
        let body = json!({ "deductions": coerce_deductions(&self.deductions) });
        Some(Call::new(
            PayrollIntent::Generate,
            ApiRequest::post(format!("/api/payroll/generate/{employee}")).json(body),
        ))
    }

    /// `GET /api/payroll/employee/{id}` into the history table.
    pub fn view(&self, notifier: &mut Notifier) -> Option<Call<PayrollIntent>> {
        let employee = require_employee(self.view_employee, notifier)?;
        Some(Call::new(
            PayrollIntent::View,
            ApiRequest::get(format!("/api/payroll/employee/{employee}")),
        ))
    }

    /// Drop history rows that belong to a previous selection.
    pub fn clear_history(&mut self) {
        self.table.clear();
    }

    pub fn handle(
        &mut self,
        intent: PayrollIntent,
        result: Result<Value>,
        notifier: &mut Notifier,
    ) {
        match intent {
            PayrollIntent::Generate => match result {
                Ok(_) => notifier.success("Payroll generated successfully!"),
                Err(e) => {
                    warn!("Error generating payroll: {e}");
                    notifier.error(format!("Failed to generate payroll: {e}"));
                }
            },
            PayrollIntent::View => {
                if let Err(e) = self.table.apply(result) {
                    notifier.error(format!("Failed to load payroll: {e}"));
                }
            }
        }
    }
}
