//! Choices for reference dropdowns.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::spec::OptionSource;
use crate::error::{AppError, Result};
use crate::models::{Department, Employee, Position};
use crate::notify::Notifier;

/// One entry of a dropdown. A `None` value is a placeholder that selects nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: Option<i64>,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: i64, label: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            label: label.into(),
        }
    }

    pub fn placeholder(label: impl Into<String>) -> Self {
        Self {
            value: None,
            label: label.into(),
        }
    }
}

/// A record that can appear in a dropdown.
pub trait Choice: DeserializeOwned {
    fn option(&self) -> SelectOption;
}

/// Options read from one collection.
#[derive(Debug, Clone)]
pub struct OptionList {
    source: OptionSource,
    options: Vec<SelectOption>,
}

impl OptionList {
    pub fn new(source: OptionSource) -> Self {
        let options = match source {
            OptionSource::Employees => vec![SelectOption::placeholder(EMPLOYEE_PLACEHOLDER)],
            OptionSource::Departments | OptionSource::Positions => Vec::new(),
        };
        Self { source, options }
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Label for a selected value, if it is among the options.
    pub fn label_of(&self, value: i64) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == Some(value))
            .map(|o| o.label.as_str())
    }

    /// Apply a collection reply.
    ///
    /// The employee list keeps a leading placeholder and collapses to a single
    /// error placeholder on failure. Department and position lists keep their
    /// previous options on failure.
    pub fn apply(&mut self, result: Result<Value>, notifier: &mut Notifier) {
        let decoded = result.and_then(|value| match self.source {
            OptionSource::Employees => decode::<Employee>(value),
            OptionSource::Departments => decode::<Department>(value),
            OptionSource::Positions => decode::<Position>(value),
        });

        match (decoded, self.source) {
            (Ok(options), OptionSource::Employees) => {
                self.options = std::iter::once(SelectOption::placeholder(EMPLOYEE_PLACEHOLDER))
                    .chain(options)
                    .collect();
            }
            (Ok(options), _) => self.options = options,
            (Err(e), OptionSource::Employees) => {
                tracing::warn!("Failed to load employee options: {e}");
                self.options = vec![SelectOption::placeholder(EMPLOYEE_ERROR)];
            }
            (Err(e), source) => {
                notifier.error(format!("Failed to load {} options: {e}", source_name(source)));
            }
        }
    }
}

pub const EMPLOYEE_PLACEHOLDER: &str = "Select an employee...";
pub const EMPLOYEE_ERROR: &str = "Error loading employees";

fn decode<C: Choice>(value: Value) -> Result<Vec<SelectOption>> {
    if !value.is_array() {
        return Err(AppError::decode("expected a list"));
    }
    let items: Vec<C> = serde_json::from_value(value)?;
    Ok(items.iter().map(Choice::option).collect())
}

fn source_name(source: OptionSource) -> &'static str {
    match source {
        OptionSource::Departments => "department",
        OptionSource::Positions => "position",
        OptionSource::Employees => "employee",
    }
}

/// The three shared option lists.
#[derive(Debug, Clone)]
pub struct OptionLists {
    pub departments: OptionList,
    pub positions: OptionList,
    pub employees: OptionList,
}

impl Default for OptionLists {
    fn default() -> Self {
        Self {
            departments: OptionList::new(OptionSource::Departments),
            positions: OptionList::new(OptionSource::Positions),
            employees: OptionList::new(OptionSource::Employees),
        }
    }
}

impl OptionLists {
    pub fn get(&self, source: OptionSource) -> &OptionList {
        match source {
            OptionSource::Departments => &self.departments,
            OptionSource::Positions => &self.positions,
            OptionSource::Employees => &self.employees,
        }
    }

    pub fn get_mut(&mut self, source: OptionSource) -> &mut OptionList {
        match source {
            OptionSource::Departments => &mut self.departments,
            OptionSource::Positions => &mut self.positions,
            OptionSource::Employees => &mut self.employees,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    fn failure() -> AppError {
        AppError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "down".to_string(),
        }
    }

    #[test]
    fn test_employee_options_keep_placeholder() {
        let mut list = OptionList::new(OptionSource::Employees);
        let mut notifier = Notifier::default();
        list.apply(
            Ok(json!([
                {"employeeId": 1, "employeeName": "Ann"},
                {"employeeId": 2, "employeeName": "Bo"}
            ])),
            &mut notifier,
        );

        let labels: Vec<_> = list.options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["Select an employee...", "Ann", "Bo"]);
        assert_eq!(list.options()[0].value, None);
        assert_eq!(list.label_of(2), Some("Bo"));
    }

    #[test]
    fn test_employee_failure_replaces_options() {
        let mut list = OptionList::new(OptionSource::Employees);
        let mut notifier = Notifier::default();
        list.apply(Ok(json!([{"employeeId": 1, "employeeName": "Ann"}])), &mut notifier);
        list.apply(Err(failure()), &mut notifier);

        assert_eq!(list.options(), [SelectOption::placeholder("Error loading employees")]);
    }

    #[test]
    fn test_department_failure_keeps_previous() {
        let mut list = OptionList::new(OptionSource::Departments);
        let mut notifier = Notifier::default();
        list.apply(Ok(json!([{"departmentId": 3, "departmentName": "Ops"}])), &mut notifier);
        list.apply(Err(failure()), &mut notifier);

        assert_eq!(list.options(), [SelectOption::new(3, "Ops")]);
        assert!(notifier.current(Instant::now()).is_some());
    }

    #[test]
    fn test_position_options_have_no_placeholder() {
        let mut list = OptionList::new(OptionSource::Positions);
        let mut notifier = Notifier::default();
        list.apply(Ok(json!([{"positionId": 5, "positionTitle": "Engineer"}])), &mut notifier);
        assert_eq!(list.options(), [SelectOption::new(5, "Engineer")]);
    }
}
