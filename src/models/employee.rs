//! Employee record.

use serde::Deserialize;

use super::date::{WireDate, display_opt};
use crate::panel::options::{Choice, SelectOption};
use crate::panel::spec::{Entity, EntitySpec, FieldKind, FieldSpec, OptionSource, Record};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_id: i64,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub employee_email: Option<String>,
    #[serde(default)]
    pub employee_join_date: Option<WireDate>,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub position_id: Option<i64>,
}

impl Employee {
    pub fn name(&self) -> &str {
        self.employee_name.as_deref().unwrap_or_default()
    }
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("employeeName", "Name", FieldKind::Text).required(),
    FieldSpec::new("employeeEmail", "Email", FieldKind::Text),
    FieldSpec::new("employeeJoinDate", "Join Date", FieldKind::Date),
    FieldSpec::new("departmentId", "Department", FieldKind::Reference(OptionSource::Departments)),
    FieldSpec::new("positionId", "Position", FieldKind::Reference(OptionSource::Positions)),
];

static SPEC: EntitySpec = EntitySpec {
    singular: "Employee",
    plural: "Employees",
    collection: "/api/employees",
    id_field: "employeeId",
    fields: FIELDS,
};

impl Record for Employee {
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Email", "Join Date"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.employee_id.to_string(),
            self.name().to_string(),
            self.employee_email.clone().unwrap_or_default(),
            display_opt(&self.employee_join_date),
        ]
    }
}

impl Entity for Employee {
    const SPEC: &'static EntitySpec = &SPEC;

    fn id(&self) -> i64 {
        self.employee_id
    }

    fn label(&self) -> String {
        match self.employee_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Employee #{}", self.employee_id),
        }
    }
}

impl Choice for Employee {
    fn option(&self) -> SelectOption {
        SelectOption::new(self.employee_id, self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_record_renders() {
        let employee: Employee = serde_json::from_value(json!({"employeeId": 4})).unwrap();
        assert_eq!(employee.cells(), ["4", "", "", ""]);
        assert_eq!(employee.label(), "Employee #4");
    }

    #[test]
    fn test_department_and_position_stay_out_of_the_row() {
        let employee: Employee = serde_json::from_value(json!({
            "employeeId": 1,
            "employeeName": "Ann",
            "employeeEmail": "a@x.com",
            "employeeJoinDate": "2023-01-05",
            "departmentId": 2,
            "positionId": 3
        }))
        .unwrap();
        assert_eq!(employee.cells().len(), Employee::COLUMNS.len());
        assert_eq!(employee.cells(), ["1", "Ann", "a@x.com", "Jan 5, 2023"]);
    }
}
