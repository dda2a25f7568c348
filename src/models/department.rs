use serde::Deserialize;

use crate::panel::options::{Choice, SelectOption};
use crate::panel::spec::{Entity, EntitySpec, FieldKind, FieldSpec, Record};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub department_id: i64,
    #[serde(default)]
    pub department_name: Option<String>,
}

const FIELDS: &[FieldSpec] =
    &[FieldSpec::new("departmentName", "Name", FieldKind::Text).required()];

static SPEC: EntitySpec = EntitySpec {
    singular: "Department",
    plural: "Departments",
    collection: "/api/departments",
    id_field: "departmentId",
    fields: FIELDS,
};

impl Record for Department {
    const COLUMNS: &'static [&'static str] = &["ID", "Name"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.department_id.to_string(),
            self.department_name.clone().unwrap_or_default(),
        ]
    }
}

impl Entity for Department {
    const SPEC: &'static EntitySpec = &SPEC;

    fn id(&self) -> i64 {
        self.department_id
    }

    fn label(&self) -> String {
        match self.department_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Department #{}", self.department_id),
        }
    }
}

impl Choice for Department {
    fn option(&self) -> SelectOption {
        SelectOption::new(self.department_id, self.label())
    }
}
