use serde::Deserialize;

use super::number_cell;
use crate::panel::options::{Choice, SelectOption};
use crate::panel::spec::{Entity, EntitySpec, FieldKind, FieldSpec, Record};

/// A job position with its pay scale.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub position_id: i64,
    #[serde(default)]
    pub position_title: Option<String>,
    #[serde(default)]
    pub position_base_salary: Option<f64>,
    #[serde(default)]
    pub position_experience_bonus: Option<f64>,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("positionTitle", "Title", FieldKind::Text).required(),
    FieldSpec::new("positionBaseSalary", "Base Salary", FieldKind::Number),
    FieldSpec::new("positionExperienceBonus", "Experience Bonus", FieldKind::Number),
];

static SPEC: EntitySpec = EntitySpec {
    singular: "Position",
    plural: "Positions",
    collection: "/api/positions",
    id_field: "positionId",
    fields: FIELDS,
};

impl Record for Position {
    const COLUMNS: &'static [&'static str] = &["ID", "Title", "Base Salary", "Experience Bonus"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.position_id.to_string(),
            self.position_title.clone().unwrap_or_default(),
            number_cell(self.position_base_salary),
            number_cell(self.position_experience_bonus),
        ]
    }
}

impl Entity for Position {
    const SPEC: &'static EntitySpec = &SPEC;

    fn id(&self) -> i64 {
        self.position_id
    }

    fn label(&self) -> String {
        match self.position_title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("Position #{}", self.position_id),
        }
    }
}

impl Choice for Position {
    fn option(&self) -> SelectOption {
        SelectOption::new(self.position_id, self.label())
    }
}
