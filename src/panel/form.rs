//! Form field state and payload encoding.

use serde_json::{Map, Number, Value};

use super::spec::{FieldKind, FieldSpec};
use crate::models::date::WireDate;

/// Text contents of a bound form, one string per field plus the hidden identifier.
#[derive(Debug, Clone)]
pub struct FormState {
    /// Identifier of the record being edited; blank when creating.
    pub id: String,
    fields: &'static [FieldSpec],
    values: Vec<String>,
}

impl FormState {
    pub fn new(fields: &'static [FieldSpec]) -> Self {
        Self {
            id: String::new(),
            fields,
            values: vec![String::new(); fields.len()],
        }
    }

    /// Current text of a field, empty for unknown names.
    pub fn get(&self, name: &str) -> &str {
        self.index(name).map(|i| self.values[i].as_str()).unwrap_or("")
    }

    /// Set a field's text. Unknown names are ignored.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        if let Some(i) = self.index(name) {
            self.values[i] = value.into();
        }
    }

    /// Mutable text of a field, for binding a single input.
    pub fn value_mut(&mut self, name: &str) -> Option<&mut String> {
        self.index(name).map(|i| &mut self.values[i])
    }

    /// Iterate fields with mutable access to their text, for binding to inputs.
    pub fn entries_mut(&mut self) -> impl Iterator<Item = (&'static FieldSpec, &mut String)> {
        self.fields.iter().zip(self.values.iter_mut())
    }

    /// True when editing an existing record.
    pub fn is_editing(&self) -> bool {
        !self.id.trim().is_empty()
    }

    /// Reset the identifier and every field to empty.
    pub fn clear(&mut self) {
        self.id.clear();
        for value in &mut self.values {
            value.clear();
        }
    }

    /// True when every field, including the identifier, is empty.
    pub fn is_blank(&self) -> bool {
        self.id.is_empty() && self.values.iter().all(String::is_empty)
    }

    /// Labels of required fields that are blank.
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .zip(&self.values)
            .filter(|(f, v)| f.required && v.trim().is_empty())
            .map(|(f, _)| f.label)
            .collect()
    }

    /// Fill the form from a single-item reply.
    ///
    /// Date fields are converted from their wire form to `YYYY-MM-DD`; absent
    /// keys leave the field empty.
    pub fn populate(&mut self, id_field: &str, record: &Value) {
        self.clear();
        self.id = record.get(id_field).map(plain_text).unwrap_or_default();
        for (field, value) in self.fields.iter().zip(self.values.iter_mut()) {
            *value = match record.get(field.name) {
                Some(v) => field_text(field.kind, v),
                None => String::new(),
            };
        }
    }

    /// Build the JSON payload sent on create and update.
    ///
    /// The identifier is not part of the payload; it travels in the path.
    pub fn payload(&self) -> Value {
        let mut map = Map::new();
        for (field, value) in self.fields.iter().zip(&self.values) {
            map.insert(field.name.to_string(), encode(field.kind, value));
        }
        Value::Object(map)
    }

    fn index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// Input text for a reply value of a given field kind.
fn field_text(kind: FieldKind, value: &Value) -> String {
    match (kind, value) {
        (FieldKind::Date, Value::String(s)) => WireDate::parse(s).input_value(),
        (FieldKind::Date, Value::Number(n)) => match n.as_i64() {
            Some(millis) => WireDate::from_millis(millis).input_value(),
            None => n.to_string(),
        },
        _ => plain_text(value),
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Encode one field. Input that does not parse is forwarded unchanged.
fn encode(kind: FieldKind, text: &str) -> Value {
    match kind {
        FieldKind::Text | FieldKind::LongText | FieldKind::Date => Value::String(text.to_string()),
        FieldKind::Number => text
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(text.to_string())),
        FieldKind::Reference(_) => match text.trim().parse::<i64>() {
            Ok(id) => Value::from(id),
            Err(_) => Value::String(text.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::spec::OptionSource;
    use serde_json::json;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::new("name", "Name", FieldKind::Text).required(),
        FieldSpec::new("salary", "Salary", FieldKind::Number),
        FieldSpec::new("joined", "Joined", FieldKind::Date),
        FieldSpec::new(
            "departmentId",
            "Department",
            FieldKind::Reference(OptionSource::Departments),
        ),
    ];

    #[test]
    fn test_new_form_is_blank() {
        let form = FormState::new(FIELDS);
        assert!(form.is_blank());
        assert!(!form.is_editing());
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut form = FormState::new(FIELDS);
        form.id = "4".to_string();
        form.set("name", "Ann");
        form.set("salary", "1000");
        form.set("joined", "2024-01-01");
        form.set("departmentId", "2");
        form.clear();
        assert!(form.is_blank());
    }

    #[test]
    fn test_payload_encoding() {
        let mut form = FormState::new(FIELDS);
        form.id = "9".to_string();
        form.set("name", "Ann");
        form.set("salary", "1500.5");
        form.set("joined", "2024-01-01");
        form.set("departmentId", "2");

        assert_eq!(
            form.payload(),
            json!({"name": "Ann", "salary": 1500.5, "joined": "2024-01-01", "departmentId": 2})
        );
    }

    #[test]
    fn test_malformed_input_forwarded_as_is() {
        let mut form = FormState::new(FIELDS);
        form.set("salary", "lots");
        form.set("departmentId", "");
        let payload = form.payload();
        assert_eq!(payload["salary"], json!("lots"));
        assert_eq!(payload["departmentId"], json!(""));
    }

    #[test]
    fn test_populate_reformats_dates() {
        let mut form = FormState::new(FIELDS);
        form.populate(
            "id",
            &json!({
                "id": 3,
                "name": "Bo",
                "salary": 2000.0,
                "joined": "2023-01-05T00:00:00.000+00:00",
                "departmentId": 1
            }),
        );
        assert_eq!(form.id, "3");
        assert_eq!(form.get("name"), "Bo");
        assert_eq!(form.get("salary"), "2000");
        assert_eq!(form.get("joined"), "2023-01-05");
        assert_eq!(form.get("departmentId"), "1");
    }

    #[test]
    fn test_populate_epoch_millis_date() {
        let mut form = FormState::new(FIELDS);
        form.populate("id", &json!({"id": 3, "joined": 1672876800000_i64}));
        assert_eq!(form.get("joined"), "2023-01-05");
        assert_eq!(form.get("name"), "");
    }

    #[test]
    fn test_populate_replaces_previous_values() {
        let mut form = FormState::new(FIELDS);
        form.set("salary", "999");
        form.populate("id", &json!({"id": 1, "name": "Cy", "salary": null}));
        assert_eq!(form.get("salary"), "");
    }

    #[test]
    fn test_missing_required() {
        let mut form = FormState::new(FIELDS);
        assert_eq!(form.missing_required(), vec!["Name"]);
        form.set("name", "  ");
        assert_eq!(form.missing_required(), vec!["Name"]);
        form.set("name", "Ann");
        assert!(form.missing_required().is_empty());
    }
}
