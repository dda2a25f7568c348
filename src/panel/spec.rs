//! Declarative description of a record type and its panel.

use serde::de::DeserializeOwned;

/// Where a reference field gets its choices from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionSource {
    Departments,
    Positions,
    Employees,
}

impl OptionSource {
    /// Collection endpoint the options are read from.
    pub fn collection(self) -> &'static str {
        match self {
            OptionSource::Departments => "/api/departments",
            OptionSource::Positions => "/api/positions",
            OptionSource::Employees => "/api/employees",
        }
    }
}

/// How a form field is edited and encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text, sent as a string.
    Text,
    /// Multi-line text, sent as a string.
    LongText,
    /// Numeric input, sent as a number when it parses.
    Number,
    /// ISO date input (`YYYY-MM-DD`), sent as a string.
    Date,
    /// Identifier picked from another collection, sent as an integer when it parses.
    Reference(OptionSource),
}

/// One bound form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name, used both for the payload key and for populating from a reply.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Only non-empty checking exists on the client.
    pub required: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Everything the generic panel needs to know about one entity.
#[derive(Debug)]
pub struct EntitySpec {
    /// Singular display name ("Employee").
    pub singular: &'static str,
    /// Plural display name ("Employees").
    pub plural: &'static str,
    /// Collection endpoint; items live at `{collection}/{id}`.
    pub collection: &'static str,
    /// Wire name of the identifier.
    pub id_field: &'static str,
    pub fields: &'static [FieldSpec],
}

/// A row type that can be rendered in a table.
pub trait Record: DeserializeOwned + Clone + Send + 'static {
    /// Column headers, in cell order.
    const COLUMNS: &'static [&'static str];

    /// Cell texts for this row.
    fn cells(&self) -> Vec<String>;
}

/// A record managed through the generic create/read/update/delete panel.
pub trait Entity: Record {
    const SPEC: &'static EntitySpec;

    /// Server-assigned identifier.
    fn id(&self) -> i64;

    /// Short human label used in confirmations.
    fn label(&self) -> String;
}
