//! Configuration-driven panel state shared by every screen.

pub mod crud;
pub mod form;
pub mod options;
pub mod spec;
pub mod table;

pub use crud::{CrudIntent, CrudPanel, PendingDelete};
pub use form::FormState;
pub use options::{Choice, OptionList, OptionLists, SelectOption};
pub use spec::{Entity, EntitySpec, FieldKind, FieldSpec, OptionSource, Record};
pub use table::RecordTable;

use crate::api::ApiRequest;

/// A request a panel wants executed, tagged with what to do with its reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Call<I> {
    pub intent: I,
    pub request: ApiRequest,
}

impl<I> Call<I> {
    pub fn new(intent: I, request: ApiRequest) -> Self {
        Self { intent, request }
    }
}
