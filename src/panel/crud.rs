//! Generic table-plus-form panel for one entity.
//!
//! The panel is pure state. Operations that need the backend return a
//! [`Call`]; the caller executes it and feeds the outcome back through
//! [`CrudPanel::handle`], which may ask for a follow-up call (the reload after
//! a mutation).

use serde_json::Value;
use tracing::debug;

use super::form::FormState;
use super::spec::{Entity, EntitySpec};
use super::table::RecordTable;
use super::Call;
use crate::api::request::{ApiRequest, item_path};
use crate::error::Result;
use crate::notify::Notifier;

/// What an issued request was for, so its reply can be routed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudIntent {
    Load,
    Fetch,
    Save,
    Delete,
}

/// A delete waiting for the user's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: i64,
    pub label: String,
}

/// Table and form for one entity type.
pub struct CrudPanel<E: Entity> {
    table: RecordTable<E>,
    form: FormState,
    form_open: bool,
    pending_delete: Option<PendingDelete>,
    confirm_deletes: bool,
}

impl<E: Entity> Default for CrudPanel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> CrudPanel<E> {
    pub fn new() -> Self {
        Self {
            table: RecordTable::new(),
            form: FormState::new(E::SPEC.fields),
            form_open: false,
            pending_delete: None,
            confirm_deletes: true,
        }
    }

    pub fn spec(&self) -> &'static EntitySpec {
        E::SPEC
    }

    pub fn table(&self) -> &RecordTable<E> {
        &self.table
    }

    pub fn rows(&self) -> &[E] {
        self.table.rows()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    /// Skip the confirmation step when disabled.
    pub fn set_confirm_deletes(&mut self, confirm: bool) {
        self.confirm_deletes = confirm;
    }

    /// Fetch the whole collection.
    pub fn load(&self) -> Call<CrudIntent> {
        Call::new(CrudIntent::Load, ApiRequest::get(E::SPEC.collection))
    }

    pub fn show_form(&mut self) {
        self.form_open = true;
    }

    /// Close the form and clear every field.
    pub fn hide_form(&mut self) {
        self.form_open = false;
        self.form.clear();
    }

    /// Create or update from the form contents.
    ///
    /// A blank identifier means create (`POST {collection}`), anything else
    /// updates (`PUT {collection}/{id}`). Returns `None` when a required field
    /// is empty.
    pub fn submit(&mut self, notifier: &mut Notifier) -> Option<Call<CrudIntent>> {
        let missing = self.form.missing_required();
        if !missing.is_empty() {
            notifier.error(format!("{} is required", missing.join(", ")));
            return None;
        }

        let payload = self.form.payload();
        let id = self.form.id.trim();
        let request = if id.is_empty() {
            ApiRequest::post(E::SPEC.collection)
        } else {
            ApiRequest::put(item_path(E::SPEC.collection, id))
        };

        Some(Call::new(CrudIntent::Save, request.json(payload)))
    }

    /// Fetch one record to fill the form.
    pub fn edit(&self, id: i64) -> Call<CrudIntent> {
        Call::new(CrudIntent::Fetch, ApiRequest::get(item_path(E::SPEC.collection, id)))
    }

    /// Start deleting a record.
    ///
    /// With confirmation enabled this only records the request and returns
    /// `None`; [`CrudPanel::confirm_delete`] resolves it.
    pub fn delete(&mut self, id: i64) -> Option<Call<CrudIntent>> {
        if !self.confirm_deletes {
            return Some(Self::delete_call(id));
        }

        let label = self
            .rows()
            .iter()
            .find(|row| row.id() == id)
            .map(Entity::label)
            .unwrap_or_else(|| format!("#{id}"));
        self.pending_delete = Some(PendingDelete { id, label });
        None
    }

    /// Resolve a pending delete. Declining issues nothing.
    pub fn confirm_delete(&mut self, confirmed: bool) -> Option<Call<CrudIntent>> {
        let pending = self.pending_delete.take()?;
        confirmed.then(|| Self::delete_call(pending.id))
    }

    fn delete_call(id: i64) -> Call<CrudIntent> {
        Call::new(CrudIntent::Delete, ApiRequest::delete(item_path(E::SPEC.collection, id)))
    }

    /// Apply the outcome of a call issued by this panel.
    ///
    /// Mutations that reached the backend are always followed by a reload,
    /// whether or not the backend accepted them; only a request that never
    /// completed skips it.
    pub fn handle(
        &mut self,
        intent: CrudIntent,
        result: Result<Value>,
        notifier: &mut Notifier,
    ) -> Option<Call<CrudIntent>> {
        let spec = E::SPEC;
        let plural = spec.plural.to_lowercase();
        let singular = spec.singular.to_lowercase();
        match intent {
            CrudIntent::Load => {
                match self.table.apply(result) {
                    Ok(count) => debug!("Loaded {count} {plural}"),
                    Err(e) => notifier.error(format!("Failed to load {plural}: {e}")),
                }
                None
            }
            CrudIntent::Fetch => {
                match result {
                    Ok(record) if record.is_object() => {
                        self.form.populate(spec.id_field, &record);
                        self.show_form();
                    }
                    Ok(_) => {
                        notifier.error(format!("Failed to load {singular}: unexpected response"))
                    }
                    Err(e) => notifier.error(format!("Failed to load {singular}: {e}")),
                }
                None
            }
            CrudIntent::Save => match result {
                Ok(_) => {
                    notifier.success(format!("{} saved", spec.singular));
                    self.hide_form();
                    Some(self.load())
                }
                Err(e) if e.is_transport() => {
                    notifier.error(format!("Failed to save {singular}: {e}"));
                    None
                }
                Err(e) => {
                    notifier.error(format!("Failed to save {singular}: {e}"));
                    self.hide_form();
                    Some(self.load())
                }
            },
            CrudIntent::Delete => match result {
                Ok(_) => {
                    notifier.success(format!("{} deleted", spec.singular));
                    Some(self.load())
                }
                Err(e) => {
                    notifier.error(format!("Failed to delete {singular}: {e}"));
                    (!e.is_transport()).then(|| self.load())
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::api::Method;
    use crate::error::AppError;
    use crate::models::{Department, Employee};
    use crate::notify::NoticeKind;
    use reqwest::StatusCode;
    use serde_json::json;

    fn status_error() -> AppError {
        AppError::Status {
            status: StatusCode::BAD_REQUEST,
            message: "Bad Request".to_string(),
        }
    }

    fn transport_error() -> AppError {
        AppError::from(reqwest::Client::new().get("not a url").build().unwrap_err())
    }

    fn last_notice(notifier: &Notifier) -> (String, NoticeKind) {
        let notice = notifier.current(Instant::now()).expect("a notification");
        (notice.message.clone(), notice.kind)
    }

    #[test]
    fn test_load_renders_one_row_per_item() {
        let mut panel = CrudPanel::<Employee>::new();
        let mut notifier = Notifier::default();

        let call = panel.load();
        assert_eq!(call.request, ApiRequest::get("/api/employees"));

        let reply = json!([{
            "employeeId": 1,
            "employeeName": "Ann",
            "employeeEmail": "a@x.com",
            "employeeJoinDate": "2023-01-05"
        }]);
        assert!(panel.handle(call.intent, Ok(reply), &mut notifier).is_none());

        let rows = panel.table().cell_rows();
        assert_eq!(rows, [["1", "Ann", "a@x.com", "Jan 5, 2023"]]);
    }

    #[test]
    fn test_load_failure_notifies_and_keeps_rows() {
        let mut panel = CrudPanel::<Department>::new();
        let mut notifier = Notifier::default();
        let rows = json!([{"departmentId": 1, "departmentName": "Ops"}]);
        panel.handle(CrudIntent::Load, Ok(rows), &mut notifier);

        panel.handle(CrudIntent::Load, Err(status_error()), &mut notifier);
        assert_eq!(panel.rows().len(), 1);
        assert_eq!(last_notice(&notifier).1, NoticeKind::Error);
    }

    #[test]
    fn test_hide_form_clears_fields() {
        let mut panel = CrudPanel::<Employee>::new();
        panel.show_form();
        panel.form_mut().id = "7".to_string();
        panel.form_mut().set("employeeName", "Ann");
        panel.form_mut().set("employeeEmail", "a@x.com");
        panel.form_mut().set("employeeJoinDate", "2023-01-05");
        panel.form_mut().set("departmentId", "2");
        panel.form_mut().set("positionId", "3");

        panel.hide_form();
        assert!(!panel.is_form_open());
        assert!(panel.form().is_blank());
    }

    #[test]
    fn test_submit_without_id_posts_to_collection() {
        let mut panel = CrudPanel::<Employee>::new();
        let mut notifier = Notifier::default();
        panel.form_mut().set("employeeName", "Bo");

        let call = panel.submit(&mut notifier).unwrap();
        assert_eq!(call.intent, CrudIntent::Save);
        assert_eq!(call.request.method, Method::POST);
        assert_eq!(call.request.path, "/api/employees");
        let body = call.request.body.unwrap();
        assert_eq!(body["employeeName"], json!("Bo"));
        assert!(body.get("employeeId").is_none());
    }

    #[test]
    fn test_submit_with_id_puts_to_item() {
        let mut panel = CrudPanel::<Employee>::new();
        let mut notifier = Notifier::default();
        panel.form_mut().id = "7".to_string();
        panel.form_mut().set("employeeName", "Bo");

        let call = panel.submit(&mut notifier).unwrap();
        assert_eq!(call.request.method, Method::PUT);
        assert_eq!(call.request.path, "/api/employees/7");
    }

    #[test]
    fn test_submit_requires_name() {
        let mut panel = CrudPanel::<Department>::new();
        let mut notifier = Notifier::default();
        assert!(panel.submit(&mut notifier).is_none());
        assert_eq!(last_notice(&notifier), ("Name is required".to_string(), NoticeKind::Error));
    }

    #[test]
    fn test_save_success_hides_form_and_reloads() {
        let mut panel = CrudPanel::<Department>::new();
        let mut notifier = Notifier::default();
        panel.show_form();
        panel.form_mut().set("departmentName", "Ops");

        let reply = json!({"departmentId": 5});
        let follow_up = panel.handle(CrudIntent::Save, Ok(reply), &mut notifier);
        assert_eq!(follow_up.map(|c| c.request), Some(ApiRequest::get("/api/departments")));
        assert!(!panel.is_form_open());
        assert!(panel.form().is_blank());
        assert_eq!(last_notice(&notifier).1, NoticeKind::Success);
    }

    #[test]
    fn test_save_rejected_still_reloads() {
        let mut panel = CrudPanel::<Department>::new();
        let mut notifier = Notifier::default();
        panel.show_form();

        let follow_up = panel.handle(CrudIntent::Save, Err(status_error()), &mut notifier);
        assert_eq!(follow_up.map(|c| c.intent), Some(CrudIntent::Load));
        assert!(!panel.is_form_open());
        assert_eq!(last_notice(&notifier).1, NoticeKind::Error);
    }

    #[test]
    fn test_save_transport_failure_keeps_form_open() {
        let mut panel = CrudPanel::<Department>::new();
        let mut notifier = Notifier::default();
        panel.show_form();
        panel.form_mut().set("departmentName", "Ops");

        assert!(panel.handle(CrudIntent::Save, Err(transport_error()), &mut notifier).is_none());
        assert!(panel.is_form_open());
        assert_eq!(panel.form().get("departmentName"), "Ops");
    }

    #[test]
    fn test_edit_populates_and_opens_form() {
        let mut panel = CrudPanel::<Employee>::new();
        let mut notifier = Notifier::default();

        let call = panel.edit(1);
        assert_eq!(call.request, ApiRequest::get("/api/employees/1"));

        let reply = json!({
            "employeeId": 1,
            "employeeName": "Ann",
            "employeeEmail": "a@x.com",
            "employeeJoinDate": "2023-01-05T00:00:00.000+00:00",
            "departmentId": 2,
            "positionId": 3
        });
        panel.handle(call.intent, Ok(reply), &mut notifier);

        assert!(panel.is_form_open());
        let form = panel.form();
        assert_eq!(form.id, "1");
        assert_eq!(form.get("employeeName"), "Ann");
        assert_eq!(form.get("employeeJoinDate"), "2023-01-05");
        assert_eq!(form.get("departmentId"), "2");
        assert_eq!(form.get("positionId"), "3");
    }

    #[test]
    fn test_edit_failure_leaves_form_closed() {
        let mut panel = CrudPanel::<Employee>::new();
        let mut notifier = Notifier::default();
        panel.handle(CrudIntent::Fetch, Err(status_error()), &mut notifier);
        assert!(!panel.is_form_open());
        assert_eq!(last_notice(&notifier).1, NoticeKind::Error);
    }

    #[test]
    fn test_declined_delete_issues_nothing() {
        let mut panel = CrudPanel::<Department>::new();
        assert!(panel.delete(4).is_none());
        assert_eq!(panel.pending_delete().map(|p| p.id), Some(4));

        assert!(panel.confirm_delete(false).is_none());
        assert!(panel.pending_delete().is_none());
    }

    #[test]
    fn test_confirmed_delete_then_reload() {
        let mut panel = CrudPanel::<Department>::new();
        let mut notifier = Notifier::default();
        let rows = json!([{"departmentId": 4, "departmentName": "Ops"}]);
        panel.handle(CrudIntent::Load, Ok(rows), &mut notifier);

        panel.delete(4);
        assert_eq!(panel.pending_delete().map(|p| p.label.as_str()), Some("Ops"));

        let call = panel.confirm_delete(true).unwrap();
        assert_eq!(call.request, ApiRequest::delete("/api/departments/4"));

        let follow_up = panel.handle(call.intent, Ok(Value::Null), &mut notifier);
        assert_eq!(follow_up.map(|c| c.request), Some(ApiRequest::get("/api/departments")));
    }

    #[test]
    fn test_delete_without_confirmation() {
        let mut panel = CrudPanel::<Department>::new();
        panel.set_confirm_deletes(false);
        let call = panel.delete(2).unwrap();
        assert_eq!(call.request.method, Method::DELETE);
        assert!(panel.pending_delete().is_none());
    }

    #[test]
    fn test_delete_transport_failure_skips_reload() {
        let mut panel = CrudPanel::<Department>::new();
        let mut notifier = Notifier::default();
        assert!(panel.handle(CrudIntent::Delete, Err(transport_error()), &mut notifier).is_none());
        assert!(panel.handle(CrudIntent::Delete, Err(status_error()), &mut notifier).is_some());
    }
}
