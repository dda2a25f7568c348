//! Rows of a rendered table, replaced wholesale on every load.

use serde_json::Value;

use super::spec::Record;
use crate::error::{AppError, Result};

/// The last successfully loaded rows of one table.
#[derive(Debug, Clone)]
pub struct RecordTable<R> {
    rows: Vec<R>,
    error: Option<String>,
    inline_error: bool,
}

impl<R: Record> Default for RecordTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> RecordTable<R> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            error: None,
            inline_error: false,
        }
    }

    /// On load failure, drop the rows and keep the error message for an inline row.
    pub fn with_inline_error(mut self) -> Self {
        self.inline_error = true;
        self
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Message for the inline error row, if the last load failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Cell texts of every row, in row order.
    pub fn cell_rows(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(Record::cells).collect()
    }

    /// Apply a load reply.
    ///
    /// A reply that is not a list of `R` counts as a failure. On success the
    /// rows are replaced in response order and the row count is returned.
    pub fn apply(&mut self, result: Result<Value>) -> Result<usize> {
        let decoded = result.and_then(|value| {
            if !value.is_array() {
                return Err(AppError::decode(format!("expected a list, got {}", kind_of(&value))));
            }
            serde_json::from_value::<Vec<R>>(value).map_err(AppError::from)
        });

        match decoded {
            Ok(rows) => {
                self.rows = rows;
                self.error = None;
                Ok(self.rows.len())
            }
            Err(e) => {
                if self.inline_error {
                    self.rows.clear();
                    self.error = Some(e.to_string());
                }
                Err(e)
            }
        }
    }

    /// Forget all rows, e.g. when the selection the table depends on changes.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.error = None;
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "nothing",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, Deserialize)]
    struct Row {
        n: i64,
    }

    impl Record for Row {
        const COLUMNS: &'static [&'static str] = &["N"];

        fn cells(&self) -> Vec<String> {
            vec![self.n.to_string()]
        }
    }

    fn failure() -> AppError {
        AppError::Status {
            status: StatusCode::BAD_GATEWAY,
            message: "Bad Gateway".to_string(),
        }
    }

    #[test]
    fn test_rows_follow_response_order() {
        let mut table = RecordTable::<Row>::new();
        let count = table.apply(Ok(json!([{"n": 3}, {"n": 1}, {"n": 2}]))).unwrap();
        assert_eq!(count, 3);
        assert_eq!(table.cell_rows(), vec![vec!["3"], vec!["1"], vec!["2"]]);
    }

    #[test]
    fn test_reload_replaces_rows() {
        let mut table = RecordTable::<Row>::new();
        table.apply(Ok(json!([{"n": 1}, {"n": 2}]))).unwrap();
        table.apply(Ok(json!([{"n": 9}]))).unwrap();
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.rows()[0].n, 9);
    }

    #[test]
    fn test_failure_keeps_rows_by_default() {
        let mut table = RecordTable::<Row>::new();
        table.apply(Ok(json!([{"n": 1}]))).unwrap();
        assert!(table.apply(Err(failure())).is_err());
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.error(), None);
    }

    #[test]
    fn test_inline_error_replaces_rows() {
        let mut table = RecordTable::<Row>::new().with_inline_error();
        table.apply(Ok(json!([{"n": 1}]))).unwrap();
        assert!(table.apply(Err(failure())).is_err());
        assert!(table.rows().is_empty());
        assert_eq!(table.error(), Some("HTTP 502 Bad Gateway: Bad Gateway"));
    }

    #[test]
    fn test_non_array_reply_is_failure() {
        let mut table = RecordTable::<Row>::new().with_inline_error();
        let err = table.apply(Ok(json!({"error": "nope"}))).unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
        assert!(table.error().is_some());
    }

    #[test]
    fn test_success_clears_inline_error() {
        let mut table = RecordTable::<Row>::new().with_inline_error();
        let _ = table.apply(Err(failure()));
        table.apply(Ok(json!([]))).unwrap();
        assert_eq!(table.error(), None);
    }
}
