use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::todo;
use crate::validation::DATE_FORMAT;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// テンプレート表示用のTODO。
/// 日付は表示用の文字列に整形済みです。
#[derive(Debug, Clone, Serialize)]
pub struct TodoView {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub status: &'static str,
    pub is_done: bool,
    pub due_date: Option<String>,
    pub completed_date: Option<String>,
    pub created_at: String,
}

impl From<&todo::Model> for TodoView {
    fn from(model: &todo::Model) -> Self {
        Self {
            id: model.id,
            title: model.title.clone(),
            content: model.content.clone(),
            status: model.status.as_str(),
            is_done: model.is_done(),
            due_date: model.due_date.as_ref().map(display_value),
            completed_date: model.completed_date.as_ref().map(display_value),
            created_at: display_value(&model.created_at),
        }
    }
}

pub fn display_value(date: &DateTime<Utc>) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// `<input type="datetime-local">` の value 属性に入れる文字列
pub fn input_value(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::todo::TodoStatus;
    use crate::validation::parse_form_date;
    use chrono::TimeZone;

    #[test]
    fn test_view_formats_dates() {
        let due = Utc.with_ymd_and_hms(2024, 7, 1, 8, 5, 0).unwrap();
        let model = todo::Model {
            id: 3,
            title: "Plan trip".into(),
            content: "Book hotel".into(),
            due_date: Some(due),
            completed_date: None,
            status: TodoStatus::Undone,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            deleted_at: None,
        };

        let view = TodoView::from(&model);
        assert_eq!(view.due_date.as_deref(), Some("2024-07-01 08:05"));
        assert_eq!(view.completed_date, None);
        assert_eq!(view.created_at, "2024-06-01 00:00");
        assert_eq!(view.status, "undone");
        assert!(!view.is_done);
    }

    #[test]
    fn test_input_value_parses_back() {
        let date = Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 0).unwrap();
        let raw = input_value(&date);
        assert_eq!(raw, "2025-01-31T23:59");
        assert_eq!(parse_form_date("due_date", Some(&raw)).unwrap(), Some(date));
    }
}
