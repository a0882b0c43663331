use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use validator::Validate;

use crate::errors::AppError;

/// フォームの日付形式 (HTMLの `datetime-local` と同じ)
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";
const DATE_FORMAT_WITH_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";
/// DATETIME 列に保存できる年の範囲
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1000..=9999;

/// TODO作成/編集フォームのバリデーション。
/// Djangoの `forms.ModelForm` + `clean_*` メソッドに相当。
#[derive(Debug, Validate)]
pub struct TodoFormValidation {
    #[validate(length(min = 1, max = 200, message = "タイトルは1〜200文字で入力してください"))]
    pub title: String,

    #[validate(length(min = 1, message = "内容は必須です"))]
    pub content: String,
}

impl TodoFormValidation {
    /// 前後の空白を除いた値で検証用構造体を作ります。
    pub fn new(title: &str, content: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            content: content.trim().to_string(),
        }
    }

    /// バリデーションを実行し、エラーメッセージを返す
    pub fn validate_form(&self) -> Result<(), Vec<String>> {
        match self.validate() {
            Ok(_) => Ok(()),
            Err(errors) => {
                let mut messages = Vec::new();
                for (field, field_errors) in errors.field_errors() {
                    for error in field_errors {
                        let msg = error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("{} が不正です", field));
                        messages.push(msg);
                    }
                }
                // field_errors() の順序は不定
                messages.sort();
                Err(messages)
            }
        }
    }
}

/// フォームの日付文字列を解釈します。
/// 未入力・空白は `None` (NULLとして保存)、形式が違えば BadRequest。
pub fn parse_form_date(field: &str, raw: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    let value = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(value) => value,
    };

    NaiveDateTime::parse_from_str(value, DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, DATE_FORMAT_WITH_SECONDS))
        .ok()
        .filter(|naive| YEAR_RANGE.contains(&naive.year()))
        .map(|naive| Some(naive.and_utc()))
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid {field}: expected format YYYY-MM-DDTHH:MM"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_valid_form() {
        let form = TodoFormValidation::new("Buy milk", "2 liters");
        assert!(form.validate_form().is_ok());
    }

    #[test]
    fn test_empty_title() {
        let form = TodoFormValidation::new("", "2 liters");
        let errors = form.validate_form().unwrap_err();
        assert_eq!(errors, vec!["タイトルは1〜200文字で入力してください".to_string()]);
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let form = TodoFormValidation::new("   ", "\n\t");
        assert_eq!(form.validate_form().unwrap_err().len(), 2);
    }

    #[test]
    fn test_title_too_long() {
        let form = TodoFormValidation::new(&"a".repeat(201), "content");
        assert!(form.validate_form().is_err());

        // 文字数で数える
        let form = TodoFormValidation::new(&"あ".repeat(200), "content");
        assert!(form.validate_form().is_ok());
    }

    #[test]
    fn test_blank_date_is_none() {
        assert_eq!(parse_form_date("due_date", None).unwrap(), None);
        assert_eq!(parse_form_date("due_date", Some("")).unwrap(), None);
        assert_eq!(parse_form_date("due_date", Some("  ")).unwrap(), None);
    }

    #[test]
    fn test_datetime_local_format() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 9, 18, 45, 0).unwrap();
        assert_eq!(
            parse_form_date("due_date", Some("2024-03-09T18:45")).unwrap(),
            Some(expected)
        );
        assert_eq!(
            parse_form_date("due_date", Some("2024-03-09T18:45:00")).unwrap(),
            Some(expected)
        );
    }

    #[test]
    fn test_dates_after_2038_are_accepted() {
        let expected = Utc.with_ymd_and_hms(2040, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            parse_form_date("due_date", Some("2040-01-01T00:00")).unwrap(),
            Some(expected)
        );
    }

    #[test]
    fn test_unparseable_date() {
        for raw in [
            "tomorrow",
            "2024-13-01T00:00",
            "2024/03/09 18:45",
            "2024-03-09",
            "0999-12-31T23:59",
            "10000-01-01T00:00",
        ] {
            let err = parse_form_date("due_date", Some(raw)).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(ref msg) if msg.contains("due_date")), "{raw}");
        }
    }
}
