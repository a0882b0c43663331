use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// TODOモデル。
/// Djangoの `models.Model` に相当します。
///
/// `status` と `completed_date` は常に一緒に更新します。
/// 完了済み (done) なら完了日時を持ち、未完了 (undone) なら持ちません。
/// `deleted_at` が入っている行は論理削除済みで、リポジトリのどのクエリからも見えません。
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// タイトル (必須、最大200文字)
    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    pub due_date: Option<DateTimeUtc>,

    pub completed_date: Option<DateTimeUtc>,

    pub status: TodoStatus,

    /// 作成日時 (INSERT時に一度だけ設定)
    pub created_at: DateTimeUtc,

    pub deleted_at: Option<DateTimeUtc>,
}

impl Model {
    pub fn is_done(&self) -> bool {
        self.status == TodoStatus::Done
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// TODOの完了状態。
/// Djangoの `TextChoices` に相当します。
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    #[sea_orm(string_value = "undone")]
    Undone,
    #[sea_orm(string_value = "done")]
    Done,
}

impl TodoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::Undone => "undone",
            TodoStatus::Done => "done",
        }
    }

    /// 完了日時の有無から導かれるステータス
    pub fn from_completed_date(completed_date: Option<&DateTimeUtc>) -> Self {
        if completed_date.is_some() {
            TodoStatus::Done
        } else {
            TodoStatus::Undone
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status `{}` (expected `done` or `undone`)", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for TodoStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "done" => Ok(TodoStatus::Done),
            "undone" => Ok(TodoStatus::Undone),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}
