use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::*;

use crate::entities::prelude::*;
use crate::entities::todo::{self, TodoStatus};
use crate::errors::AppError;

/// 新規作成用の入力値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub content: String,
    pub due_date: Option<DateTime<Utc>>,
}

/// 更新用の入力値。
/// `None` の日付は「変更なし」ではなく「NULLにする」を意味します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: String,
    pub content: String,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
}

/// TODOテーブルへのアクセスを担当するリポジトリ。
/// Djangoの Manager / QuerySet に相当します。
///
/// 削除はすべて論理削除です。`deleted_at` が入った行はどのメソッドからも見えません。
#[derive(Debug, Clone)]
pub struct TodoRepository {
    db: DatabaseConnection,
}

impl TodoRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// 論理削除されていないTODO (Django: Todo.objects.filter(deleted_at__isnull=True))
    fn live() -> Select<Todo> {
        Todo::find().filter(todo::Column::DeletedAt.is_null())
    }

    /// 全件取得。作成日時の昇順、同時刻ならID順。
    pub async fn list_all(&self) -> Result<Vec<todo::Model>, AppError> {
        Self::live()
            .order_by_asc(todo::Column::CreatedAt)
            .order_by_asc(todo::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// IDで取得 (Django: get_object_or_404)
    pub async fn get_by_id(&self, id: i32) -> Result<todo::Model, AppError> {
        Self::live()
            .filter(todo::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn create(&self, new_todo: NewTodo) -> Result<todo::Model, AppError> {
        let active_model = todo::ActiveModel {
            title: Set(new_todo.title),
            content: Set(new_todo.content),
            due_date: Set(new_todo.due_date),
            completed_date: Set(None),
            status: Set(TodoStatus::Undone),
            created_at: Set(Utc::now()),
            deleted_at: Set(None),
            ..Default::default()
        };

        active_model.insert(&self.db).await.map_err(AppError::Database)
    }

    /// 既存レコードの全ての可変項目を保存します。
    pub async fn update(&self, id: i32, changes: TodoChanges) -> Result<todo::Model, AppError> {
        let existing = self.get_by_id(id).await?;

        let mut active_model: todo::ActiveModel = existing.into();
        active_model.title = Set(changes.title);
        active_model.content = Set(changes.content);
        active_model.due_date = Set(changes.due_date);
        active_model.status = Set(TodoStatus::from_completed_date(changes.completed_date.as_ref()));
        active_model.completed_date = Set(changes.completed_date);

        active_model.update(&self.db).await.map_err(update_error)
    }

    /// 1件を論理削除します。存在しない (削除済みを含む) IDは NotFound。
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let existing = self.get_by_id(id).await?;

        let mut active_model: todo::ActiveModel = existing.into();
        active_model.deleted_at = Set(Some(Utc::now()));
        active_model.update(&self.db).await.map_err(update_error)?;

        Ok(())
    }

    /// 完了済みのTODOをまとめて論理削除し、件数を返します。
    pub async fn bulk_delete_completed(&self) -> Result<u64, AppError> {
        let result = Todo::update_many()
            .col_expr(todo::Column::DeletedAt, Expr::value(Utc::now()))
            .filter(todo::Column::Status.eq(TodoStatus::Done))
            .filter(todo::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// 完了日時をセットして done にします。他の項目には触れません。
    pub async fn set_completed_at(
        &self,
        id: i32,
        completed_at: DateTime<Utc>,
    ) -> Result<todo::Model, AppError> {
        self.set_completion(id, Some(completed_at)).await
    }

    /// 完了日時をNULLにして undone に戻します。
    pub async fn clear_completed_at(&self, id: i32) -> Result<todo::Model, AppError> {
        self.set_completion(id, None).await
    }

    async fn set_completion(
        &self,
        id: i32,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<todo::Model, AppError> {
        let existing = self.get_by_id(id).await?;

        let mut active_model: todo::ActiveModel = existing.into();
        active_model.status = Set(TodoStatus::from_completed_date(completed_at.as_ref()));
        active_model.completed_date = Set(completed_at);

        active_model.update(&self.db).await.map_err(update_error)
    }

    /// 完了済みのTODOが1件でもあるか
    pub async fn has_completed(&self) -> Result<bool, AppError> {
        let count = Self::live()
            .filter(todo::Column::Status.eq(TodoStatus::Done))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }
}

// 取得と更新の間に行が消えた場合
fn update_error(e: DbErr) -> AppError {
    match e {
        DbErr::RecordNotUpdated => AppError::NotFound,
        other => AppError::Database(other),
    }
}
