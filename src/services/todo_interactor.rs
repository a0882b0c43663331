use chrono::Utc;

use crate::entities::todo::{self, TodoStatus};
use crate::errors::AppError;
use crate::repositories::{NewTodo, TodoChanges, TodoRepository};

/// TODOのユースケースを集約するサービス。
/// ほぼリポジトリへの委譲で、唯一の業務ルールはステータス文字列の解釈です。
#[derive(Debug, Clone)]
pub struct TodoInteractor {
    repository: TodoRepository,
}

impl TodoInteractor {
    pub fn new(repository: TodoRepository) -> Self {
        Self { repository }
    }

    pub async fn list_todos(&self) -> Result<Vec<todo::Model>, AppError> {
        self.repository.list_all().await
    }

    pub async fn get_todo(&self, id: i32) -> Result<todo::Model, AppError> {
        self.repository.get_by_id(id).await
    }

    pub async fn create_todo(&self, new_todo: NewTodo) -> Result<todo::Model, AppError> {
        let created = self.repository.create(new_todo).await?;
        tracing::info!("created todo {}", created.id);
        Ok(created)
    }

    pub async fn update_todo(&self, id: i32, changes: TodoChanges) -> Result<todo::Model, AppError> {
        let updated = self.repository.update(id, changes).await?;
        tracing::info!("updated todo {}", id);
        Ok(updated)
    }

    pub async fn delete_todo(&self, id: i32) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        tracing::info!("deleted todo {}", id);
        Ok(())
    }

    /// 完了済みのTODOを一括削除し、削除件数を返します。
    pub async fn bulk_delete_todos(&self) -> Result<u64, AppError> {
        let removed = self.repository.bulk_delete_completed().await?;
        tracing::info!("bulk-deleted {} completed todos", removed);
        Ok(removed)
    }

    /// ステータスを更新します。
    /// `"done"` なら現在時刻で完了、`"undone"` なら完了日時をクリア、それ以外は InvalidArgument。
    pub async fn update_status(&self, id: i32, status: &str) -> Result<todo::Model, AppError> {
        let updated = match status.parse::<TodoStatus>()? {
            TodoStatus::Done => self.repository.set_completed_at(id, Utc::now()).await?,
            TodoStatus::Undone => self.repository.clear_completed_at(id).await?,
        };
        tracing::info!("todo {} is now {}", id, updated.status.as_str());
        Ok(updated)
    }

    pub async fn has_completed(&self) -> Result<bool, AppError> {
        self.repository.has_completed().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::set_up_test_db;

    async fn interactor() -> TodoInteractor {
        TodoInteractor::new(TodoRepository::new(set_up_test_db().await))
    }

    async fn seed(interactor: &TodoInteractor, title: &str) -> todo::Model {
        interactor
            .create_todo(NewTodo {
                title: title.to_owned(),
                content: "content".to_owned(),
                due_date: None,
            })
            .await
            .unwrap()
    }

    #[rocket::async_test]
    async fn test_status_done_then_undone() {
        let interactor = interactor().await;
        let todo = seed(&interactor, "stretch").await;

        let done = interactor.update_status(todo.id, "done").await.unwrap();
        assert!(done.completed_date.is_some());
        assert_eq!(done.status, TodoStatus::Done);

        let undone = interactor.update_status(todo.id, "undone").await.unwrap();
        assert!(undone.completed_date.is_none());
        assert_eq!(undone.status, TodoStatus::Undone);
    }

    #[rocket::async_test]
    async fn test_unknown_status_leaves_record_unchanged() {
        let interactor = interactor().await;
        let todo = seed(&interactor, "stretch").await;
        interactor.update_status(todo.id, "done").await.unwrap();
        let before = interactor.get_todo(todo.id).await.unwrap();

        let result = interactor.update_status(todo.id, "maybe").await;
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));

        let after = interactor.get_todo(todo.id).await.unwrap();
        assert_eq!(before, after);
    }

    #[rocket::async_test]
    async fn test_status_on_unknown_id_is_not_found() {
        let interactor = interactor().await;
        assert!(matches!(
            interactor.update_status(77, "done").await,
            Err(AppError::NotFound)
        ));
    }

    #[rocket::async_test]
    async fn test_bulk_delete_with_mixed_fixture() {
        let interactor = interactor().await;
        for i in 0..5 {
            let todo = seed(&interactor, &format!("task {i}")).await;
            if i % 2 == 0 {
                interactor.update_status(todo.id, "done").await.unwrap();
            }
        }
        assert!(interactor.has_completed().await.unwrap());

        assert_eq!(interactor.bulk_delete_todos().await.unwrap(), 3);

        let remaining = interactor.list_todos().await.unwrap();
        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|t| t.completed_date.is_none()));
        assert!(!interactor.has_completed().await.unwrap());
    }
}
