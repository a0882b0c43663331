pub mod article_repository;
pub mod todo_repository;

pub use article_repository::ArticleRepository;
pub use todo_repository::{NewTodo, TodoChanges, TodoRepository};
