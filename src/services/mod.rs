pub mod article_interactor;
pub mod todo_interactor;

pub use article_interactor::ArticleInteractor;
pub use todo_interactor::TodoInteractor;
