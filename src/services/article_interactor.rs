use crate::entities::article::Article;
use crate::repositories::ArticleRepository;

#[derive(Debug, Clone, Default)]
pub struct ArticleInteractor {
    repository: ArticleRepository,
}

impl ArticleInteractor {
    pub fn new(repository: ArticleRepository) -> Self {
        Self { repository }
    }

    pub fn all_articles(&self) -> Vec<Article> {
        self.repository.find_all()
    }
}
