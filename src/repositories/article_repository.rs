use crate::entities::article::Article;

/// 記事のリポジトリ。
/// DBは使わず、固定のデータを返します。
#[derive(Debug, Clone, Default)]
pub struct ArticleRepository;

impl ArticleRepository {
    pub fn find_all(&self) -> Vec<Article> {
        vec![Article {
            id: 1,
            title: "Deep Track".to_owned(),
        }]
    }
}
