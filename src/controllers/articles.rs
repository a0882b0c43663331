use rocket::serde::json::Json;
use rocket::State;

use crate::entities::article::Article;
use crate::services::ArticleInteractor;

/// 記事一覧 (初期版のデモ)
#[get("/articles")]
pub fn list_articles(interactor: &State<ArticleInteractor>) -> Json<Vec<Article>> {
    Json(interactor.all_articles())
}

pub fn routes() -> Vec<rocket::Route> {
    routes![list_articles]
}
