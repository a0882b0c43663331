use rocket::serde::json::Json;
use rocket::State;

use crate::controllers::parse_id;
use crate::entities::todo;
use crate::errors::JsonError;
use crate::services::TodoInteractor;

/// TODOをJSONで返します。
#[get("/todos/<id>")]
pub async fn get_todo(
    interactor: &State<TodoInteractor>,
    id: &str,
) -> Result<Json<todo::Model>, JsonError> {
    let id = parse_id(id)?;
    let todo = interactor.get_todo(id).await?;
    Ok(Json(todo))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![get_todo]
}
