use rocket::form::Form;
use rocket::http::Status;
use rocket::response::{self, status, Flash, Redirect, Responder};
use rocket::serde::json::{self, Json};
use rocket::{Request, State};
use rocket_dyn_templates::context;
use serde::{Deserialize, Serialize};

use crate::controllers::parse_id;
use crate::entities::todo;
use crate::errors::{AppError, JsonError};
use crate::repositories::{NewTodo, TodoChanges};
use crate::services::TodoInteractor;
use crate::validation::{parse_form_date, TodoFormValidation};
use crate::views::app_template::AppTemplate;
use crate::views::todo::{input_value, TodoView};

/// TODOフォームのデータ構造。
/// Djangoの `forms.ModelForm` に相当。HTMLフォームとJSONの両方から受け取ります。
#[derive(Debug, Clone, Default, FromForm, Deserialize, Serialize)]
pub struct TodoForm {
    #[field(default = String::new())]
    #[serde(default)]
    pub title: String,
    #[field(default = String::new())]
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed_date: Option<String>,
}

impl TodoForm {
    /// 編集フォームの初期値
    fn from_model(model: &todo::Model) -> Self {
        Self {
            title: model.title.clone(),
            content: model.content.clone(),
            due_date: model.due_date.as_ref().map(input_value),
            completed_date: model.completed_date.as_ref().map(input_value),
        }
    }

    fn validate_fields(&self) -> Vec<String> {
        TodoFormValidation::new(&self.title, &self.content)
            .validate_form()
            .err()
            .unwrap_or_default()
    }

    fn to_new_todo(&self) -> Result<NewTodo, Vec<String>> {
        let mut errors = self.validate_fields();
        let due_date = collect_date(&mut errors, "due_date", self.due_date.as_deref());

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewTodo {
            title: self.title.trim().to_owned(),
            content: self.content.trim().to_owned(),
            due_date,
        })
    }

    /// 空欄の日付は NULL にする (変更なし ではない)
    fn to_changes(&self) -> Result<TodoChanges, Vec<String>> {
        let mut errors = self.validate_fields();
        let due_date = collect_date(&mut errors, "due_date", self.due_date.as_deref());
        let completed_date =
            collect_date(&mut errors, "completed_date", self.completed_date.as_deref());

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(TodoChanges {
            title: self.title.trim().to_owned(),
            content: self.content.trim().to_owned(),
            due_date,
            completed_date,
        })
    }
}

fn collect_date(
    errors: &mut Vec<String>,
    field: &str,
    raw: Option<&str>,
) -> Option<chrono::DateTime<chrono::Utc>> {
    match parse_form_date(field, raw) {
        Ok(date) => date,
        Err(e) => {
            errors.push(e.public_message());
            None
        }
    }
}

/// フォーム送信が失敗したときのレスポンス。
/// 入力エラーはフォームを 400 で再表示し、それ以外は [`AppError`] に任せます。
pub enum FormRejection {
    Invalid(AppTemplate),
    Failed(AppError),
}

impl From<AppError> for FormRejection {
    fn from(e: AppError) -> Self {
        FormRejection::Failed(e)
    }
}

impl<'r> Responder<'r, 'static> for FormRejection {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        match self {
            FormRejection::Invalid(template) => (Status::BadRequest, template).respond_to(request),
            FormRejection::Failed(error) => error.respond_to(request),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub ok: bool,
    pub status: String,
    pub has_completed: bool,
}

/// TODO一覧を表示。
/// Djangoの `ListView` に相当します。
#[get("/")]
pub async fn list_todos(interactor: &State<TodoInteractor>) -> Result<AppTemplate, AppError> {
    let todos = interactor.list_todos().await?;
    let has_completed = todos.iter().any(|t| t.is_done());
    let todos: Vec<TodoView> = todos.iter().map(TodoView::from).collect();

    Ok(AppTemplate::new("todos/list", context! {
        todos: todos,
        has_completed: has_completed,
    }))
}

/// TODO作成フォーム (GET)
#[get("/new")]
pub fn new_todo_form() -> AppTemplate {
    AppTemplate::new("todos/new", context! {
        form: TodoForm::default(),
        errors: Vec::<String>::new(),
    })
}

/// TODO作成処理 (POST, HTMLフォーム)
#[post("/new", format = "form", data = "<form>")]
pub async fn create_todo(
    interactor: &State<TodoInteractor>,
    form: Form<TodoForm>,
) -> Result<Flash<Redirect>, FormRejection> {
    let form = form.into_inner();
    let new_todo = match form.to_new_todo() {
        Ok(new_todo) => new_todo,
        Err(errors) => {
            return Err(FormRejection::Invalid(AppTemplate::new("todos/new", context! {
                form: form,
                errors: errors,
            })));
        }
    };

    interactor.create_todo(new_todo).await?;

    Ok(Flash::success(Redirect::to("/todos"), "TODOを作成しました"))
}

/// TODO作成処理 (POST, JSON)。作成したTODOを 201 で返します。
#[post("/new", format = "json", data = "<payload>")]
pub async fn create_todo_json(
    interactor: &State<TodoInteractor>,
    payload: Result<Json<TodoForm>, json::Error<'_>>,
) -> Result<status::Created<Json<todo::Model>>, JsonError> {
    let payload = payload.map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))?;
    let new_todo = payload
        .to_new_todo()
        .map_err(|errors| AppError::BadRequest(errors.join("; ")))?;

    let created = interactor.create_todo(new_todo).await?;
    let location = format!("/todos/{}", created.id);

    Ok(status::Created::new(location).body(Json(created)))
}

/// TODO詳細
#[get("/<id>")]
pub async fn todo_detail(interactor: &State<TodoInteractor>, id: &str) -> Result<AppTemplate, AppError> {
    let id = parse_id(id)?;
    let todo = interactor.get_todo(id).await?;

    Ok(AppTemplate::new("todos/detail", context! {
        todo: TodoView::from(&todo),
    }))
}

/// TODO編集フォーム (GET)
#[get("/<id>/edit")]
pub async fn edit_todo_form(interactor: &State<TodoInteractor>, id: &str) -> Result<AppTemplate, AppError> {
    let id = parse_id(id)?;
    let todo = interactor.get_todo(id).await?;

    Ok(AppTemplate::new("todos/edit", context! {
        id: id,
        form: TodoForm::from_model(&todo),
        errors: Vec::<String>::new(),
    }))
}

/// TODO更新処理 (POST, HTMLフォーム)
#[post("/<id>/update", format = "form", data = "<form>")]
pub async fn update_todo(
    interactor: &State<TodoInteractor>,
    id: &str,
    form: Form<TodoForm>,
) -> Result<Flash<Redirect>, FormRejection> {
    let id = parse_id(id)?;
    let form = form.into_inner();
    let changes = match form.to_changes() {
        Ok(changes) => changes,
        Err(errors) => {
            // 存在しないIDなら入力エラーより 404 を優先
            interactor.get_todo(id).await?;
            return Err(FormRejection::Invalid(AppTemplate::new("todos/edit", context! {
                id: id,
                form: form,
                errors: errors,
            })));
        }
    };

    interactor.update_todo(id, changes).await?;

    Ok(Flash::success(Redirect::to(format!("/todos/{}", id)), "TODOを更新しました"))
}

/// TODO更新処理 (POST, JSON)。更新後のTODOを返します。
#[post("/<id>/update", format = "json", data = "<payload>")]
pub async fn update_todo_json(
    interactor: &State<TodoInteractor>,
    id: &str,
    payload: Result<Json<TodoForm>, json::Error<'_>>,
) -> Result<Json<todo::Model>, JsonError> {
    let id = parse_id(id)?;
    let payload = payload.map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))?;
    let changes = match payload.to_changes() {
        Ok(changes) => changes,
        Err(errors) => {
            interactor.get_todo(id).await?;
            return Err(AppError::BadRequest(errors.join("; ")).into());
        }
    };

    let updated = interactor.update_todo(id, changes).await?;

    Ok(Json(updated))
}

/// TODO削除処理 (POST)。存在しないIDは 404。
#[post("/<id>/delete")]
pub async fn delete_todo(interactor: &State<TodoInteractor>, id: &str) -> Result<Flash<Redirect>, AppError> {
    let id = parse_id(id)?;
    interactor.delete_todo(id).await?;

    Ok(Flash::success(Redirect::to("/todos"), "TODOを削除しました"))
}

/// 完了済みTODOの一括削除 (POST)
#[post("/bulk-delete")]
pub async fn bulk_delete_todos(interactor: &State<TodoInteractor>) -> Result<Flash<Redirect>, AppError> {
    let removed = interactor.bulk_delete_todos().await?;

    Ok(Flash::success(
        Redirect::to("/todos"),
        format!("完了済みのTODOを{}件削除しました", removed),
    ))
}

/// 完了/未完了の切り替え (fetch からの PUT)
#[put("/<id>/status", data = "<body>")]
pub async fn update_status(
    interactor: &State<TodoInteractor>,
    id: &str,
    body: Result<Json<StatusRequest>, json::Error<'_>>,
) -> Result<Json<StatusResponse>, JsonError> {
    let id = parse_id(id)?;
    let body = body.map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))?;

    let updated = interactor.update_status(id, &body.status).await?;
    let has_completed = interactor.has_completed().await?;

    Ok(Json(StatusResponse {
        ok: true,
        status: updated.status.as_str().to_owned(),
        has_completed,
    }))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        list_todos,
        new_todo_form,
        create_todo,
        create_todo_json,
        todo_detail,
        edit_todo_form,
        update_todo,
        update_todo_json,
        delete_todo,
        bulk_delete_todos,
        update_status,
    ]
}
