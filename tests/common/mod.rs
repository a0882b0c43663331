#![allow(dead_code)]

use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use rocket::serde::json::serde_json::{json, Value};
use todo_board::build_rocket_with;
use todo_board::config::DatabaseConfig;

/// テストごとに独立したインメモリSQLiteでアプリを起動します。
pub fn setup() -> Client {
    let rocket = build_rocket_with(DatabaseConfig::new("sqlite::memory:")).expect("rocket builds");
    Client::tracked(rocket).expect("valid rocket instance")
}

/// JSONでTODOを作成し、作成されたTODOを返します。
pub fn create_todo(client: &Client, title: &str, content: &str, due_date: Option<&str>) -> Value {
    let response = client
        .post("/todos/new")
        .header(ContentType::JSON)
        .body(json!({ "title": title, "content": content, "due_date": due_date }).to_string())
        .dispatch();
    assert_eq!(response.status(), Status::Created);
    response.into_json::<Value>().expect("created todo")
}

pub fn todo_id(todo: &Value) -> i64 {
    todo["id"].as_i64().expect("numeric id")
}

pub fn fetch_todo(client: &Client, id: i64) -> (Status, Value) {
    let response = client.get(format!("/api/todos/{}", id)).dispatch();
    let status = response.status();
    (status, response.into_json::<Value>().unwrap_or(Value::Null))
}

pub fn set_status(client: &Client, id: i64, status: &str) -> (Status, Value) {
    let response = client
        .put(format!("/todos/{}/status", id))
        .header(ContentType::JSON)
        .body(json!({ "status": status }).to_string())
        .dispatch();
    let code = response.status();
    (code, response.into_json::<Value>().unwrap_or(Value::Null))
}
