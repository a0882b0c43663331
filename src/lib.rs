#[macro_use]
extern crate rocket;

use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use rocket::fairing::AdHoc;
use rocket::fs::{relative, FileServer};
use rocket::http::Status;
use rocket::response::Redirect;
use rocket::{Build, Rocket};
use rocket_cors::{AllowedOrigins, Cors, CorsOptions};
use rocket_dyn_templates::Template;
use sea_orm::DatabaseConnection;

pub mod config;
pub mod controllers;
pub mod db;
pub mod entities;
pub mod errors;
pub mod fairings;
pub mod repositories;
pub mod services;
pub mod validation;
pub mod views;

use config::DatabaseConfig;
use fairings::context::ContextFairing;
use repositories::{ArticleRepository, TodoRepository};
use services::{ArticleInteractor, TodoInteractor};

/// Rocketインスタンスを構築する関数。
/// `.env` と環境変数からDB設定を読み込みます。
pub async fn build_rocket() -> anyhow::Result<Rocket<Build>> {
    // .envファイルを読み込む (環境変数の読み込み)
    dotenvy::dotenv().ok();

    let config = DatabaseConfig::from_env().context("failed to read database configuration")?;
    build_rocket_with(config)
}

/// DB設定を指定してRocketインスタンスを構築します。
/// テストではインメモリSQLiteを渡します。
pub fn build_rocket_with(config: DatabaseConfig) -> anyhow::Result<Rocket<Build>> {
    let rocket = rocket::build()
        .attach(database_fairing(config))
        .attach(cors().context("invalid CORS configuration")?)
        .attach(ContextFairing)
        .attach(Template::fairing())
        .manage(ArticleInteractor::new(ArticleRepository))
        // ルーティングの登録（Djangoの `urls.py` に相当）
        .mount("/", routes![index])
        .mount("/", controllers::articles::routes())
        .mount("/todos", controllers::todos::routes())
        .mount("/api", controllers::api::routes())
        .mount("/static", FileServer::from(relative!("static")))
        .register("/", catchers![not_found, unprocessable_entity, internal_error]);

    Ok(rocket)
}

/// 全オリジンを許可するCORS設定 (`Access-Control-Allow-Origin: *`)。
/// プリフライトの OPTIONS にはFairingが 204 で応答します。
fn cors() -> Result<Cors, rocket_cors::Error> {
    CorsOptions {
        allowed_origins: AllowedOrigins::all(),
        send_wildcard: true,
        ..Default::default()
    }
    .to_cors()
}

/// 起動時にDBへ接続し、マイグレーションを実行してから
/// TodoInteractor をRocketの管理下に置きます。
fn database_fairing(config: DatabaseConfig) -> AdHoc {
    AdHoc::try_on_ignite("Database", move |rocket| async move {
        match connect_and_migrate(&config).await {
            Ok(db) => {
                let interactor = TodoInteractor::new(TodoRepository::new(db));
                Ok(rocket.manage(interactor))
            }
            Err(e) => {
                tracing::error!("database setup failed: {:#}", e);
                Err(rocket)
            }
        }
    })
}

async fn connect_and_migrate(config: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    // 1. データベース接続
    let db = db::set_up_db(config)
        .await
        .context("failed to connect to the database")?;

    // 2. マイグレーションの実行（Djangoの `migrate` コマンドに相当）
    Migrator::up(&db, None)
        .await
        .context("failed to run migrations")?;

    Ok(db)
}

#[get("/")]
fn index() -> Redirect {
    Redirect::to("/todos")
}

#[catch(404)]
fn not_found() -> &'static str {
    "Not Found"
}

// フォームの形式エラーは Rocket では 422 になるが、400 として返す
#[catch(422)]
fn unprocessable_entity() -> (Status, &'static str) {
    (Status::BadRequest, "Invalid input")
}

#[catch(500)]
fn internal_error() -> &'static str {
    "Internal Server Error"
}
