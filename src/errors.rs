use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder, Response};
use rocket::serde::json::Json;
use rocket::Request;
use sea_orm::DbErr;
use serde::Serialize;
use std::io::Cursor;

use crate::entities::todo::UnknownStatus;

/// アプリケーション全体で使用するエラー型。
/// Djangoの例外クラス (Http404, SuspiciousOperation 等) に相当します。
/// 各バリアントは [`AppError::status`] でちょうど1つのHTTPステータスに対応します。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// データベースエラー (500 Internal Server Error)
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// リソースが見つからない、または論理削除済み (404 Not Found)
    #[error("Not found")]
    NotFound,
    /// 不正な入力: IDや日付の形式、必須項目の欠落 (400 Bad Request)
    #[error("Bad request: {0}")]
    BadRequest(String),
    /// ビジネスルール上受け付けられない値、例えば未知のステータス (400 Bad Request)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// その他の内部エラー (500 Internal Server Error)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> Status {
        match self {
            AppError::BadRequest(_) | AppError::InvalidArgument(_) => Status::BadRequest,
            AppError::NotFound => Status::NotFound,
            AppError::Database(_) | AppError::Internal(_) => Status::InternalServerError,
        }
    }

    /// クライアントに返すメッセージ。
    /// サーバー側のエラー詳細はログにのみ出力します。
    pub fn public_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) | AppError::InvalidArgument(msg) => msg.clone(),
            AppError::NotFound => "Not Found".to_owned(),
            AppError::Database(_) | AppError::Internal(_) => "Internal Server Error".to_owned(),
        }
    }

    fn log(&self, request: &Request<'_>) {
        if self.status().code >= 500 {
            tracing::error!(
                "{} {} failed: {}",
                request.method(),
                request.uri(),
                self
            );
        }
    }
}

impl From<UnknownStatus> for AppError {
    fn from(e: UnknownStatus) -> Self {
        AppError::InvalidArgument(e.to_string())
    }
}

impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        self.log(request);
        let message = self.public_message();

        Response::build()
            .status(self.status())
            .header(ContentType::Plain)
            .sized_body(message.len(), Cursor::new(message))
            .ok()
    }
}

/// JSONエンドポイント用のエラー。`{"ok": false, "error": "..."}` の形で返します。
#[derive(Debug)]
pub struct JsonError(pub AppError);

#[derive(Serialize)]
struct JsonErrorBody {
    ok: bool,
    error: String,
}

impl From<AppError> for JsonError {
    fn from(e: AppError) -> Self {
        JsonError(e)
    }
}

impl<'r> Responder<'r, 'static> for JsonError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let JsonError(error) = self;
        error.log(request);
        let body = JsonErrorBody {
            ok: false,
            error: error.public_message(),
        };

        (error.status(), Json(body)).respond_to(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::BadRequest("x".into()).status(), Status::BadRequest);
        assert_eq!(AppError::InvalidArgument("x".into()).status(), Status::BadRequest);
        assert_eq!(AppError::NotFound.status(), Status::NotFound);
        assert_eq!(
            AppError::Database(DbErr::Custom("down".into())).status(),
            Status::InternalServerError
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = AppError::Database(DbErr::Custom("password=secret".into()));
        assert_eq!(err.public_message(), "Internal Server Error");
        assert!(err.to_string().contains("password=secret"));
    }

    #[test]
    fn test_unknown_status_is_invalid_argument() {
        let err: AppError = UnknownStatus("maybe".into()).into();
        assert!(matches!(err, AppError::InvalidArgument(ref msg) if msg.contains("maybe")));
    }
}
