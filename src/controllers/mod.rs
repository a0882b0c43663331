pub mod api;
pub mod articles;
pub mod todos;

use crate::errors::AppError;

/// パスのIDを解釈します。数値でなければ 400。
/// 数値だが `i32` に収まらないIDは、存在しないIDとして 404 にします。
pub fn parse_id(raw: &str) -> Result<i32, AppError> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::BadRequest("Invalid ID".to_owned()));
    }

    raw.parse().map_err(|_| AppError::NotFound)
}
