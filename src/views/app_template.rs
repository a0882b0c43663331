use std::borrow::Cow;
use rocket::request::Request;
use rocket::response::{Responder, Result};
use rocket::serde::json::serde_json;
use rocket_dyn_templates::Template;
use crate::fairings::context::CachedFlash;

pub const APP_NAME: &str = "Todo Board";

/// アプリケーション標準のテンプレートレスポンダー。
/// Djangoの `context_processors` のように、共通のコンテキスト（アプリ名、フラッシュメッセージ）を自動注入します。
pub struct AppTemplate {
    pub name: Cow<'static, str>,
    pub context: serde_json::Value,
}

impl AppTemplate {
    pub fn new<N, C>(name: N, context: C) -> Self
    where
        N: Into<Cow<'static, str>>,
        C: serde::Serialize,
    {
        AppTemplate {
            name: name.into(),
            context: serde_json::to_value(context).unwrap_or(serde_json::json!({})),
        }
    }
}

// Rocket 0.5のResponderは同期メソッド（Resultを返す）
impl<'r> Responder<'r, 'static> for AppTemplate {
    fn respond_to(self, request: &'r Request<'_>) -> Result<'static> {
        // 1. グローバルコンテキストの準備
        let mut final_context = serde_json::Map::new();
        final_context.insert("app_name".into(), APP_NAME.into());

        // Flash Context (ContextFairingでキャッシュ済み)
        if let Some(flash) = request.local_cache(|| None::<CachedFlash>) {
            if let Ok(value) = serde_json::to_value(flash) {
                final_context.insert("flash".into(), value);
            }
        }

        // 2. マージ (Local Context overrides Global)
        if let serde_json::Value::Object(local_map) = self.context {
            for (k, v) in local_map {
                final_context.insert(k, v);
            }
        }

        // 3. Templateに委譲
        let template = Template::render(self.name, serde_json::Value::Object(final_context));
        template.respond_to(request)
    }
}
