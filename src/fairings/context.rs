use rocket::http::Method;
use rocket::request::FlashMessage;
use rocket::{fairing::{Fairing, Info, Kind}, Data, Request};

/// JSONや静的ファイルを返すパス
const NON_PAGE_PREFIXES: &[&str] = &["/api", "/static", "/articles"];

/// コンテキストプロセッサとしてのFairing。
/// リクエスト処理前にフラッシュメッセージ (Djangoの `messages` フレームワークに相当) を
/// 読み取り、リクエストローカルにキャッシュします。
/// フラッシュは読むと消えるため、HTMLページを返しうる GET だけを対象にします。
/// ハンドラはセッションを直接触らず、[`AppTemplate`](crate::views::app_template::AppTemplate) が
/// キャッシュからテンプレートへ注入します。
pub struct ContextFairing;

#[rocket::async_trait]
impl Fairing for ContextFairing {
    fn info(&self) -> Info {
        Info {
            name: "Flash Context Processor",
            kind: Kind::Request,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _data: &mut Data<'_>) {
        if !renders_page(request) {
            return;
        }

        let cached = match request.guard::<Option<FlashMessage<'_>>>().await {
            rocket::outcome::Outcome::Success(Some(flash)) => Some(CachedFlash {
                kind: flash.kind().to_owned(),
                message: flash.message().to_owned(),
            }),
            _ => None,
        };

        if cached.is_some() {
            request.local_cache(|| cached);
        }
    }
}

fn renders_page(request: &Request<'_>) -> bool {
    if request.method() != Method::Get {
        return false;
    }

    let path = request.uri().path().as_str();
    !NON_PAGE_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .map_or(false, |rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// キャッシュ用の型
#[derive(Clone, Debug, serde::Serialize)]
pub struct CachedFlash {
    pub kind: String,
    pub message: String,
}
