use serde::Serialize;

/// 初期版の記事データ。
/// DBには保存せず、固定の1件だけを返します (Todo機能に置き換え済み)。
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
}
