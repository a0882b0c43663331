/// アプリケーションのメインエントリーポイント。
/// Djangoの `manage.py runserver` 実行時の動きに相当します。
#[rocket::main]
async fn main() -> anyhow::Result<()> {
    let rocket = todo_board::build_rocket().await?;

    rocket
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("server error: {}", e))?;

    Ok(())
}
