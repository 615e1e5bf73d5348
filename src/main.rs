use log_bootstrap::app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::main().await
}
