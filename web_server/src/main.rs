#[tokio::main]
async fn main() -> std::io::Result<()> {
    web_server::run_with_config().await
}
