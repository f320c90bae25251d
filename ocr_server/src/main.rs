#[tokio::main]
async fn main() -> std::io::Result<()> {
    ocr_server::run_with_config().await
}
