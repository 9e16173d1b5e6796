#[tokio::main]
async fn main() -> std::io::Result<()> {
    rehab_engine::run_with_config().await
}
