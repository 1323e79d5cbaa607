#[tokio::main]
async fn main() -> anyhow::Result<()> {
    creatorhub::cli::run().await
}
