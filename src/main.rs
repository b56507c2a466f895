#[tokio::main]
async fn main() -> anyhow::Result<()> {
    listing_studio::run().await
}
