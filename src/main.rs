use anyhow::Result;
use remind::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
