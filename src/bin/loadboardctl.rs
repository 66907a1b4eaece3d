use clap::Parser;
use loadboard_api::cli::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    run(Cli::parse()).await
}
