#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = eduquiz_client::run().await {
        eprintln!("eduquiz fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
