#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = nexel::run().await {
        eprintln!("nexel fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
