use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = booking_server::load_config();
    let app = booking_server::build(&config)?;
    let addr = booking_server::listen_addr(&config)?;

    tracing::info!(addr = %addr, "booking server starting");

    app.listen(addr).await?;

    Ok(())
}
