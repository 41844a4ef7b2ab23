#[tokio::main]
async fn main() -> sagebot::error::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("sagebot=info,serenity=warn"),
    )
    .init();
    log::info!("Starting sagebot Discord bot");

    match sagebot::run().await {
        Ok(_) => {
            log::info!("Bot shut down successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Bot encountered an error: {}", e);
            Err(e)
        }
    }
}
