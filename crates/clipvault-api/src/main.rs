use clipvault_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    clipvault_api::telemetry::init_telemetry();

    // Initialize the application (database, storage, routes)
    let (_state, router) = clipvault_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    clipvault_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
