use anyhow::Result;
use wxstack_client::WeatherClient;
use wxstack_node::{Config, LogSink, PollService};

#[tokio::main]
async fn main() -> Result<()> {
    wxstack_node::init()?;

    let (config, _validation) = Config::load_validated()?;
    tracing::info!(
        location = %config.location,
        units = ?config.units,
        elevation_m = config.elevation_m,
        "starting wxstack node"
    );

    let client = WeatherClient::new(config.api_key.clone())?;
    let service = PollService::new(config, client, Box::new(LogSink));

    service.run().await
}
