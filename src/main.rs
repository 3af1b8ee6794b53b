use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use weatherblog::{Pipeline, WeatherBlogConfig, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = WeatherBlogConfig::load()?;
    let telemetry = telemetry::init(&config.logging)?;

    // Runs fail individually until these are set; the server still starts
    if let Err(e) = config.require_credentials() {
        warn!("{}", e);
    }
    info!(
        cities = config.locations.len(),
        notifications = config.notification.is_enabled(),
        "Starting weatherblog {}",
        weatherblog::VERSION
    );

    let host = config.server.host.clone();
    let port = config.server.port;
    let pipeline = Arc::new(Pipeline::new(Arc::new(config))?);

    let served = web::run(web::app(pipeline), &host, port).await;
    telemetry.shutdown();
    served
}
