use std::process::ExitCode;

use channelcast_server::{logging, FeedServer, ServerConfig};
use clap::Parser;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::parse();
    logging::init(&config.log_level);

    info!(origin = %config.origin, "Channelcast feed server");

    let server = match FeedServer::new(&config) {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::from(2);
        }
    };

    if let Err(e) = server.run().await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
