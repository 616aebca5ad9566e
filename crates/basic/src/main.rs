use std::env;

use mvc_web::{Server, logging};
use tracing::{Level, error};

const DEFAULT_ADDRESS: &str = "127.0.0.1:8080";

#[tokio::main]
async fn main() {
    let level = env::var("MVC_BASIC_LOG").map_or(Level::INFO, |level| logging::level_from_str(&level));
    if let Err(e) = logging::init(level) {
        eprintln!("failed to install log subscriber: {e}");
        return;
    }

    let address = env::var("MVC_BASIC_ADDRESS").unwrap_or_else(|_| DEFAULT_ADDRESS.to_owned());

    let router = match mvc_basic::router() {
        Ok(router) => router,
        Err(e) => {
            error!(cause = %e, "invalid route table");
            return;
        }
    };

    let server = match Server::builder().router(router).address(address).build() {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "invalid server configuration");
            return;
        }
    };

    server.start().await;
}
