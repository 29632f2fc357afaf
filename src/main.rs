use anyhow::Result;
use dotenv::dotenv;
use engage::commands::Cli;
use engage::libs::{logging, messages::macros::is_debug_mode};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();

    if is_debug_mode() {
        logging::init();
    }

    Cli::menu().await
}
