//! Command-line driver for one weather invocation.
//!
//! Stands in for the chat framework: takes a channel, a nick, and the raw
//! command input from argv, prints the reply line. Credentials come from the
//! environment (see wxbot-core).

use anyhow::Result;
use wxbot_weather::{ResolutionRequest, WeatherCommand};

#[tokio::main]
async fn main() -> Result<()> {
    wxbot_core::init()?;

    let config = wxbot_core::Config::load()?;

    let mut args = std::env::args().skip(1);
    let channel = args.next().unwrap_or_else(|| "#wxbot".to_string());
    let caller = args.next().unwrap_or_else(|| "guest".to_string());
    let raw_input = args.collect::<Vec<_>>().join(" ");

    let Some(command) = WeatherCommand::from_config(&config)? else {
        // Missing credentials: the command stays silent.
        tracing::debug!("weather command not configured, exiting");
        return Ok(());
    };

    let request = ResolutionRequest {
        raw_input,
        channel,
        caller,
    };
    println!("{}", command.run(&request).await);

    Ok(())
}
