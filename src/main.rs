use std::io;
use std::time::Duration;

use clap::Parser;
use participant_probe::{DEFAULT_ENDPOINT, DEFAULT_PARTICIPANT, ProbeConfig, QueryRunner};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "participant-probe")]
#[command(about = "Send one participant query and print what the server returns")]
struct Args {
    /// Participant identifier to query
    #[arg(short, long, default_value = DEFAULT_PARTICIPANT)]
    participant: String,

    /// Query endpoint
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Request timeout in milliseconds (client default when omitted)
    #[arg(long)]
    timeout_ms: Option<u64>,
}

impl Args {
    fn into_config(self) -> ProbeConfig {
        ProbeConfig::new(self.endpoint, self.participant)
            .with_timeout(self.timeout_ms.map(Duration::from_millis))
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    // Bad arguments never stop the probe; it runs with the defaults instead.
    let config = match Args::try_parse() {
        Ok(args) => args.into_config(),
        Err(e) => {
            let _ = e.print();
            warn!("Ignoring command-line arguments, using defaults");
            ProbeConfig::default()
        }
    };

    let runner = QueryRunner::new(config);
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    // Exit status stays 0 even when the console goes away.
    if let Err(e) = runner.run(&mut stdout, &mut stderr).await {
        error!("Failed to write probe output: {}", e);
    }
}
