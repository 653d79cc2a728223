use client::api::{GameServer, HttpGameServer};
use client::config::ClientConfig;
use client::controller::Controller;
use client::runtime::{self, UiEvent, ViewSink};
use client::terminal::{self, TerminalSink};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Logs go to stderr so they don't interleave with the board
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env()?;
    let server = HttpGameServer::new(&config)?;

    tracing::info!(api_url = %server.base_url(), side = %config.player_side, "Connecting to game server");
    match server.health().await {
        Ok(()) => tracing::info!("Game server is up"),
        Err(e) => tracing::warn!("Game server health check failed: {e}"),
    }

    let mut controller = Controller::new(server, config.player_side);
    let mut sink = TerminalSink::new(std::io::stdout());

    // Read stdin on its own task; the controller only ever sees whole events.
    let (tx, mut rx) = mpsc::channel::<UiEvent>(32);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match terminal::parse_command(&line) {
                    Some(event) => {
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    None if line.trim().is_empty() => {}
                    None => eprintln!("{}", terminal::HELP),
                },
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("Failed to read input: {e}");
                    break;
                }
            }
        }
    });

    eprintln!("{}", terminal::HELP);
    if controller.start_new_game().await.is_err() {
        tracing::warn!("Starting without a game; type `new` to retry");
    }
    sink.show(&controller.view(), &controller.take_notices());

    runtime::run(&mut controller, &mut rx, &mut sink).await;
    Ok(())
}
