/// Cadence - terminal player screen
use anyhow::Context;
use cadence_cli::{parse_line, render::OutputFormat, CliConfig, Command, SimulatedAudioService};
use cadence_playback::{spawn_screen, PlayerScreen, ScreenHandle, ViewState};
use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Drive the Cadence player screen from the terminal", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    /// Print view states as JSON lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for view states
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence=info,cadence_cli=info,cadence_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::from_flag(cli.json);

    let config = CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let catalog = config.catalog();
    let service = SimulatedAudioService::new(&config.player);

    let (screen, ticks) = PlayerScreen::initialize(&catalog, service, config.screen.clone())
        .await
        .context("Failed to set up the player screen")?;
    let mut handle = spawn_screen(screen, ticks);
    print_view(format, &handle.latest())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!("{}", e);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Tick => print_view(format, &handle.latest())?,
            Command::Intent(intent) => {
                let applied = handle
                    .apply(intent)
                    .await
                    .context("Player screen stopped unexpectedly")?;
                if let Err(e) = &applied.result {
                    warn!("{}", e);
                }
                print_view(format, &applied.view)?;
            }
        }
        log_outputs(&mut handle);
    }

    log_outputs(&mut handle);
    let service = handle.close().await;
    info!(
        "Player screen closed ({})",
        service
            .as_ref()
            .and_then(SimulatedAudioService::loaded)
            .unwrap_or("nothing loaded")
    );
    Ok(())
}

fn print_view(format: OutputFormat, view: &ViewState) -> anyhow::Result<()> {
    let line = format.render(view).context("Failed to render view state")?;
    println!("{line}");
    Ok(())
}

fn log_outputs<S>(handle: &mut ScreenHandle<S>) {
    while let Some(event) = handle.try_next_event() {
        debug!("Playback event: {:?}", event);
    }
    // Scroll commands are already part of the printed view
    while handle.try_next_scroll().is_some() {}
}
