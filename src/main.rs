use std::process::ExitCode;
use std::sync::Arc;

use airibes_panel::config::{ConfigError, PanelConfig};
use airibes_panel::services::store::FileStore;
use airibes_panel::state::{EditorSession, SessionError};
use clap::{Parser, Subcommand};
use floorplan::engine::Editor;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum PanelError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "airibes-panel", about = "Airibes floorplan panel")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the sender data compiled from the stored floorplan.
    Compile,
    /// Recompile the sender data and store it with the floorplan.
    Save,
    /// Print host devices not yet placed on the floorplan.
    Devices,
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();
    if let Err(e) = dotenv {
        debug!(error = %e, "no .env loaded");
    }

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "airibes-panel failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), PanelError> {
    let config = PanelConfig::from_env()?;
    info!(
        apartment_id = %config.apartment_id,
        storage_dir = %config.storage_dir.display(),
        scale = config.scale(),
        "panel configured"
    );

    let mut editor = Editor::new();
    editor.set_canvas(config.canvas_size_cm, config.viewport_px);
    let store = Arc::new(FileStore::new(config.storage_dir.clone()));
    let session = EditorSession::new(store, config.apartment_id.clone(), editor);

    session.load().await?;
    session.refresh_devices().await?;

    match command {
        Command::Compile => {
            println!("{}", serde_json::to_string_pretty(&session.sender_data().await)?);
        }
        Command::Save => {
            session.save().await?;
        }
        Command::Devices => {
            let palette = session.read(|e| e.palette().cloned().collect::<Vec<_>>()).await;
            println!("{}", serde_json::to_string_pretty(&palette)?);
        }
    }
    Ok(())
}
