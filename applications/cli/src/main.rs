/// Cadence - terminal playback harness
use cadence_cli::{Catalog, CliConfig, Session};
use cadence_playback::format_time;
use clap::{Parser, Subcommand};
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Drive the Cadence playback engine from the terminal", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./cadence.toml when present)
    #[arg(short, long, global = true, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute playback commands from a script (stdin when omitted)
    Run {
        /// Song catalog (JSON)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Command script, one command per line
        #[arg(short, long)]
        script: Option<PathBuf>,
    },
    /// List the songs and playlists in a catalog
    Songs {
        /// Song catalog (JSON)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence=info,cadence_cli=info,cadence_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Run { catalog, script } => {
            let catalog = Catalog::load(&config.catalog_path(catalog)?)?;
            run(config, catalog, script)?;
        }
        Commands::Songs { catalog } => {
            let catalog = Catalog::load(&config.catalog_path(catalog)?)?;
            list_songs(&catalog)?;
        }
    }

    Ok(())
}

fn run(config: CliConfig, catalog: Catalog, script: Option<PathBuf>) -> anyhow::Result<()> {
    let mut session = Session::new(config.playback, catalog);
    let stdout = io::stdout().lock();

    match script {
        Some(path) => {
            tracing::info!("Running script {}", path.display());
            let file = std::fs::File::open(&path)?;
            session.run_script(BufReader::new(file), stdout)?;
        }
        None => {
            session.run_script(io::stdin().lock(), stdout)?;
        }
    }

    Ok(())
}

fn list_songs(catalog: &Catalog) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();

    for song in catalog.songs() {
        writeln!(
            out,
            "{:<12} {:>6}  {} - {}",
            song.id,
            format_time(song.duration.as_secs_f64()),
            song.artist,
            song.title
        )?;
    }

    for name in catalog.playlist_names() {
        let songs = catalog.playlist(name)?;
        writeln!(out, "playlist {} ({} songs)", name, songs.len())?;
    }

    Ok(())
}
