mod config;
mod deezer;
mod listenbrainz;
mod logging;
mod ports;
mod query;
mod resolver;
mod sync;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::WrapErr};

use crate::config::Config;
use crate::deezer::DeezerClient;
use crate::listenbrainz::ListenBrainzClient;
use crate::logging::setup_logging;
use crate::sync::PlaylistSyncService;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Console log level (default: off)
    #[arg(long, default_value = "off", global = true, env = "LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// File log level (default: debug)
    #[arg(long, default_value = "debug", global = true)]
    log_file_level: log::LevelFilter,

    /// Path to log file
    #[arg(long, env = "PLAYLIST_MIGRATOR_LOG_FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Migrate the latest Weekly Exploration playlist to Deezer
    Sync {
        /// ListenBrainz user the playlists were created for
        #[arg(long, env = "LISTEN_BRAINZ_USER")]
        listenbrainz_user: String,

        /// ListenBrainz API token
        #[arg(long, env = "LISTEN_BRAINZ_TOKEN")]
        listenbrainz_token: String,

        /// Deezer OAuth access token
        #[arg(long, env = "DEEZER_ACCESS_TOKEN")]
        deezer_access_token: String,

        /// Title of the Deezer playlist to (re)create
        #[arg(long, env = "DEEZER_PLAYLIST_NAME")]
        playlist_name: String,
    },
    /// Print the Deezer OAuth authorization URL
    AuthUrl {
        /// Deezer application id
        #[arg(long, env = "DEEZER_APPID")]
        app_id: String,

        /// Redirect URL registered with the Deezer application
        #[arg(long, env = "DEEZER_REDIRECT_URL")]
        redirect_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_logging(args.log_level, args.log_file.clone(), args.log_file_level)?;

    log::debug!("Playlist migrator starting");

    match args.command {
        Commands::Sync {
            listenbrainz_user,
            listenbrainz_token,
            deezer_access_token,
            playlist_name,
        } => {
            let config = Config::new(
                listenbrainz_user,
                listenbrainz_token,
                deezer_access_token,
                playlist_name,
            )?;

            let source = ListenBrainzClient::new(
                config.listenbrainz_user.clone(),
                config.listenbrainz_token.clone(),
            );
            let destination = DeezerClient::new(config.deezer_access_token.clone())?;
            let service = PlaylistSyncService::new(
                source,
                destination,
                config.destination_playlist_title.clone(),
            );

            let report = service.run().await.wrap_err("Playlist sync failed")?;

            println!(
                "Synced \"{}\" into Deezer playlist {}",
                report.source_playlist, report.destination_playlist_id
            );
            println!(
                "Resolved {} of {} track(s)",
                report.resolved.len(),
                report.total_tracks()
            );
            if !report.unresolved.is_empty() {
                println!("Tracks without a catalog match:");
                for track in &report.unresolved {
                    println!("  - {} - {}", track.creators.join(", "), track.title);
                }
            }
            log::info!("Sync command completed successfully");
        }
        Commands::AuthUrl {
            app_id,
            redirect_url,
        } => {
            println!("{}", deezer::auth::authorize_url(&app_id, &redirect_url));
        }
    }

    Ok(())
}
