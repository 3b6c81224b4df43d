use std::time::Duration;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use topsync::{cli, config, error, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sync the Recent Top Tracks playlist with your current top tracks
    Sync(SyncOptions),

    /// Print the authorization URL and exit
    AuthUrl(AuthUrlOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SyncOptions {
    /// Number of top tracks to keep in the playlist
    #[clap(long, default_value_t = config::DEFAULT_TOP_TRACKS, value_parser = clap::value_parser!(u32).range(1..))]
    limit: u32,

    /// Local port receiving the OAuth redirect
    #[clap(long, default_value_t = config::DEFAULT_PORT)]
    port: u16,

    /// Give up waiting for the authorization callback after this many seconds
    #[clap(long)]
    timeout: Option<u64>,

    /// Show the changes without modifying the playlist
    #[clap(long)]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct AuthUrlOptions {
    #[clap(long, default_value_t = config::DEFAULT_PORT)]
    port: u16,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Sync(opt) => {
            let args = cli::SyncArgs {
                limit: opt.limit,
                port: opt.port,
                timeout: opt.timeout.map(Duration::from_secs),
                dry_run: opt.dry_run,
            };
            if let Err(e) = cli::sync(args).await {
                error!("Sync failed: {}", e);
            }
        }
        Command::AuthUrl(opt) => {
            if let Err(e) = cli::auth_url(opt.port).await {
                error!("{}", e);
            }
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
