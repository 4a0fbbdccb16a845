use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use bardo::{cli, config, error};

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
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the HTTP backend (default)
    Serve(ServeOptions),

    /// Print the tracks of the player's playlist
    Playlist(PlaylistOptions),

    /// Resolve the streams of a video id
    Resolve(ResolveOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct ServeOptions {
    /// Open the web client in the default browser
    #[clap(long)]
    open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Print a single random track
    #[clap(long)]
    random: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ResolveOptions {
    /// YouTube video id, e.g. dQw4w9WgXcQ
    id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli
        .command
        .unwrap_or(Command::Serve(ServeOptions::default()))
    {
        Command::Serve(opt) => cli::serve(opt.open).await,
        Command::Playlist(opt) => cli::playlist(opt.random).await,
        Command::Resolve(opt) => cli::resolve(opt.id).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
