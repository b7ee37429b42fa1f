mod commands;
mod config;
mod services;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::search::SearchKind;
use crate::commands::stream::StreamOptions;
use crate::config::Config;
use crate::services::console::Console;
use crate::services::player::ProcessPlayer;
use crate::services::shutdown::wait_for_termination;
use crate::services::twitch::TwitchClient;

#[derive(Parser)]
#[command(name = "twitch-player")]
#[command(version)]
#[command(about = "A twitch cli for browsing/playing streams")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play stream from channel
    Stream {
        /// Channel name
        channel: String,

        /// Run in fullscreen
        #[arg(short, long)]
        fullscreen: bool,

        /// Audio output device
        #[arg(short, long, value_name = "DEVICE")]
        aout: Option<String>,

        /// Video output device
        #[arg(short, long, value_name = "DEVICE")]
        vout: Option<String>,
    },

    /// List games or stream channels
    List {
        #[command(subcommand)]
        target: ListTarget,
    },

    /// Search for channels, games or streams
    Search(SearchArgs),
}

#[derive(Subcommand)]
enum ListTarget {
    /// Top games by current viewers
    Games {
        /// Number of games to list
        #[arg(short, long)]
        number: Option<u32>,
    },

    /// Live streams, optionally for one game
    Streams {
        /// Game to list channels for
        #[arg(short, long)]
        game: Option<String>,

        /// List featured streams instead
        #[arg(long, conflicts_with = "game")]
        featured: bool,

        /// Number of channels to list
        #[arg(short, long)]
        number: Option<u32>,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Search query
    query: String,

    /// Search channels
    #[arg(long, conflicts_with = "game")]
    channel: bool,

    /// Search games
    #[arg(long)]
    game: bool,

    /// Number of results to list
    #[arg(short, long)]
    number: Option<u32>,
}

impl SearchArgs {
    fn kind(&self) -> SearchKind {
        if self.channel {
            SearchKind::Channels
        } else if self.game {
            SearchKind::Games
        } else {
            SearchKind::Streams
        }
    }
}

/// Explicitly constructed dependencies shared by every command
pub struct AppContext {
    pub config: Config,
    pub twitch: TwitchClient,
}

impl AppContext {
    fn new(config: Config) -> anyhow::Result<Self> {
        let twitch =
            TwitchClient::from_config(&config).context("Error initializing twitch client")?;
        Ok(Self { config, twitch })
    }
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "twitch_player=warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli, ctx: AppContext) -> anyhow::Result<()> {
    let limit = |number: Option<u32>| number.unwrap_or(ctx.config.list_limit);
    let mut stdout = std::io::stdout();

    match cli.command {
        Command::Stream {
            channel,
            fullscreen,
            aout,
            vout,
        } => {
            let mut player =
                ProcessPlayer::from_config(&ctx.config, aout.as_deref(), vout.as_deref())
                    .context("Error initializing media player")?;
            let options = StreamOptions {
                channel,
                fullscreen,
                search_limit: ctx.config.channel_search_limit,
            };
            commands::stream::run(
                &ctx.twitch,
                &mut player,
                &mut Console::stdio(),
                &options,
                wait_for_termination(),
            )
            .await?;
        }
        Command::List {
            target: ListTarget::Games { number },
        } => {
            commands::list::list_games(&ctx.twitch, &mut stdout, limit(number)).await?;
        }
        Command::List {
            target:
                ListTarget::Streams {
                    game,
                    featured,
                    number,
                },
        } => {
            if featured {
                commands::list::list_featured(&ctx.twitch, &mut stdout, limit(number)).await?;
            } else {
                commands::list::list_streams(
                    &ctx.twitch,
                    &mut stdout,
                    game.as_deref(),
                    limit(number),
                )
                .await?;
            }
        }
        Command::Search(args) => {
            commands::search::search(
                &ctx.twitch,
                &mut stdout,
                &args.query,
                args.kind(),
                limit(args.number),
            )
            .await?;
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env();
    init_logging(&config);

    tracing::info!("Starting twitch-player v{}", env!("CARGO_PKG_VERSION"));

    let result = match AppContext::new(config) {
        Ok(ctx) => run(cli, ctx).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
