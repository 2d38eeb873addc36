//! Binary entrypoint for CLI Adventures.
//!
//! Commands:
//! - `play` - play in this terminal, one command per line on stdin
//! - `serve [--bind <addr>]` - run the JSON-lines relay for remote front-ends
//! - `init` - write a starter `config.toml`
//!
//! See the library crate docs for module-level details: `cli_adventures::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use cli_adventures::config::Config;
use cli_adventures::shell::{markup, Session, Verb, WELCOME};
use cli_adventures::{metrics, server};

#[derive(Parser)]
#[command(name = "cli-adventures")]
#[command(about = "Learn the shell by recovering a stolen treasure")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively in this terminal
    Play,
    /// Serve games to remote front-ends over TCP
    Serve {
        /// Listen address, overriding the config file (e.g. 0.0.0.0:4040)
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Write a default configuration file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            Config::create_default(&cli.config).await?;
            println!("Wrote default configuration to {}", cli.config);
            Ok(())
        }
        Commands::Play => {
            let config = Config::load_or_default(&cli.config).await?;
            init_logging(&config, cli.verbose, true);
            play(&config).await
        }
        Commands::Serve { bind } => {
            let mut config = Config::load_or_default(&cli.config).await?;
            init_logging(&config, cli.verbose, false);
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            info!("Starting CLI Adventures relay v{}", env!("CARGO_PKG_VERSION"));
            server::run(config.server).await
        }
    }
}

/// Stdin REPL: print the prompt, feed each line to the session, print the result.
async fn play(config: &Config) -> Result<()> {
    let color = config.game.color;
    let render = |text: &str| {
        if color {
            text.to_string()
        } else {
            markup::strip(text)
        }
    };

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut session = Session::new();
    metrics::record_session_opened();

    if config.game.banner {
        stdout
            .write_all(format!("{}\n", render(&markup::success(WELCOME))).as_bytes())
            .await?;
    }

    loop {
        let (challenge, hint) = session.lessons().challenge();
        let status = if hint.is_empty() {
            format!("[{challenge}]\n")
        } else {
            format!("[{challenge}] Hint: {hint}\n")
        };
        stdout.write_all(status.as_bytes()).await?;
        stdout
            .write_all(format!("{}$ ", session.prompt()).as_bytes())
            .await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let response = session.process(&line);
        let mut result = response.result.as_str();
        if response.clears_screen() {
            let cleared = result.trim_start_matches(markup::CLEAR_SCREEN);
            if color {
                stdout.write_all(markup::CLEAR_SCREEN.as_bytes()).await?;
            }
            result = cleared.trim_start_matches('\n');
        }
        if !result.is_empty() {
            stdout.write_all(format!("{}\n", render(result)).as_bytes()).await?;
        }

        let exiting = line
            .split_whitespace()
            .next()
            .is_some_and(|verb| Verb::parse(verb) == Verb::Exit);
        if exiting {
            break;
        }
    }

    stdout.flush().await?;
    metrics::record_session_closed();
    let totals = metrics::snapshot();
    info!(
        "session ended: {} commands, {} lessons (all done: {}), mission complete: {}",
        totals.commands,
        session.lessons().completed_ids().len(),
        session.lessons().all_complete(),
        session.mission_complete()
    );
    if session.history().is_empty() {
        warn!("no commands were entered");
    }
    Ok(())
}

/// Configure `env_logger` with UTC timestamps and optional append-to-file output.
///
/// `-v`/`-vv` override the configured level. Interactive play keeps the
/// console quiet (warnings only) unless a verbosity flag is given, since log
/// lines would otherwise interleave with game output.
fn init_logging(config: &Config, verbosity: u8, interactive: bool) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    let level = match verbosity {
        0 if interactive && config.logging.file.is_none() => log::LevelFilter::Warn,
        0 => config.logging.level_filter(),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(level);

    let opened = config.logging.file.as_ref().and_then(|file| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
            .ok()
    });

    if let Some(f) = opened {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Mirror to the console only in the foreground and never over a game.
        let mirror = atty::is(atty::Stream::Stdout) && !interactive;

        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());

            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }

            if mirror {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
