//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands;
use bizpulse::config::Config;
use bizpulse::output::OutputMode;

/// bizpulse - Small-business sentiment and resource assistant
#[derive(Parser, Debug)]
#[command(
    name = "bizpulse",
    version,
    about = "Small-business sentiment and resource assistant",
    long_about = "Classify what business owners are talking about, track how they feel,\n\
                  and point them at the county programs that can help.\n\n\
                  Settings are read from bizpulse.toml (see `bizpulse init`)."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to $BIZPULSE_CONFIG, ./bizpulse.toml, then the user config dir)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default bizpulse.toml
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Classify the topic and sentiment of a message
    Classify {
        /// Message text
        text: String,
    },

    /// Recommend resources for a question
    Recommend {
        /// Question text
        query: String,

        /// Maximum number of recommendations
        #[arg(short, long, default_value_t = bizpulse::core::services::DEFAULT_LIMIT)]
        limit: usize,
    },

    /// List catalog resources, for one topic or all
    Resources {
        /// Topic: permits, funding, training, taxes, support
        topic: Option<String>,
    },

    /// Show sentiment and topic statistics
    Stats {
        /// Posts file (.json or .jsonl); the demo posts are used when omitted
        #[arg(short, long, value_name = "FILE")]
        posts: Option<PathBuf>,

        /// Trend bucket width: hour, day, week
        #[arg(short, long)]
        granularity: Option<String>,
    },

    /// Chat with the resource assistant
    #[cfg(feature = "tokio")]
    Chat,

    /// Serve the JSON API over HTTP
    #[cfg(feature = "server")]
    Serve {
        /// Interface to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Posts file to preload
        #[arg(long, value_name = "FILE", conflicts_with = "sample")]
        posts: Option<PathBuf>,

        /// Preload the demo posts
        #[arg(long)]
        sample: bool,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let config_path = cli.config.as_deref();
    let load_config = || Config::load(config_path);

    match cli.command {
        Some(Command::Init { force }) => commands::init(config_path, force, output_mode),
        Some(Command::Classify { text }) => commands::classify(&load_config()?, &text, output_mode),
        Some(Command::Recommend { query, limit }) => {
            commands::recommend(&load_config()?, &query, limit, output_mode)
        },
        Some(Command::Resources { topic }) => {
            commands::resources(&load_config()?, topic.as_deref(), output_mode)
        },
        Some(Command::Stats { posts, granularity }) => commands::stats(
            &load_config()?,
            posts.as_deref(),
            granularity.as_deref(),
            output_mode,
        ),
        #[cfg(feature = "tokio")]
        Some(Command::Chat) => commands::chat(&load_config()?, output_mode),
        #[cfg(feature = "server")]
        Some(Command::Serve {
            host,
            port,
            posts,
            sample,
        }) => {
            let options = commands::ServeOptions {
                host,
                port,
                posts,
                sample,
            };
            commands::serve(&load_config()?, options)
        },
        Some(Command::Version) => {
            commands::version(output_mode);
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("bizpulse v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'bizpulse --help' for usage");
                println!("Run 'bizpulse chat' to ask for help");
            }
            Ok(())
        },
    }
}
