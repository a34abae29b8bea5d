use clap::{Parser, Subcommand};
use std::process;

use helpline_bot::application::services::ReplyService;
use helpline_bot::domain::entities::Message;
use helpline_bot::infrastructure::adapters::ConsoleAdapter;
use helpline_bot::infrastructure::config::Config;
use helpline_bot::infrastructure::http;
use helpline_bot::infrastructure::nlu::WitProvider;
use helpline_bot::infrastructure::storage::InMemorySessionStore;

#[derive(Parser)]
#[command(name = "helpline-bot")]
#[command(about = "Messenger bot answering HIV/AIDS questions via Wit.ai", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the Messenger webhook
    Run,
    /// Classify a question and print the reply (dev mode)
    Ask {
        /// Question text
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            let config = load_config(&cli.config);
            block_on(async move {
                if let Err(e) = http::serve(&config).await {
                    tracing::error!("Server stopped: {}", e);
                    process::exit(1);
                }
            });
        }
        Commands::Ask { text } => {
            let config = load_config(&cli.config);
            block_on(ask(config, text.join(" ")));
        }
        Commands::Version => {
            println!("helpline-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
    }
}

fn load_config(config_path: &str) -> Config {
    match Config::load_or_default(config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid config {}: {}", config_path, e);
            process::exit(1);
        }
    }
}

fn block_on<F: std::future::Future<Output = ()>>(future: F) {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt.block_on(future),
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            process::exit(1);
        }
    }
}

async fn ask(config: Config, text: String) {
    let classifier = match WitProvider::from_config(&config.nlu) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Cannot classify: {}", e);
            process::exit(1);
        }
    };

    let service = ReplyService::new(ConsoleAdapter::new(), classifier, InMemorySessionStore::new());
    if service.handle_message(Message::from_text("console", text)).await.is_none() {
        tracing::warn!("No reply was produced");
    }
}

fn init_config() {
    let config = Config::default();
    match serde_yaml::to_string(&config) {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
        }
        Err(e) => tracing::error!("Failed to render config: {}", e),
    }
}
