use clap::{Parser, Subcommand};
use deal_sniper::config::{AppConfig, load_config_or_default};
use deal_sniper::formatter::{format_best, format_digest, format_single};
use deal_sniper::notifier::{Publisher, StdoutPublisher, TelegramPublisher};
use deal_sniper::{Deal, DealPipeline, DealSet};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "deal-sniper",
    about = "Finds discounted Steam games and formats them for posting"
)]
struct Cli {
    /// Path to the JSON config file; defaults apply when it is missing.
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the message for the single best deal.
    Best,
    /// Print a numbered top-N digest.
    Digest {
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// List every ranked deal.
    List {
        /// Emit JSON, one preformatted message per deal.
        #[arg(long)]
        json: bool,
    },
    /// Publish the best deal (or the digest) to the configured channel.
    Post {
        #[arg(long)]
        digest: bool,
        /// Print instead of publishing.
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Serialize)]
struct DealView<'a> {
    #[serde(flatten)]
    deal: &'a Deal,
    message: String,
}

#[derive(Serialize)]
struct ListView<'a> {
    origin: deal_sniper::DealOrigin,
    deals: Vec<DealView<'a>>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = load_config_or_default(&cli.config);
    let level = loaded
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_tracing(&level);

    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let pipeline = match DealPipeline::from_config(config.pipeline.clone()) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command.unwrap_or(Command::Best) {
        Command::Best => {
            print_message(&pipeline.best_deal_message().await);
        }
        Command::Digest { count } => {
            let count = count.unwrap_or(config.pipeline.digest_size);
            print_message(&pipeline.digest_message(count).await);
        }
        Command::List { json } => {
            let set = pipeline.run().await;
            if json {
                return print_json(&set);
            }
            print_list(&set);
        }
        Command::Post { digest, dry_run } => {
            return post(&pipeline, &config, digest, dry_run).await;
        }
    }
    ExitCode::SUCCESS
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_message(message: &str) {
    println!("{message}");
    println!("\nLength: {} characters", message.chars().count());
}

fn print_list(set: &DealSet) {
    if set.is_fallback() {
        println!("⚠️  No live deals found, showing example deals.\n");
    }
    for (i, deal) in set.deals().iter().enumerate() {
        println!(
            "{}. {} - {} ({}) - {}",
            i + 1,
            deal.name,
            deal.price,
            deal.raw_discount_text,
            deal.source_label
        );
        if let Some(url) = &deal.source_url {
            println!("   {url}");
        }
    }
}

fn print_json(set: &DealSet) -> ExitCode {
    let view = ListView {
        origin: set.origin(),
        deals: set
            .deals()
            .iter()
            .map(|deal| DealView {
                deal,
                message: format_single(deal),
            })
            .collect(),
    };
    match serde_json::to_string_pretty(&view) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to serialize deals: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn post(
    pipeline: &DealPipeline,
    config: &AppConfig,
    digest: bool,
    dry_run: bool,
) -> ExitCode {
    let set = if digest {
        pipeline.run().await
    } else {
        pipeline.top_deals(1).await
    };

    if set.is_fallback() && !config.allow_fallback_posting && !dry_run {
        warn!(
            "Only example deals available; refusing to publish them \
             (set allow_fallback_posting to override)"
        );
        return ExitCode::FAILURE;
    }

    let message = if digest {
        format_digest(set.deals(), config.pipeline.digest_size)
    } else {
        format_best(set.deals())
    };

    let publisher: Box<dyn Publisher> = match (&config.telegram, dry_run) {
        (Some(tg), false) => match TelegramPublisher::new(tg) {
            Ok(p) => Box::new(p),
            Err(e) => {
                error!("Publisher setup failed: {}", e);
                return ExitCode::FAILURE;
            }
        },
        (None, false) => {
            warn!("No telegram section in config, printing instead");
            Box::new(StdoutPublisher)
        }
        (_, true) => Box::new(StdoutPublisher),
    };

    match publisher.publish(&message).await {
        Ok(()) => {
            info!("Message published");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Publishing failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
