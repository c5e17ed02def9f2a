//! CLI entry point for the market sentiment tool.
//!
//! Provides subcommands for a one-shot analysis, a scheduled refresh session,
//! and an interactive prompt that starts one session per entered symbol.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use market_sentiment::config::{self, EmitterKind, Settings};
use market_sentiment::fetch::{BasicClient, HttpClient};
use market_sentiment::infra::rss::RssNewsFeed;
use market_sentiment::infra::yahoo::YahooPriceClient;
use market_sentiment::logging::layer_filter;
use market_sentiment::output::build_emitters;
use market_sentiment::pipeline::{Pipeline, Services};
use market_sentiment::scheduler::{RefreshScheduler, cancellation};
use market_sentiment::sentiment::LexiconScorer;
use market_sentiment::target::{PromptChoice, TargetMode, parse_prompt};
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{
    Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "market_sentiment")]
#[command(about = "News sentiment signal for an NSE stock or the broad market", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: SettingsArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SettingsArgs {
    /// RSS feed to sample
    #[arg(long, global = true, env = "SENTIMENT_FEED_URL", default_value = config::DEFAULT_FEED_URL)]
    feed_url: String,

    /// Base URL of the chart price API
    #[arg(long, global = true, env = "SENTIMENT_PRICE_BASE_URL", default_value = config::DEFAULT_PRICE_BASE_URL)]
    price_base_url: String,

    /// Suffix appended to a stock symbol to name its instrument
    #[arg(long, global = true, env = "SENTIMENT_EXCHANGE_SUFFIX", default_value = config::DEFAULT_EXCHANGE_SUFFIX)]
    exchange_suffix: String,

    /// Instrument queried in market mode
    #[arg(long, global = true, env = "SENTIMENT_MARKET_INDEX", default_value = config::DEFAULT_MARKET_INDEX)]
    market_index: String,

    /// Minutes between the starts of consecutive passes
    #[arg(long, global = true, env = "SENTIMENT_INTERVAL_MINUTES", default_value_t = config::DEFAULT_INTERVAL_MINUTES)]
    interval_minutes: u64,

    /// Seconds between cancellation checks while waiting for the next pass
    #[arg(long, global = true, env = "SENTIMENT_POLL_SECONDS", default_value_t = config::DEFAULT_POLL_SECONDS)]
    poll_seconds: u64,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, env = "SENTIMENT_TIMEOUT_SECONDS", default_value_t = config::DEFAULT_TIMEOUT_SECONDS)]
    timeout_seconds: u64,

    /// Directory for report, chart and history files
    #[arg(short, long, global = true, env = "SENTIMENT_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Comma-separated emitters to run after each pass
    #[arg(
        long,
        global = true,
        env = "SENTIMENT_EMIT",
        value_enum,
        value_delimiter = ',',
        default_values_t = config::default_emitters()
    )]
    emit: Vec<EmitterKind>,
}

impl From<SettingsArgs> for Settings {
    fn from(args: SettingsArgs) -> Self {
        Settings {
            feed_url: args.feed_url,
            price_base_url: args.price_base_url,
            exchange_suffix: args.exchange_suffix,
            market_index: args.market_index,
            interval_minutes: args.interval_minutes,
            poll_seconds: args.poll_seconds,
            timeout_seconds: args.timeout_seconds,
            output_dir: args.output_dir,
            emitters: args.emit,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single pass and exit
    Analyze {
        /// NSE symbol (e.g. RELIANCE); omit for market sentiment
        #[arg(short, long)]
        symbol: Option<String>,
    },
    /// Run passes on the refresh interval until Ctrl+C
    Watch {
        /// NSE symbol (e.g. RELIANCE); omit for market sentiment
        #[arg(short, long)]
        symbol: Option<String>,
    },
    /// Prompt for a symbol, then watch it until Ctrl+C; repeat until 'exit'
    Interactive,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/market_sentiment.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("market_sentiment.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(layer_filter("RUST_LOG", LevelFilter::INFO));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(layer_filter("RUST_LOG_JSON", LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let settings = Settings::from(cli.settings);
    settings.validate()?;

    // One scorer and one HTTP client for the whole process.
    let services = build_services(&settings)?;

    match cli.command {
        Commands::Analyze { symbol } => {
            let target = TargetMode::from_input(symbol.as_deref())?;
            Pipeline::new(target, services).run_once().await;
        }
        Commands::Watch { symbol } => {
            let target = TargetMode::from_input(symbol.as_deref())?;
            run_session(target, services, &settings).await;
        }
        Commands::Interactive => interactive(services, &settings).await?,
    }

    Ok(())
}

fn build_services(settings: &Settings) -> Result<Services> {
    std::fs::create_dir_all(&settings.output_dir)?;

    let http: Arc<dyn HttpClient> = Arc::new(BasicClient::new(settings.timeout())?);

    Ok(Services {
        feed: Arc::new(RssNewsFeed::new(http.clone(), &settings.feed_url)),
        prices: Arc::new(YahooPriceClient::new(
            http,
            &settings.price_base_url,
            &settings.exchange_suffix,
            &settings.market_index,
        )),
        scorer: Arc::new(LexiconScorer::new()),
        emitters: build_emitters(&settings.emitters, &settings.output_dir),
    })
}

/// Runs the scheduler for `target` until Ctrl+C.
#[tracing::instrument(skip_all, fields(target = %target))]
async fn run_session(target: TargetMode, services: Services, settings: &Settings) -> usize {
    let (handle, signal) = cancellation();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, stopping after the current pass");
            handle.cancel();
        }
    });
    // Let the watcher install its handler before the first pass.
    tokio::task::yield_now().await;

    let mut pipeline = Pipeline::new(target, services);
    let mut scheduler = RefreshScheduler::new(settings.interval(), settings.poll());
    let passes = scheduler.run(&mut pipeline, &signal).await;

    watcher.abort();
    passes
}

async fn interactive(services: Services, settings: &Settings) -> Result<()> {
    println!("Stock Sentiment Analysis Tool");
    println!("Enter an NSE stock symbol (e.g., 'RELIANCE') or leave blank for market sentiment.");
    println!("Type 'exit' to quit. Press Ctrl+C to end a running session.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\nStock symbol: ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        match parse_prompt(&line) {
            Ok(PromptChoice::Exit) => break,
            Ok(PromptChoice::Analyze(target)) => {
                run_session(target, services.clone(), settings).await;
            }
            Err(e) => println!("{e}"),
        }
    }

    println!("Exiting...");
    Ok(())
}
