use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ap_core::{ArticleParser, ParseRequest};
use ap_extract::{HttpFetcher, ReadabilityExtractor};
use ap_inference::{create_summarizer, parse_flag, YakeExtractor};
use ap_web::{create_app, AppState};

fn parse_switch(value: &str) -> std::result::Result<bool, String> {
    Ok(parse_flag(value))
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Extract, summarize and tag news articles", long_about = None)]
pub struct Cli {
    /// Summarize with the remote seq2seq model instead of TextRank
    #[arg(
        long,
        global = true,
        env = "USE_ABSTRACTIVE",
        action = clap::ArgAction::Set,
        value_parser = parse_switch,
        num_args = 0..=1,
        require_equals = true,
        default_value = "0",
        default_missing_value = "1"
    )]
    use_abstractive: bool,
    /// Summarization endpoint (Hugging Face inference API shape)
    #[arg(long, global = true, env = "SUMMARIZER_URL")]
    model_url: Option<String>,
    #[arg(long, global = true, env = "SUMMARIZER_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,
    /// Summaries generated at the same time against the model
    #[arg(long, global = true, default_value_t = 1)]
    max_concurrent_inference: usize,
    /// Timeout in seconds for fetching article URLs
    #[arg(long, global = true, default_value_t = 30)]
    fetch_timeout: u64,
    /// Do not probe the summarization model at startup
    #[arg(long, global = true)]
    skip_warmup: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// Parse a single article and print the record as JSON
    Extract {
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        url: Option<String>,
        /// Read markup from a local file instead of fetching
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

impl Cli {
    fn inference_config(&self) -> ap_inference::Config {
        ap_inference::Config {
            use_abstractive: self.use_abstractive,
            model_url: self.model_url.clone(),
            api_token: self.api_token.clone(),
            max_concurrent_inference: self.max_concurrent_inference,
            warm_up: !self.skip_warmup,
            ..Default::default()
        }
    }
}

async fn build_parser(cli: &Cli) -> anyhow::Result<ArticleParser> {
    let fetcher = HttpFetcher::with_options(
        Duration::from_secs(cli.fetch_timeout),
        ap_extract::fetcher::DEFAULT_MAX_BYTES,
    )?;
    let summarizer = create_summarizer(&cli.inference_config())
        .await
        .context("Failed to initialize the summarizer")?;
    info!("🧠 Summarizer initialized (using {})", summarizer.name());

    Ok(ArticleParser::new(
        Arc::new(fetcher),
        Arc::new(ReadabilityExtractor::new()),
        summarizer,
        Arc::new(YakeExtractor::new()),
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("👋 Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();

    let parser = build_parser(&cli).await?;

    match &cli.command {
        Commands::Serve { host, port } => {
            let listener = TcpListener::bind((host.as_str(), *port))
                .await
                .with_context(|| format!("Failed to bind {}:{}", host, port))?;
            info!("🚀 Listening on http://{}", listener.local_addr()?);
            axum::serve(listener, create_app(AppState::new(parser)))
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
        Commands::Extract { url, file } => {
            let request = match (url, file) {
                (_, Some(path)) => {
                    let html = tokio::fs::read_to_string(path)
                        .await
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    ParseRequest::from_html(html)
                }
                (Some(url), None) => ParseRequest::from_url(url.as_str()),
                (None, None) => ParseRequest::default(),
            };
            let record = parser.parse(&request).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    Ok(())
}
