// ABOUTME: CLI binary for the channelcast feed builder.
// ABOUTME: Builds an RSS feed for one channel link, fetching the page or reading a saved HTML file.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use channelcast_feed::parse_caller_time;
use channelcast_scrape::{
    Client, Feed, FeedIdentity, FeedOverrides, Limits, DEFAULT_ORIGIN,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "channelcast")]
#[command(about = "Build a podcast RSS feed from a video channel page")]
struct Args {
    /// Channel link, e.g. rumble.com/c/example
    #[arg()]
    link: String,

    /// Saved channel page to use instead of fetching
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// Feed title override
    #[arg(long = "title")]
    title: Option<String>,

    /// Feed description override
    #[arg(long = "description")]
    description: Option<String>,

    /// Feed publish time override (RFC 3339)
    #[arg(long = "published")]
    published: Option<String>,

    /// Target site origin
    #[arg(long = "origin", default_value = DEFAULT_ORIGIN)]
    origin: String,

    /// Fetch timeout in seconds
    #[arg(long = "timeout-secs", default_value_t = 10)]
    timeout_secs: u64,

    /// Maximum characters kept from titles and descriptions (0 = unlimited)
    #[arg(long = "max-text-length", default_value_t = 0)]
    max_text_length: usize,

    /// Maximum number of feed items (0 = unlimited)
    #[arg(long = "max-items", default_value_t = 0)]
    max_items: usize,

    /// Print the feed model as JSON instead of RSS
    #[arg(long = "json")]
    json_output: bool,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(long = "log-level", default_value = "warn")]
    log_level: String,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn identity_from_args(args: &Args) -> Result<FeedIdentity, String> {
    let published_at = match args.published.as_deref() {
        Some(text) => Some(
            parse_caller_time(text).map_err(|e| format!("invalid --published {:?}: {}", text, e))?,
        ),
        None => None,
    };
    Ok(FeedIdentity::from_overrides(FeedOverrides {
        title: args.title.clone(),
        description: args.description.clone(),
        published_at,
        updated_at: None,
    }))
}

fn format_output(client: &Client, feed: &Feed, json_output: bool) -> Result<String, String> {
    if json_output {
        serde_json::to_string_pretty(feed).map_err(|e| e.to_string())
    } else {
        client.encode(feed).map_err(|e| e.to_string())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    let identity = match identity_from_args(&args) {
        Ok(identity) => identity,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };

    let client = match Client::builder()
        .origin(&args.origin)
        .timeout(Duration::from_secs(args.timeout_secs))
        .limits(Limits::new(args.max_text_length, args.max_items))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };

    let feed = match &args.html {
        Some(path) => match fs::read_to_string(path) {
            Ok(html) => client.feed_from_html(&html, Some(&args.link), &identity),
            Err(e) => {
                eprintln!("error reading file {:?}: {}", path, e);
                return ExitCode::from(1);
            }
        },
        None => client.feed(Some(&args.link), &identity).await,
    };

    let feed = match feed {
        Ok(feed) => feed,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };

    let output = match format_output(&client, &feed, args.json_output) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &output) {
                eprintln!("error writing to {:?}: {}", path, e);
                return ExitCode::from(1);
            }
        }
        None => {
            let mut stdout = io::stdout();
            if writeln!(stdout, "{}", output).is_err() {
                return ExitCode::from(1);
            }
        }
    }

    ExitCode::SUCCESS
}
