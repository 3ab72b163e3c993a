use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use jwcfeed::{category, parse_full_text_flag, Config, FeedAdapter};

#[derive(Parser, Debug)]
#[command(
    name = "jwcfeed",
    about = "RSS feed generator for the NUAA Academic Affairs Office announcement listings"
)]
struct Args {
    /// Category key (see --list-categories)
    category: Option<String>,

    /// Full-text flag: `true`, `1` or `yes` fetch each item's detail page
    full_text: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "rss")]
    format: Format,

    /// Write the document to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to the TOML config file
    #[arg(long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    /// List the available categories and exit
    #[arg(long)]
    list_categories: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Rss,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.list_categories {
        for category in category::CATEGORIES {
            println!("{:<6} {}", category.key, category.title);
        }
        return Ok(());
    }

    let Some(category_key) = args.category.as_deref() else {
        anyhow::bail!("Missing category key (use --list-categories to see the valid keys)");
    };

    let config = Config::load(&args.config).context("Failed to load configuration")?;
    let adapter = FeedAdapter::new(config).context("Failed to build feed adapter")?;

    let full_text = parse_full_text_flag(args.full_text.as_deref());
    let feed = adapter
        .fetch_feed(category_key, full_text)
        .await
        .with_context(|| format!("Failed to fetch feed for category '{category_key}'"))?;

    let document = match args.format {
        Format::Rss => feed.to_rss_xml(),
        Format::Json => {
            serde_json::to_string_pretty(&feed).context("Failed to serialize feed as JSON")?
        }
    };

    match &args.output {
        Some(path) => std::fs::write(path, &document)
            .with_context(|| format!("Failed to write '{}'", path.display()))?,
        None => println!("{document}"),
    }

    Ok(())
}
