use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use url::Url;

use bookscraper::core::retry::RetryPolicy;
use bookscraper::core::{DEFAULT_IMAGE_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_ROOT_URL};
use bookscraper::scrapers::http_scraper::DEFAULT_USER_AGENT;
use bookscraper::{CrawlConfig, Crawler, HttpScraper, StorageManager};

#[derive(Debug, Parser)]
#[command(name = "bookscraper", version, about = "Scrape a paginated book catalogue into per-category CSV files")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(long, global = true, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 10)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Walk every category and export all products
    Crawl {
        #[arg(value_name = "ROOT_URL", default_value = DEFAULT_ROOT_URL)]
        root_url: Url,

        #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        #[arg(long, value_name = "DIR", default_value = DEFAULT_IMAGE_DIR)]
        image_dir: PathBuf,

        /// Skip cover image downloads
        #[arg(long)]
        no_images: bool,

        /// Also write <category>.jsonl next to each CSV
        #[arg(long)]
        json: bool,

        /// Only crawl these categories (repeatable, case-insensitive)
        #[arg(short, long = "category", value_name = "NAME")]
        categories: Vec<String>,

        #[arg(long, value_name = "N", default_value_t = 3)]
        image_retries: usize,

        #[arg(long, value_name = "MS", default_value_t = 2000)]
        retry_delay_ms: u64,
    },
    /// Scrape a single product page and print it as JSON
    Product {
        url: Url,

        /// Root the image path is resolved against; defaults to the URL's origin
        #[arg(long, value_name = "URL")]
        site_root: Option<Url>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::builder()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .filter_module("selectors", log::LevelFilter::Warn)
        .filter_module("html5ever", log::LevelFilter::Error)
        .parse_default_env()
        .init();

    let scraper = HttpScraper::new()?
        .with_headers(vec![("user-agent", cli.user_agent.as_str())])?
        .with_timeout(Duration::from_secs(cli.timeout))?;

    match cli.command {
        Command::Crawl {
            root_url,
            output_dir,
            image_dir,
            no_images,
            json,
            categories,
            image_retries,
            retry_delay_ms,
        } => {
            let config = CrawlConfig::new(root_url)
                .with_output_dir(output_dir)
                .with_image_dir(image_dir)
                .with_images(!no_images)
                .with_json(json)
                .with_categories(categories)
                .with_image_retry(RetryPolicy::new(
                    image_retries,
                    Duration::from_millis(retry_delay_ms),
                ));

            let storage = StorageManager::from_config(&config)
                .with_context(|| format!("cannot prepare {}", config.output_dir.display()))?;
            let crawler = Crawler::new(Box::new(scraper));
            crawler.run(&config, &storage).await?;
            crawler.stats().print_summary();
        }
        Command::Product { url, site_root } => {
            let site_root = match site_root {
                Some(root) => root,
                None => url.join("/")?,
            };
            let crawler = Crawler::new(Box::new(scraper));
            let record = crawler
                .scrape_product(&url, &site_root)
                .await
                .with_context(|| format!("cannot scrape {}", url))?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    Ok(())
}
