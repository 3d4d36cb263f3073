use anyhow::Context;
use clap::Parser;
use timings_fetch::{FetchConfig, PageContext, TimingsClient, TimingsError, TimingsResolver};

mod args;

use args::Cli;

const EXIT_OK: i32 = 0;
const EXIT_NO_DATA: i32 = 1;
const EXIT_FATAL: i32 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();
    let cli = Cli::parse();
    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fatal: {e:?}");
            e.downcast_ref::<TimingsError>()
                .map(TimingsError::exit_code)
                .unwrap_or(EXIT_FATAL)
        }
    };
    std::process::exit(code);
}

fn build_config(cli: &Cli) -> FetchConfig {
    let mut config = FetchConfig::from_env();
    if let Some(url) = &cli.treeherder_url {
        config = config.with_treeherder_url(url);
    }
    if let Some(url) = &cli.queue_url {
        config = config.with_queue_url(url);
    }
    if let Some(url) = &cli.index_url {
        config = config.with_index_url(url);
    }
    if let Some(host) = &cli.public_demo_host {
        config = config.with_public_demo_host(host);
    }
    if cli.timeout_secs.is_some() {
        config.timeout_secs = cli.timeout_secs;
    }
    config
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = build_config(&cli);

    let mut page = PageContext::from_url(&cli.page_url, config.public_demo_host.as_deref())?;
    if let Some(kind) = &cli.kind {
        page = page.with_kind(kind);
    }
    let client = TimingsClient::new(&config)?;
    let resolver = TimingsResolver::with_components(client, page);

    let response = resolver.fetch_data(&cli.filename).await?;
    eprintln!("{} {}", response.status(), response.status_text());

    if !response.ok() {
        return Ok(EXIT_NO_DATA);
    }

    let body: serde_json::Value = response
        .json()
        .await
        .with_context(|| format!("reading {}", cli.filename))?;
    let rendered = if cli.raw {
        serde_json::to_string(&body)?
    } else {
        serde_json::to_string_pretty(&body)?
    };
    println!("{}", rendered);

    Ok(EXIT_OK)
}
